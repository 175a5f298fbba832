//! Error taxonomy for the greeter client.
//!
//! Every fallible operation returns [`GreeterResult`]. Callers (CLI, UIs) use
//! [`GreeterError::is_not_provisioned`] and [`GreeterError::is_retryable`] to
//! tell an expected "account not created yet" apart from genuine failures.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GreeterError {
    /// Key material or endpoint configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Seed rejected by address derivation.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// Transport level failure (unreachable endpoint, malformed response).
    #[error("network error: {0}")]
    Network(String),

    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Stored account size differs from the expected layout size.
    #[error("schema mismatch: expected {expected} bytes of account data, found {actual}")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("owner mismatch: expected {expected}, found {actual}")]
    OwnerMismatch { expected: Pubkey, actual: Pubkey },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Transaction rejected by the network or the on-chain program.
    #[error("submission error: {0}")]
    Submission(String),

    /// A session step was invoked before its prerequisites completed.
    #[error("session not ready: {0}")]
    NotReady(String),
}

pub type GreeterResult<T> = Result<T, GreeterError>;

impl GreeterError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn deserialization(msg: impl Into<String>) -> Self {
        Self::Deserialization(msg.into())
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    /// True when the account simply has not been provisioned yet.
    pub fn is_not_provisioned(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }

    /// True when re-invoking the same step may succeed.
    ///
    /// Submission retries must build a fresh transaction (fresh blockhash).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Submission(_))
    }
}
