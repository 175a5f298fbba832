//! Key material for a greeter session.
//!
//! Secret keys are never embedded in this crate. They are injected through a
//! [`SecretsProvider`] at construction time. Two providers are included:
//! in-memory bytes and Solana CLI keypair files.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

use crate::error::{GreeterError, GreeterResult};

/// Length of an ed25519 secret key as exported by Solana tooling.
pub const SECRET_KEY_LEN: usize = 64;

/// Source of the two raw secret keys a session needs.
pub trait SecretsProvider {
    fn payer_secret(&self) -> GreeterResult<Vec<u8>>;
    fn program_secret(&self) -> GreeterResult<Vec<u8>>;
}

/// Secrets held in memory, e.g. fetched from a secret store by the caller.
#[derive(Clone)]
pub struct StaticSecrets {
    payer: Vec<u8>,
    program: Vec<u8>,
}

impl StaticSecrets {
    pub fn new(payer: Vec<u8>, program: Vec<u8>) -> Self {
        Self { payer, program }
    }
}

impl fmt::Debug for StaticSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSecrets").finish_non_exhaustive()
    }
}

impl SecretsProvider for StaticSecrets {
    fn payer_secret(&self) -> GreeterResult<Vec<u8>> {
        Ok(self.payer.clone())
    }

    fn program_secret(&self) -> GreeterResult<Vec<u8>> {
        Ok(self.program.clone())
    }
}

/// Secrets read from keypair files (JSON byte array or base58 text).
#[derive(Debug, Clone)]
pub struct KeypairFileSecrets {
    pub payer_path: PathBuf,
    pub program_path: PathBuf,
}

impl KeypairFileSecrets {
    pub fn new(payer_path: impl Into<PathBuf>, program_path: impl Into<PathBuf>) -> Self {
        Self { payer_path: payer_path.into(), program_path: program_path.into() }
    }

    fn read(path: &Path) -> GreeterResult<Vec<u8>> {
        let raw = fs::read_to_string(path).map_err(|e| {
            GreeterError::configuration(format!("cannot read keypair {}: {e}", path.display()))
        })?;
        parse_secret_key(&raw)
    }
}

impl SecretsProvider for KeypairFileSecrets {
    fn payer_secret(&self) -> GreeterResult<Vec<u8>> {
        Self::read(&self.payer_path)
    }

    fn program_secret(&self) -> GreeterResult<Vec<u8>> {
        Self::read(&self.program_path)
    }
}

/// Parse a secret key from a JSON byte array (`[12, 34, ...]`) or base58 text.
pub fn parse_secret_key(input: &str) -> GreeterResult<Vec<u8>> {
    let s = input.trim();
    if s.is_empty() {
        return Err(GreeterError::configuration("secret key is empty"));
    }
    let bytes = if s.starts_with('[') {
        serde_json::from_str::<Vec<u8>>(s)
            .map_err(|e| GreeterError::configuration(format!("invalid keypair json: {e}")))?
    } else {
        bs58::decode(s)
            .into_vec()
            .map_err(|e| GreeterError::configuration(format!("invalid base58 secret key: {e}")))?
    };
    if bytes.len() != SECRET_KEY_LEN {
        return Err(GreeterError::configuration(format!(
            "secret key must be {SECRET_KEY_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// The payer and program identities for one session.
pub struct KeyMaterial {
    payer: Keypair,
    program: Keypair,
}

impl KeyMaterial {
    /// Load both key pairs from a secrets provider.
    pub fn load(provider: &dyn SecretsProvider) -> GreeterResult<Self> {
        let payer = keypair_from_secret("payer", &provider.payer_secret()?)?;
        let program = keypair_from_secret("program", &provider.program_secret()?)?;
        Ok(Self { payer, program })
    }

    pub fn from_keypairs(payer: Keypair, program: Keypair) -> Self {
        Self { payer, program }
    }

    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// The program address is the program key pair's public key.
    pub fn program_id(&self) -> Pubkey {
        self.program.pubkey()
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("payer", &self.payer.pubkey())
            .field("program", &self.program.pubkey())
            .finish()
    }
}

fn keypair_from_secret(label: &str, secret: &[u8]) -> GreeterResult<Keypair> {
    if secret.len() != SECRET_KEY_LEN {
        return Err(GreeterError::configuration(format!(
            "{label} secret key must be {SECRET_KEY_LEN} bytes, got {}",
            secret.len()
        )));
    }
    Keypair::from_bytes(secret)
        .map_err(|e| GreeterError::configuration(format!("{label} secret key is invalid: {e}")))
}
