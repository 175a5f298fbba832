//! Greeting account provisioning and reads.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};

use crate::connection::GreeterConnection;
use crate::error::{GreeterError, GreeterResult};
use crate::instruction::{build_create_greeting_account, CreateGreetingAccountArgs};
use crate::state::{decode, GreetingAccountState};
use crate::submit::submit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The account already existed with the expected owner and size.
    AlreadyProvisioned,
    /// The account was created and funded for rent exemption.
    Created { signature: Signature, lamports: u64 },
}

impl ProvisionOutcome {
    pub fn created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Make sure the seed-derived account exists, creating it if absent.
///
/// An existing account is validated for owner and size; a mismatch means the
/// deployed program and this client disagree on the layout and is reported
/// instead of being reused. Creation is awaited until confirmed.
pub async fn ensure_account(
    connection: &impl GreeterConnection,
    payer: &Keypair,
    seed: &str,
    derived: &Pubkey,
    owner: &Pubkey,
    required_size: usize,
) -> GreeterResult<ProvisionOutcome> {
    if let Some(account) = connection.get_account(derived).await? {
        if account.owner != *owner {
            return Err(GreeterError::OwnerMismatch { expected: *owner, actual: account.owner });
        }
        if account.data.len() != required_size {
            return Err(GreeterError::SchemaMismatch { expected: required_size, actual: account.data.len() });
        }
        tracing::debug!(%derived, "greeting account already provisioned");
        return Ok(ProvisionOutcome::AlreadyProvisioned);
    }

    let lamports = connection.get_minimum_balance_for_rent_exemption(required_size).await?;
    tracing::info!(%derived, lamports, space = required_size, "creating greeting account");

    let ix = build_create_greeting_account(&CreateGreetingAccountArgs {
        payer: payer.pubkey(),
        new_account: *derived,
        seed,
        lamports,
        space: required_size,
        owner: *owner,
    });

    match submit(connection, &[ix], &[payer]).await {
        Ok(signature) => Ok(ProvisionOutcome::Created { signature, lamports }),
        Err(e) => {
            tracing::warn!(%derived, error = %e, "greeting account creation failed");
            Err(e)
        }
    }
}

/// Fetch and decode the greeting state stored at `address`.
pub async fn read_greeting(
    connection: &impl GreeterConnection,
    address: &Pubkey,
    owner: &Pubkey,
) -> GreeterResult<GreetingAccountState> {
    let account = connection
        .get_account(address)
        .await?
        .ok_or(GreeterError::AccountNotFound(*address))?;
    if account.owner != *owner {
        return Err(GreeterError::OwnerMismatch { expected: *owner, actual: account.owner });
    }
    decode(Some(&account.data))
}
