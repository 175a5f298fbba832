//! Seed-based address derivation for the greeting account.
//!
//! The greeting account address is `sha256(base || seed || owner)`, the same
//! derivation the system program checks in `create_account_with_seed`. It is
//! deterministic, so the account can be found again without storing anything.

use solana_program::pubkey::{Pubkey, PubkeyError};

use crate::constants::{GREETING_SEED, MAX_SEED_LEN};
use crate::error::{GreeterError, GreeterResult};

/// Addresses used by most flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreetingAddresses {
    pub payer: Pubkey,
    pub program: Pubkey,
    pub greeting: Pubkey,
}

/// Derive an account address from a base key, a seed and the owning program.
pub fn derive_address(base: &Pubkey, seed: &str, owner: &Pubkey) -> GreeterResult<Pubkey> {
    validate_seed(seed)?;
    if *owner == Pubkey::default() {
        return Err(GreeterError::configuration("owner program address must not be the default key"));
    }

    Pubkey::create_with_seed(base, seed, owner).map_err(|e| match e {
        PubkeyError::MaxSeedLengthExceeded => {
            GreeterError::InvalidSeed(format!("seed exceeds {MAX_SEED_LEN} bytes"))
        }
        PubkeyError::IllegalOwner => {
            GreeterError::configuration(format!("{owner} is not a valid owner program address"))
        }
        other => GreeterError::InvalidSeed(format!("{seed:?}: {other}")),
    })
}

/// Derive the greeting account with the default seed.
pub fn derive_greeting(payer: &Pubkey, program: &Pubkey) -> GreeterResult<GreetingAddresses> {
    let greeting = derive_address(payer, GREETING_SEED, program)?;
    Ok(GreetingAddresses { payer: *payer, program: *program, greeting })
}

pub fn validate_seed(seed: &str) -> GreeterResult<()> {
    if seed.is_empty() {
        return Err(GreeterError::InvalidSeed("seed must not be empty".to_string()));
    }
    if seed.len() > MAX_SEED_LEN {
        return Err(GreeterError::InvalidSeed(format!(
            "seed is {} bytes, limit is {MAX_SEED_LEN}",
            seed.len()
        )));
    }
    Ok(())
}
