//! Constants shared between the greeter program and clients.
//!
//! Keep these stable because they affect address derivation.

use crate::state::GreetingAccountState;

/// Seed used to derive the greeting account from the payer key.
pub const GREETING_SEED: &str = "hello";

/// Maximum seed length accepted by `create_with_seed`.
pub use solana_program::pubkey::MAX_SEED_LEN;

/// Default RPC endpoint (local test validator).
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// Default streaming endpoint (local test validator).
pub const DEFAULT_WS_URL: &str = "ws://127.0.0.1:8900";

/// Size in bytes of the greeting account data, taken from the state layout.
pub const GREETING_SIZE: usize = GreetingAccountState::LEN;
