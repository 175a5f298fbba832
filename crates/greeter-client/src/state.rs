//! Greeting account state and its fixed binary layout.
//!
//! The greeter program stores a single borsh-encoded `u32` in the account:
//!
//! ```text
//! [0..4] counter: u32 (little-endian)
//! ```
//!
//! The account data length must equal [`GreetingAccountState::LEN`]; anything
//! else is rejected rather than coerced.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::{GreeterError, GreeterResult};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct GreetingAccountState {
    /// Number of greetings the account has received.
    pub counter: u32,
}

impl GreetingAccountState {
    /// Serialized length of the layout.
    pub const LEN: usize = core::mem::size_of::<Self>();

    pub fn new(counter: u32) -> Self {
        Self { counter }
    }

    /// Encode into the on-chain byte layout.
    pub fn encode(&self) -> Vec<u8> {
        self.counter.to_le_bytes().to_vec()
    }
}

/// Decode raw account data into a [`GreetingAccountState`].
///
/// Fails when the data is absent or its length differs from the layout size.
pub fn decode(raw: Option<&[u8]>) -> GreeterResult<GreetingAccountState> {
    let data = raw.ok_or_else(|| GreeterError::deserialization("account data is absent"))?;
    if data.len() != GreetingAccountState::LEN {
        return Err(GreeterError::deserialization(format!(
            "expected {} bytes of greeting state, got {}",
            GreetingAccountState::LEN,
            data.len()
        )));
    }
    borsh::from_slice::<GreetingAccountState>(data)
        .map_err(|e| GreeterError::deserialization(e.to_string()))
}
