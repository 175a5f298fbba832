//! greeter-client
//!
//! A small, focused Rust client for the Solana hello-world greeter program.
//!
//! It includes:
//! - seed-based derivation of the greeting account address
//! - provisioning of the rent-exempt greeting account
//! - the greet instruction builder and a transaction submitter
//! - decoding of the 4-byte greeting state
//! - a session type that drives the flow and reports state changes
//!
//! Secret keys and endpoints are always provided by the caller; nothing here
//! reads the environment or embeds key material.

pub mod address;
pub mod config;
pub mod connection;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod keys;
pub mod provision;
pub mod session;
pub mod state;
pub mod submit;

pub use address::*;
pub use config::*;
pub use connection::*;
pub use constants::*;
pub use error::{GreeterError, GreeterResult};
pub use instruction::*;
pub use keys::*;
pub use provision::*;
pub use session::*;
pub use state::*;
pub use submit::*;
