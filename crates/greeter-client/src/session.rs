//! Greeter session: the explicit context a presentation layer drives.
//!
//! A session owns the key material and a shared connection, and walks the
//! state machine
//!
//! ```text
//! Uninitialized -> AddressKnown -> AccountReady -> GreetingSent -> GreetingConfirmed
//! ```
//!
//! with `Failed` reachable from any step. A failed step is retried by calling
//! it again; preconditions are checked against what the session already knows
//! (address, account readiness), so retrying never repeats earlier steps.
//!
//! Observers registered with [`GreeterSession::on_state_change`] receive a
//! [`SessionSnapshot`] after every transition and in-flight change.

use std::fmt;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::address::derive_address;
use crate::connection::GreeterConnection;
use crate::constants::GREETING_SIZE;
use crate::error::{GreeterError, GreeterResult};
use crate::instruction::build_greet;
use crate::keys::KeyMaterial;
use crate::provision::{ensure_account, read_greeting, ProvisionOutcome};
use crate::state::GreetingAccountState;
use crate::submit::submit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    DeriveAddress,
    EnsureAccount,
    Greet,
    ReadCounter,
}

impl SessionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeriveAddress => "derive_address",
            Self::EnsureAccount => "ensure_account",
            Self::Greet => "greet",
            Self::ReadCounter => "read_counter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    AddressKnown,
    AccountReady,
    GreetingSent,
    GreetingConfirmed,
    Failed { step: SessionStep, reason: String },
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::AddressKnown => "address_known",
            Self::AccountReady => "account_ready",
            Self::GreetingSent => "greeting_sent",
            Self::GreetingConfirmed => "greeting_confirmed",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Presentation-facing view of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub payer: Pubkey,
    pub program_id: Pubkey,
    pub greeting_address: Option<Pubkey>,
    pub last_signature: Option<Signature>,
    pub last_counter: Option<u32>,
    pub in_flight: bool,
}

type Observer = Box<dyn Fn(&SessionSnapshot) + Send + Sync>;

/// Outcome of one greet round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetReceipt {
    pub signature: Signature,
    pub counter: u32,
}

/// Outcome of [`GreeterSession::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub greeting_address: Pubkey,
    pub provision: ProvisionOutcome,
    pub greet: GreetReceipt,
}

pub struct GreeterSession<C: GreeterConnection> {
    connection: Arc<C>,
    keys: KeyMaterial,
    seed: String,
    state: SessionState,
    greeting_address: Option<Pubkey>,
    account_ready: bool,
    last_signature: Option<Signature>,
    last_counter: Option<u32>,
    in_flight: bool,
    observers: Vec<Observer>,
}

impl<C: GreeterConnection> GreeterSession<C> {
    pub fn new(connection: Arc<C>, keys: KeyMaterial, seed: impl Into<String>) -> Self {
        Self {
            connection,
            keys,
            seed: seed.into(),
            state: SessionState::Uninitialized,
            greeting_address: None,
            account_ready: false,
            last_signature: None,
            last_counter: None,
            in_flight: false,
            observers: Vec::new(),
        }
    }

    pub fn on_state_change<F>(&mut self, observer: F)
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn connection(&self) -> &Arc<C> {
        &self.connection
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            payer: self.keys.payer_pubkey(),
            program_id: self.keys.program_id(),
            greeting_address: self.greeting_address,
            last_signature: self.last_signature,
            last_counter: self.last_counter,
            in_flight: self.in_flight,
        }
    }

    /// Compute the greeting account address. Pure; safe to call repeatedly.
    pub fn derive_address(&mut self) -> GreeterResult<Pubkey> {
        let result = derive_address(&self.keys.payer_pubkey(), &self.seed, &self.keys.program_id());
        match result {
            Ok(address) => {
                self.greeting_address = Some(address);
                if !self.account_ready {
                    self.transition(SessionState::AddressKnown);
                }
                Ok(address)
            }
            Err(e) => Err(self.fail(SessionStep::DeriveAddress, e)),
        }
    }

    /// Find or create the greeting account.
    pub async fn ensure_account(&mut self) -> GreeterResult<ProvisionOutcome> {
        let address = self.require_address(SessionStep::EnsureAccount)?;
        self.set_in_flight(true);
        let result = ensure_account(
            self.connection.as_ref(),
            self.keys.payer(),
            &self.seed,
            &address,
            &self.keys.program_id(),
            GREETING_SIZE,
        )
        .await;
        self.in_flight = false;

        match result {
            Ok(outcome) => {
                self.account_ready = true;
                self.transition(SessionState::AccountReady);
                Ok(outcome)
            }
            Err(e) => Err(self.fail(SessionStep::EnsureAccount, e)),
        }
    }

    /// Send one greeting, wait for confirmation, then read the counter back.
    pub async fn greet(&mut self) -> GreeterResult<GreetReceipt> {
        let address = self.require_address(SessionStep::Greet)?;
        if !self.account_ready {
            return Err(GreeterError::NotReady(
                "greeting account has not been provisioned in this session".to_string(),
            ));
        }

        let ix = build_greet(&self.keys.program_id(), &address);
        self.in_flight = true;
        self.transition(SessionState::GreetingSent);

        let sent = submit(self.connection.as_ref(), &[ix], &[self.keys.payer()]).await;
        self.in_flight = false;
        let signature = match sent {
            Ok(sig) => sig,
            Err(e) => return Err(self.fail(SessionStep::Greet, e)),
        };
        self.last_signature = Some(signature);
        self.transition(SessionState::GreetingConfirmed);

        let state = self.refresh_counter().await?;
        Ok(GreetReceipt { signature, counter: state.counter })
    }

    /// Re-read the counter without greeting.
    pub async fn refresh_counter(&mut self) -> GreeterResult<GreetingAccountState> {
        let address = self.require_address(SessionStep::ReadCounter)?;
        match read_greeting(self.connection.as_ref(), &address, &self.keys.program_id()).await {
            Ok(state) => {
                self.last_counter = Some(state.counter);
                self.notify();
                Ok(state)
            }
            Err(e) => Err(self.fail(SessionStep::ReadCounter, e)),
        }
    }

    /// Run the whole flow once: derive, provision, greet.
    pub async fn run(&mut self) -> GreeterResult<RunReport> {
        let greeting_address = self.derive_address()?;
        let provision = self.ensure_account().await?;
        let greet = self.greet().await?;
        Ok(RunReport { greeting_address, provision, greet })
    }

    fn require_address(&self, step: SessionStep) -> GreeterResult<Pubkey> {
        self.greeting_address.ok_or_else(|| {
            GreeterError::NotReady(format!("{} requires the greeting address to be derived first", step.as_str()))
        })
    }

    fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
        self.notify();
    }

    fn transition(&mut self, next: SessionState) {
        tracing::info!(from = self.state.label(), to = next.label(), "session transition");
        self.state = next;
        self.notify();
    }

    fn fail(&mut self, step: SessionStep, err: GreeterError) -> GreeterError {
        self.in_flight = false;
        self.transition(SessionState::Failed { step, reason: err.to_string() });
        err
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snap = self.snapshot();
        for observer in &self.observers {
            observer(&snap);
        }
    }
}

impl<C: GreeterConnection> fmt::Debug for GreeterSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreeterSession")
            .field("keys", &self.keys)
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("greeting_address", &self.greeting_address)
            .field("last_counter", &self.last_counter)
            .finish_non_exhaustive()
    }
}
