use std::time::Duration;

use anyhow::Result;
use greeter_client::{GreeterConnection, GreeterSession, SessionState};
use indicatif::{ProgressBar, ProgressStyle};

use crate::args::{Cli, Command};
use crate::context::Context;
use crate::output;

mod address;
mod counter;
mod doctor;
mod greet;
mod provision;
mod run;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli)?;
    tracing::debug!(
        cluster = ctx.cluster.as_str(),
        rpc_url = %ctx.config.rpc_url,
        ws_url = ?ctx.config.ws_url,
        commitment = %ctx.config.commitment,
        "resolved configuration"
    );
    match cli.command {
        Command::Address => address::run(&ctx),
        Command::Provision => provision::run(&ctx).await,
        Command::Greet => greet::run(&ctx).await,
        Command::Counter => counter::run(&ctx).await,
        Command::Run => run::run(&ctx).await,
        Command::Doctor => doctor::run(&ctx).await,
    }
}

/// Spinner on stderr that follows the session's state; hidden in JSON mode.
pub(crate) fn attach_spinner<C: GreeterConnection>(session: &mut GreeterSession<C>) -> ProgressBar {
    let pb = if output::is_json() { ProgressBar::hidden() } else { ProgressBar::new_spinner() };
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    pb.enable_steady_tick(Duration::from_millis(120));

    let observed = pb.clone();
    session.on_state_change(move |snap| {
        let msg = match &snap.state {
            SessionState::Uninitialized => "Starting...",
            SessionState::AddressKnown if snap.in_flight => "Checking greeting account...",
            SessionState::AddressKnown => "Greeting address derived",
            SessionState::AccountReady => "Greeting account ready",
            SessionState::GreetingSent => "Transaction initiated. Waiting for confirmations...",
            SessionState::GreetingConfirmed => "Greeting confirmed",
            SessionState::Failed { .. } => "Failed",
        };
        observed.set_message(msg);
    });
    pb
}
