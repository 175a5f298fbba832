use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::context::Context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct CounterOut {
    pub greeting_address: String,
    pub counter: u32,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let address = session.derive_address()?;
    let state = session
        .refresh_counter()
        .await
        .with_context(|| format!("read greeting account {address}"))?;

    output::print(&CounterOut { greeting_address: address.to_string(), counter: state.counter })?;
    output::success_line(&format!("{address} has been greeted {} time(s)", state.counter));
    Ok(())
}
