use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cmd::attach_spinner;
use crate::context::Context;
use crate::explorer;
use crate::output;

#[derive(Debug, Serialize)]
pub struct RunOut {
    pub payer: String,
    pub program_id: String,
    pub greeting_address: String,
    pub created: bool,
    pub signature: String,
    pub counter: u32,
    pub explorer: String,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let pb = attach_spinner(&mut session);
    let report = session.run().await;
    pb.finish_and_clear();
    let report = report.with_context(|| format!("session stopped in state {}", session.state().label()))?;

    let snap = session.snapshot();
    let signature = report.greet.signature.to_string();
    output::print(&RunOut {
        payer: snap.payer.to_string(),
        program_id: snap.program_id.to_string(),
        greeting_address: report.greeting_address.to_string(),
        created: report.provision.created(),
        explorer: explorer::tx_url(ctx.cluster, &ctx.config.rpc_url, &signature)?,
        signature,
        counter: report.greet.counter,
    })?;
    output::success_line(&format!("Greeted {} time(s)", report.greet.counter));
    Ok(())
}
