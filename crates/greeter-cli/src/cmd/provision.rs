use anyhow::{Context as _, Result};
use greeter_client::ProvisionOutcome;
use serde::Serialize;

use crate::cmd::attach_spinner;
use crate::context::Context;
use crate::explorer;
use crate::output;

#[derive(Debug, Serialize)]
pub struct ProvisionOut {
    pub greeting_address: String,
    pub created: bool,
    pub lamports: Option<u64>,
    pub signature: Option<String>,
    pub explorer: String,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let pb = attach_spinner(&mut session);

    let address = session.derive_address()?;
    let outcome = session.ensure_account().await.context("provision greeting account");
    pb.finish_and_clear();
    let outcome = outcome?;

    let (lamports, signature) = match &outcome {
        ProvisionOutcome::AlreadyProvisioned => (None, None),
        ProvisionOutcome::Created { signature, lamports } => (Some(*lamports), Some(signature.to_string())),
    };
    output::print(&ProvisionOut {
        greeting_address: address.to_string(),
        created: outcome.created(),
        lamports,
        signature,
        explorer: explorer::account_url(ctx.cluster, &ctx.config.rpc_url, &address.to_string())?,
    })?;

    if outcome.created() {
        output::success_line(&format!("Created greeting account {address}"));
    } else {
        output::success_line(&format!("Greeting account {address} already exists"));
    }
    Ok(())
}
