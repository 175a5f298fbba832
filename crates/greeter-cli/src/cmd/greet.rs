use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use crate::cmd::attach_spinner;
use crate::context::Context;
use crate::explorer;
use crate::output;

#[derive(Debug, Serialize)]
pub struct GreetOut {
    pub greeting_address: String,
    pub signature: String,
    pub counter: u32,
    pub explorer: String,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let pb = attach_spinner(&mut session);

    let address = session.derive_address()?;
    if let Err(e) = session.refresh_counter().await {
        pb.finish_and_clear();
        if e.is_not_provisioned() {
            bail!("greeting account {address} does not exist; run `greeter provision` first");
        }
        return Err(e).context("read greeting account");
    }

    let result = async {
        session.ensure_account().await?;
        session.greet().await
    }
    .await;
    pb.finish_and_clear();
    let receipt = result.context("greet")?;

    let signature = receipt.signature.to_string();
    output::print(&GreetOut {
        greeting_address: address.to_string(),
        explorer: explorer::tx_url(ctx.cluster, &ctx.config.rpc_url, &signature)?,
        signature,
        counter: receipt.counter,
    })?;
    output::success_line(&format!("Greeted {} time(s)", receipt.counter));
    Ok(())
}
