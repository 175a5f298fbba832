use anyhow::Result;
use greeter_client::derive_address;
use serde::Serialize;

use crate::context::Context;
use crate::explorer;
use crate::output;

#[derive(Debug, Serialize)]
pub struct AddressOut {
    pub payer: String,
    pub program_id: String,
    pub seed: String,
    pub greeting_address: String,
    pub explorer: String,
}

/// Offline: only reads the keypair files.
pub fn run(ctx: &Context) -> Result<()> {
    let keys = ctx.keys()?;
    let payer = keys.payer_pubkey();
    let program_id = keys.program_id();
    let greeting = derive_address(&payer, &ctx.config.seed, &program_id)?.to_string();

    output::print(&AddressOut {
        payer: payer.to_string(),
        program_id: program_id.to_string(),
        seed: ctx.config.seed.clone(),
        explorer: explorer::account_url(ctx.cluster, &ctx.config.rpc_url, &greeting)?,
        greeting_address: greeting,
    })
}
