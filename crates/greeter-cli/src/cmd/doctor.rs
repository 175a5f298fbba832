use anyhow::Result;
use greeter_client::{derive_address, GreeterConnection, RpcConnection, GREETING_SIZE};
use serde::Serialize;

use crate::context::Context;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

impl Check {
    fn new(name: &str, ok: bool, detail: impl Into<String>) -> Self {
        Self { name: name.to_string(), ok, detail: detail.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub cluster: String,
    pub rpc_url: String,
    pub ws_url: Option<String>,
    pub checks: Vec<Check>,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut checks = vec![Check::new(
        "config",
        true,
        format!("commitment {}, seed {:?}", ctx.config.commitment, ctx.config.seed),
    )];

    let keys = match ctx.keys() {
        Ok(keys) => {
            checks.push(Check::new(
                "keys",
                true,
                format!("payer {}, program {}", keys.payer_pubkey(), keys.program_id()),
            ));
            Some(keys)
        }
        Err(e) => {
            checks.push(Check::new("keys", false, format!("{e:#}")));
            None
        }
    };

    match RpcConnection::new(&ctx.config) {
        Ok(conn) => {
            let reachable = match conn.get_latest_blockhash().await {
                Ok(hash) => {
                    checks.push(Check::new("rpc", true, format!("latest blockhash {hash}")));
                    true
                }
                Err(e) => {
                    checks.push(Check::new("rpc", false, e.to_string()));
                    false
                }
            };

            // Informational: a missing account is created by `provision`.
            if let (true, Some(keys)) = (reachable, &keys) {
                let check = match derive_address(&keys.payer_pubkey(), &ctx.config.seed, &keys.program_id()) {
                    Ok(address) => match conn.get_account(&address).await {
                        Ok(Some(acct)) if acct.owner == keys.program_id() && acct.data.len() == GREETING_SIZE => {
                            Check::new("greeting_account", true, format!("{address} provisioned"))
                        }
                        Ok(Some(acct)) => Check::new(
                            "greeting_account",
                            false,
                            format!("{address} has owner {} and {} bytes", acct.owner, acct.data.len()),
                        ),
                        Ok(None) => Check::new("greeting_account", true, format!("{address} not provisioned yet")),
                        Err(e) => Check::new("greeting_account", false, e.to_string()),
                    },
                    Err(e) => Check::new("greeting_account", false, e.to_string()),
                };
                checks.push(check);
            }
        }
        Err(e) => checks.push(Check::new("rpc", false, e.to_string())),
    }

    let ok = checks.iter().all(|c| c.ok);
    output::print(&DoctorOut {
        ok,
        cluster: ctx.cluster.as_str().to_string(),
        rpc_url: ctx.config.rpc_url.clone(),
        ws_url: ctx.config.ws_url.clone(),
        checks,
    })?;
    if ok {
        output::success_line("All checks passed");
    }
    Ok(())
}
