use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use greeter_client::{
    validate_config, ClientConfig, Cluster, GreeterSession, KeyMaterial, KeypairFileSecrets, RpcConnection,
};

use crate::args::Cli;

/// Everything a command needs, resolved from flags and environment.
pub struct Context {
    pub cluster: Cluster,
    pub config: ClientConfig,
    pub payer_path: Option<PathBuf>,
    pub program_path: Option<PathBuf>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cluster: Cluster = cli.cluster.parse()?;
        let mut config = ClientConfig::for_cluster(cluster);
        if let Some(rpc) = &cli.rpc_url {
            config.rpc_url = rpc.clone();
        }
        if let Some(ws) = &cli.ws_url {
            config.ws_url = Some(ws.clone());
        }
        if cli.no_ws {
            config.ws_url = None;
        }
        config.commitment = cli.commitment.clone();
        config.seed = cli.seed.clone();
        validate_config(&config)?;

        Ok(Self {
            cluster,
            config,
            payer_path: cli.payer.clone(),
            program_path: cli.program.clone(),
        })
    }

    pub fn secrets(&self) -> Result<KeypairFileSecrets> {
        let payer = self
            .payer_path
            .clone()
            .ok_or_else(|| anyhow!("missing payer keypair (use --payer or GREETER_PAYER_KEYPAIR)"))?;
        let program = self
            .program_path
            .clone()
            .ok_or_else(|| anyhow!("missing program keypair (use --program or GREETER_PROGRAM_KEYPAIR)"))?;
        Ok(KeypairFileSecrets::new(payer, program))
    }

    pub fn keys(&self) -> Result<KeyMaterial> {
        let secrets = self.secrets()?;
        KeyMaterial::load(&secrets).context("load key material")
    }

    pub fn session(&self) -> Result<GreeterSession<RpcConnection>> {
        let keys = self.keys()?;
        let connection = RpcConnection::new(&self.config).context("connect")?;
        Ok(GreeterSession::new(Arc::new(connection), keys, self.config.seed.clone()))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn no_ws_wins_over_ws_url() {
        let cli = Cli::try_parse_from(["greeter", "--ws-url", "ws://127.0.0.1:1", "--no-ws", "address"]).unwrap();
        let ctx = Context::from_cli(&cli).unwrap();
        assert!(ctx.config.ws_url.is_none());
    }

    #[test]
    fn ws_url_flag_overrides_cluster_default() {
        let cli = Cli::try_parse_from(["greeter", "--ws-url", "ws://127.0.0.1:1", "address"]).unwrap();
        let ctx = Context::from_cli(&cli).unwrap();
        assert_eq!(ctx.config.ws_url.as_deref(), Some("ws://127.0.0.1:1"));
    }
}
