//! Configuration for the greeter client.
//!
//! The client itself does not read environment variables. All configuration
//! is provided explicitly by the caller (CLI, UI, tests).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use url::Url;

use crate::address::validate_seed;
use crate::constants::{DEFAULT_RPC_URL, DEFAULT_WS_URL, GREETING_SEED};
use crate::error::{GreeterError, GreeterResult};

/// Endpoint and derivation settings for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Streaming endpoint used for confirmation notifications. When unset,
    /// confirmation falls back to RPC status polling.
    #[serde(default)]
    pub ws_url: Option<String>,
    /// Commitment level: processed, confirmed or finalized.
    pub commitment: String,
    /// Seed for the greeting account address.
    pub seed: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            ws_url: Some(DEFAULT_WS_URL.to_string()),
            commitment: "confirmed".to_string(),
            seed: GREETING_SEED.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config for a well-known cluster name.
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            rpc_url: cluster.rpc_url().to_string(),
            ws_url: Some(cluster.ws_url().to_string()),
            ..Self::default()
        }
    }

    pub fn commitment_config(&self) -> GreeterResult<CommitmentConfig> {
        CommitmentConfig::from_str(&self.commitment)
            .map_err(|_| GreeterError::configuration(format!("unknown commitment: {}", self.commitment)))
    }
}

/// Well-known Solana clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    Localnet,
    Devnet,
    Testnet,
    MainnetBeta,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Localnet => "localnet",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::MainnetBeta => "mainnet-beta",
        }
    }

    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Localnet => DEFAULT_RPC_URL,
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }

    pub fn ws_url(&self) -> &'static str {
        match self {
            Self::Localnet => DEFAULT_WS_URL,
            Self::Devnet => "wss://api.devnet.solana.com",
            Self::Testnet => "wss://api.testnet.solana.com",
            Self::MainnetBeta => "wss://api.mainnet-beta.solana.com",
        }
    }
}

impl FromStr for Cluster {
    type Err = GreeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "localnet" | "localhost" | "local" => Ok(Self::Localnet),
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Self::MainnetBeta),
            other => Err(GreeterError::configuration(format!("unknown cluster: {other}"))),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> GreeterResult<()> {
    require_scheme("rpc_url", &cfg.rpc_url, &["http", "https"])?;
    if let Some(ws) = &cfg.ws_url {
        require_scheme("ws_url", ws, &["ws", "wss"])?;
    }
    cfg.commitment_config()?;
    validate_seed(&cfg.seed)?;
    Ok(())
}

fn require_scheme(field: &str, raw: &str, schemes: &[&str]) -> GreeterResult<()> {
    let url = Url::parse(raw).map_err(|e| GreeterError::configuration(format!("invalid {field} {raw:?}: {e}")))?;
    if !schemes.contains(&url.scheme()) {
        return Err(GreeterError::configuration(format!(
            "{field} must use one of {schemes:?}, got {}",
            url.scheme()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = ClientConfig::default();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.seed, "hello");
    }

    #[test]
    fn cluster_configs_are_valid() {
        for c in [Cluster::Localnet, Cluster::Devnet, Cluster::Testnet, Cluster::MainnetBeta] {
            validate_config(&ClientConfig::for_cluster(c)).unwrap();
            assert_eq!(c.as_str().parse::<Cluster>().unwrap(), c);
        }
    }

    #[test]
    fn wrong_schemes_detected() {
        let mut cfg = ClientConfig::default();
        cfg.rpc_url = "ws://127.0.0.1:8899".to_string();
        assert_matches!(validate_config(&cfg), Err(GreeterError::Configuration(_)));

        let mut cfg = ClientConfig::default();
        cfg.ws_url = Some("http://127.0.0.1:8900".to_string());
        assert!(validate_config(&cfg).is_err());

        let mut cfg = ClientConfig::default();
        cfg.ws_url = None;
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn bad_commitment_and_seed_detected() {
        let mut cfg = ClientConfig::default();
        cfg.commitment = "eventually".to_string();
        assert!(validate_config(&cfg).is_err());

        let mut cfg = ClientConfig::default();
        cfg.seed = String::new();
        assert_matches!(validate_config(&cfg), Err(GreeterError::InvalidSeed(_)));
    }

    #[test]
    fn unknown_cluster_rejected() {
        assert!("moonnet".parse::<Cluster>().is_err());
    }
}
