//! Solana Explorer links for accounts and transactions.

use greeter_client::Cluster;
use url::Url;

const EXPLORER_BASE: &str = "https://explorer.solana.com/";

fn link(kind: &str, id: &str, cluster: Cluster, rpc_url: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(EXPLORER_BASE)?.join(&format!("{kind}/{id}"))?;
    match cluster {
        Cluster::MainnetBeta => {}
        Cluster::Devnet | Cluster::Testnet => {
            url.query_pairs_mut().append_pair("cluster", cluster.as_str());
        }
        Cluster::Localnet => {
            url.query_pairs_mut().append_pair("cluster", "custom").append_pair("customUrl", rpc_url);
        }
    }
    Ok(url.into())
}

pub fn account_url(cluster: Cluster, rpc_url: &str, address: &str) -> Result<String, url::ParseError> {
    link("address", address, cluster, rpc_url)
}

pub fn tx_url(cluster: Cluster, rpc_url: &str, signature: &str) -> Result<String, url::ParseError> {
    link("tx", signature, cluster, rpc_url)
}
