//! Transport seam between the greeter components and the network.
//!
//! Components take `&impl GreeterConnection`, so tests can swap in an
//! in-memory ledger and the CLI uses [`RpcConnection`].

use async_trait::async_trait;
use futures::StreamExt;
use solana_client::nonblocking::pubsub_client::PubsubClient;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSignatureSubscribeConfig;
use solana_client::rpc_response::{Response as RpcResponse, RpcSignatureResult};
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::config::{validate_config, ClientConfig};
use crate::error::{GreeterError, GreeterResult};

#[async_trait]
pub trait GreeterConnection: Send + Sync {
    /// Account at `pubkey`, or `None` when no account exists there.
    async fn get_account(&self, pubkey: &Pubkey) -> GreeterResult<Option<Account>>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> GreeterResult<u64>;

    async fn get_latest_blockhash(&self) -> GreeterResult<Hash>;

    /// Send a signed transaction and wait until the network reports it
    /// confirmed. Rejections surface as [`GreeterError::Submission`].
    async fn send_and_confirm_transaction(&self, tx: &Transaction) -> GreeterResult<Signature>;
}

/// JSON-RPC backed connection, with websocket confirmations when configured.
pub struct RpcConnection {
    rpc: RpcClient,
    rpc_url: String,
    ws_url: Option<String>,
    commitment: CommitmentConfig,
}

impl RpcConnection {
    pub fn new(cfg: &ClientConfig) -> GreeterResult<Self> {
        validate_config(cfg)?;
        let commitment = cfg.commitment_config()?;
        Ok(Self {
            rpc: RpcClient::new_with_commitment(cfg.rpc_url.clone(), commitment),
            rpc_url: cfg.rpc_url.clone(),
            ws_url: cfg.ws_url.clone(),
            commitment,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn ws_url(&self) -> Option<&str> {
        self.ws_url.as_deref()
    }

    /// Subscribe to the signature before sending so the notification cannot
    /// be missed, then wait for the processed result.
    async fn send_and_confirm_ws(&self, ws_url: &str, tx: &Transaction) -> GreeterResult<Signature> {
        let signature = tx.signatures.first().copied().unwrap_or_default();
        let pubsub = PubsubClient::new(ws_url)
            .await
            .map_err(|e| GreeterError::network(format!("websocket connect {ws_url}: {e}")))?;

        let config = RpcSignatureSubscribeConfig {
            commitment: Some(self.commitment),
            enable_received_notification: Some(false),
        };
        let (mut notifications, unsubscribe) = pubsub
            .signature_subscribe(&signature, Some(config))
            .await
            .map_err(|e| GreeterError::network(format!("signature subscribe: {e}")))?;

        let sent = self
            .rpc
            .send_transaction(tx)
            .await
            .map_err(|e| GreeterError::submission(e.to_string()));

        let outcome = match sent {
            Ok(sig) => {
                tracing::debug!(%sig, "transaction sent, awaiting notification");
                confirmation_outcome(sig, notifications.next().await)
            }
            Err(e) => Err(e),
        };

        drop(notifications);
        unsubscribe().await;
        if let Err(e) = pubsub.shutdown().await {
            tracing::debug!(error = %e, "websocket shutdown failed");
        }
        outcome
    }
}

/// Map the first signature notification to the confirmation result.
fn confirmation_outcome(
    sig: Signature,
    notification: Option<RpcResponse<RpcSignatureResult>>,
) -> GreeterResult<Signature> {
    match notification {
        Some(resp) => match resp.value {
            RpcSignatureResult::ProcessedSignature(processed) => match processed.err {
                None => Ok(sig),
                Some(err) => Err(GreeterError::submission(format!("{err:?}"))),
            },
            RpcSignatureResult::ReceivedSignature(_) => Ok(sig),
        },
        None => Err(GreeterError::network("signature subscription closed before confirmation")),
    }
}

#[async_trait]
impl GreeterConnection for RpcConnection {
    async fn get_account(&self, pubkey: &Pubkey) -> GreeterResult<Option<Account>> {
        tracing::debug!(%pubkey, "getAccountInfo");
        let resp = self
            .rpc
            .get_account_with_commitment(pubkey, self.commitment)
            .await
            .map_err(|e| GreeterError::network(e.to_string()))?;
        Ok(resp.value)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> GreeterResult<u64> {
        tracing::debug!(data_len, "getMinimumBalanceForRentExemption");
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|e| GreeterError::network(e.to_string()))
    }

    async fn get_latest_blockhash(&self) -> GreeterResult<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| GreeterError::network(e.to_string()))
    }

    async fn send_and_confirm_transaction(&self, tx: &Transaction) -> GreeterResult<Signature> {
        match &self.ws_url {
            Some(ws_url) => self.send_and_confirm_ws(ws_url, tx).await,
            None => self
                .rpc
                .send_and_confirm_transaction(tx)
                .await
                .map_err(|e| GreeterError::submission(e.to_string())),
        }
    }
}
