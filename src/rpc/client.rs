use crate::config::BitcoinRpcConfig;
use crate::errors::{FetchError, FetchResult};
use crate::rpc::retry::{execute_with_timeout, retry_fetch, RetryPolicy};
use crate::types::RawTransaction;
use corepc_client::bitcoin::Txid;
use corepc_client::client_sync::{v28::Client, Auth};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Node error messages that mean the transaction does not exist
const NOT_FOUND_MESSAGES: &[&str] = &[
    "No such mempool or blockchain transaction",
    "Invalid or non-wallet transaction id",
];

/// Chain summary reported by a connection test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    pub chain: String,
    pub blocks: i64,
}

/// Bitcoin Core compatible JSON-RPC client with retry logic
///
/// The underlying client is synchronous; every call runs on the blocking pool
/// under the configured timeout.
#[derive(Clone)]
pub struct BitcoinRpcClient {
    client: Arc<Client>,
    config: BitcoinRpcConfig,
}

impl BitcoinRpcClient {
    /// Create a client. No request is made until the first call.
    pub fn new(config: BitcoinRpcConfig) -> FetchResult<Self> {
        let client = Self::create_sync_client(&config)?;
        debug!("Bitcoin RPC client configured for {}", config.url);
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BitcoinRpcConfig {
        &self.config
    }

    /// Fetch a transaction by txid via `getrawtransaction`
    pub async fn get_transaction(&self, txid: &str) -> FetchResult<RawTransaction> {
        let tx_hash = Txid::from_str(txid).map_err(|_| FetchError::InvalidTxid {
            txid: txid.to_string(),
        })?;

        let policy = RetryPolicy::from(&self.config);
        let operation = format!("get_transaction({})", txid);

        retry_fetch(&policy, &operation, || {
            let client = Arc::clone(&self.client);
            let txid = txid.to_string();
            execute_with_timeout(
                self.config.timeout_seconds,
                &operation,
                move || -> FetchResult<RawTransaction> {
                    let raw_result = client.get_raw_transaction(tx_hash).map_err(|e| {
                        let message = e.to_string();
                        if NOT_FOUND_MESSAGES.iter().any(|m| message.contains(m)) {
                            FetchError::TransactionNotFound { txid: txid.clone() }
                        } else {
                            FetchError::CallFailed {
                                method: "get_raw_transaction".to_string(),
                                message,
                            }
                        }
                    })?;

                    RawTransaction::from_consensus_hex(&raw_result.0).map_err(|e| {
                        FetchError::DeserialisationFailed(format!(
                            "Failed to deserialise raw transaction {}: {}",
                            txid, e
                        ))
                    })
                },
            )
        })
        .await
    }

    /// Check that the node answers `getblockchaininfo`
    pub async fn test_connection(&self) -> FetchResult<ChainSummary> {
        let client = Arc::clone(&self.client);

        let summary = execute_with_timeout(
            self.config.timeout_seconds,
            "connection_test",
            move || -> FetchResult<ChainSummary> {
                let info = client
                    .get_blockchain_info()
                    .map_err(|e| FetchError::CallFailed {
                        method: "get_blockchain_info".to_string(),
                        message: e.to_string(),
                    })?;
                Ok(ChainSummary {
                    chain: info.chain,
                    blocks: info.blocks,
                })
            },
        )
        .await?;

        info!(
            "Bitcoin RPC connection test successful - chain: {}, blocks: {}",
            summary.chain, summary.blocks
        );
        Ok(summary)
    }

    fn create_sync_client(config: &BitcoinRpcConfig) -> FetchResult<Arc<Client>> {
        let auth = Auth::UserPass(config.username.clone(), config.password.clone());
        let client = Client::new_with_auth(&config.url, auth).map_err(|e| {
            FetchError::ConnectionFailed(format!("Failed to create Bitcoin RPC client: {}", e))
        })?;

        Ok(Arc::new(client))
    }
}
