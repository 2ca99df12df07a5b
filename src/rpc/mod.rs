//! Transaction fetch backends
//!
//! - **Client** - Bitcoin Core compatible JSON-RPC client with retry logic
//! - **WhatsOnChain** - REST client for the public BSV explorer API
//! - **Retry** - Exponential backoff retry utilities and timeout wrappers
//!
//! [`TransactionSource`] selects one backend per run and returns transactions
//! in the backend-neutral [`RawTransaction`] shape.

pub mod client;
pub mod retry;
pub mod whatsonchain;

pub use client::{BitcoinRpcClient, ChainSummary};
pub use retry::{calculate_next_backoff, execute_with_timeout, retry_fetch, RetryPolicy};
pub use whatsonchain::{WhatsOnChainClient, WocNetwork};

use crate::errors::FetchResult;
use crate::types::RawTransaction;
use tracing::info;

/// Where transactions are fetched from
pub enum TransactionSource {
    Rpc(BitcoinRpcClient),
    WhatsOnChain(WhatsOnChainClient),
}

impl TransactionSource {
    /// Fetch a transaction by txid from the selected backend
    pub async fn fetch_transaction(&self, txid: &str) -> FetchResult<RawTransaction> {
        info!("Fetching transaction {} from {}", txid, self.describe());
        match self {
            Self::Rpc(client) => client.get_transaction(txid).await,
            Self::WhatsOnChain(client) => client.get_transaction(txid).await,
        }
    }

    /// Short backend description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Rpc(client) => format!("Bitcoin RPC at {}", client.config().url),
            Self::WhatsOnChain(client) => format!("WhatsOnChain ({})", client.network()),
        }
    }
}
