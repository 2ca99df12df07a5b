//! WhatsOnChain REST client
//!
//! Fetches verbose transaction JSON from
//! `{base_url}/{network}/tx/hash/{txid}` and normalises it into a
//! [`RawTransaction`].

use crate::config::WhatsOnChainConfig;
use crate::errors::{FetchError, FetchResult};
use crate::rpc::retry::{retry_fetch, RetryPolicy};
use crate::types::{RawTransaction, VerboseTransaction};
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// WhatsOnChain network selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WocNetwork {
    Main,
    Test,
    Stn,
}

impl WocNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Test => "test",
            Self::Stn => "stn",
        }
    }
}

impl fmt::Display for WocNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct WhatsOnChainClient {
    http: reqwest::Client,
    config: WhatsOnChainConfig,
    network: WocNetwork,
}

impl WhatsOnChainClient {
    pub fn new(config: WhatsOnChainConfig, network: WocNetwork) -> FetchResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                FetchError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            config,
            network,
        })
    }

    pub fn network(&self) -> WocNetwork {
        self.network
    }

    /// URL of the transaction lookup endpoint
    pub fn transaction_url(&self, txid: &str) -> String {
        format!(
            "{}/{}/tx/hash/{}",
            self.config.base_url.trim_end_matches('/'),
            self.network,
            txid
        )
    }

    /// Fetch a transaction by txid
    pub async fn get_transaction(&self, txid: &str) -> FetchResult<RawTransaction> {
        if txid.len() != 64 || !txid.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FetchError::InvalidTxid {
                txid: txid.to_string(),
            });
        }

        let url = self.transaction_url(txid);
        let policy = RetryPolicy::from(&self.config);
        let operation = format!("whatsonchain_get_transaction({})", txid);

        retry_fetch(&policy, &operation, || self.request(&url, txid)).await
    }

    async fn request(&self, url: &str, txid: &str) -> FetchResult<RawTransaction> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    timeout_seconds: self.config.timeout_seconds,
                    operation: format!("GET {}", url),
                }
            } else {
                FetchError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::TransactionNotFound {
                txid: txid.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::CallFailed {
                method: "GET tx/hash".to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;
        parse_transaction_json(&body)
    }
}

/// Parse a WhatsOnChain (or `getrawtransaction <txid> 1`) JSON document
pub fn parse_transaction_json(body: &str) -> FetchResult<RawTransaction> {
    let verbose: VerboseTransaction = serde_json::from_str(body).map_err(|e| {
        FetchError::DeserialisationFailed(format!("Unexpected transaction JSON: {}", e))
    })?;

    RawTransaction::try_from(verbose).map_err(|e| {
        FetchError::InvalidResponse(format!("Output script is not valid hex: {}", e))
    })
}
