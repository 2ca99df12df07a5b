pub mod decode;
pub mod peek;
pub mod test_rpc;

use crate::config::BitcoinRpcConfig;
use crate::decoder::report;
use crate::decoder::{DecodedPayload, DecodedTransaction, DecoderError, DecoderResult};
use crate::errors::AppResult;
use clap::{Args, ValueEnum};

/// Output format for decoded data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Printed when a transaction has no OP_RETURN output
pub const NO_DATA_MESSAGE: &str = "Transaction does not contain any OP_RETURN data";

impl OutputFormat {
    /// Print a decode result. A missing OP_RETURN output is reported on
    /// stdout and then returned as an error so the process exits non-zero.
    pub(crate) fn print_decoded(
        &self,
        result: DecoderResult<DecodedTransaction>,
    ) -> AppResult<()> {
        match result {
            Ok(decoded) => self.print_transaction(&decoded),
            Err(DecoderError::NoDataCarrierOutput { txid }) => {
                tracing::info!("No OP_RETURN output in {}", txid);
                match self {
                    Self::Text => println!("{}", NO_DATA_MESSAGE),
                    Self::Json => println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "txid": &txid,
                            "vout": null,
                            "message": NO_DATA_MESSAGE,
                        }))?
                    ),
                }
                Err(DecoderError::NoDataCarrierOutput { txid }.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn print_transaction(&self, decoded: &DecodedTransaction) -> AppResult<()> {
        match self {
            Self::Text => println!("{}", report::render_text(decoded)),
            Self::Json => println!(
                "{}",
                serde_json::to_string_pretty(&report::render_json(decoded))?
            ),
        }
        Ok(())
    }

    pub(crate) fn print_payload(&self, payload: &DecodedPayload) -> AppResult<()> {
        match self {
            Self::Text => println!("{}", report::render_payload_text(payload)),
            Self::Json => println!(
                "{}",
                serde_json::to_string_pretty(&report::payload_json(payload))?
            ),
        }
        Ok(())
    }
}

/// Bitcoin Core RPC connection flags (override config.toml)
#[derive(Args, Debug, Clone, Default)]
pub struct RpcArgs {
    /// Bitcoin RPC username
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Bitcoin RPC password
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Bitcoin RPC URL
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Use the local mainnet port (default is testnet)
    #[arg(short = 'm', long)]
    pub mainnet: bool,
}

impl RpcArgs {
    /// Apply the flags on top of a loaded configuration
    ///
    /// `--rpc-url` wins over `--mainnet`, which wins over the configured URL.
    pub fn apply(&self, mut config: BitcoinRpcConfig) -> BitcoinRpcConfig {
        if let Some(url) = &self.rpc_url {
            config.url = url.clone();
        } else if self.mainnet {
            config.url = BitcoinRpcConfig::local_url(true);
        }
        if let Some(user) = &self.user {
            config.username = user.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        config
    }
}
