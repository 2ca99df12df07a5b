use super::{OutputFormat, RpcArgs};
use crate::config::AppConfig;
use crate::decoder::decode_transaction_data;
use crate::errors::{AppError, AppResult};
use crate::rpc::{BitcoinRpcClient, TransactionSource, WhatsOnChainClient, WocNetwork};
use clap::Args;
use tracing::{error, info};

/// Fetch a transaction and show its Bitcom OP_RETURN data
#[derive(Args)]
pub struct PeekCommand {
    /// Transaction ID to decode
    pub txid: String,

    /// Get transaction data from whatsonchain.com instead of a local node
    #[arg(short = 'w', long, value_enum)]
    pub whatsonchain: Option<WocNetwork>,

    #[command(flatten)]
    pub rpc: RpcArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PeekCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = AppConfig::get_defaults().map_err(|e| AppError::Config(e.to_string()))?;
        let source = self.source(config)?;

        let tx = source.fetch_transaction(&self.txid).await.map_err(|e| {
            error!("Failed to fetch transaction {}: {}", self.txid, e);
            e
        })?;

        let result = decode_transaction_data(&tx);
        if let Ok(decoded) = &result {
            info!(
                "Transaction {} output {}: {} elements",
                decoded.txid, decoded.vout, decoded.payload.element_count
            );
        }

        self.format.print_decoded(result)
    }

    fn source(&self, config: AppConfig) -> AppResult<TransactionSource> {
        let source = match self.whatsonchain {
            Some(network) => TransactionSource::WhatsOnChain(WhatsOnChainClient::new(
                config.whatsonchain,
                network,
            )?),
            None => TransactionSource::Rpc(BitcoinRpcClient::new(
                self.rpc.apply(config.bitcoin_rpc),
            )?),
        };
        info!("Using {}", source.describe());
        Ok(source)
    }
}
