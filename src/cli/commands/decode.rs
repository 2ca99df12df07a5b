use super::OutputFormat;
use crate::decoder::{decode_script_hex, decode_transaction_data};
use crate::errors::AppResult;
use crate::types::RawTransaction;
use clap::Args;
use tracing::info;

/// Decode a hex-encoded OP_RETURN script without fetching anything
#[derive(Args)]
pub struct DecodeScriptCommand {
    /// Script hex, starting with 6a
    pub script_hex: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl DecodeScriptCommand {
    pub async fn run(&self) -> AppResult<()> {
        let payload = decode_script_hex(&self.script_hex)?;
        info!(
            "Decoded {} elements into {} records",
            payload.element_count,
            payload.records.len()
        );
        self.format.print_payload(&payload)
    }
}

/// Decode the OP_RETURN data of a raw consensus-encoded transaction
#[derive(Args)]
pub struct DecodeRawTxCommand {
    /// Raw transaction hex
    pub tx_hex: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl DecodeRawTxCommand {
    pub async fn run(&self) -> AppResult<()> {
        let tx = RawTransaction::from_consensus_hex(&self.tx_hex)?;
        info!("Parsed transaction {} with {} outputs", tx.txid, tx.outputs.len());

        self.format.print_decoded(decode_transaction_data(&tx))
    }
}
