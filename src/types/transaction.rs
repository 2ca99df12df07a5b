//! Transaction view consumed by the output locator
//!
//! Backends return transactions in different shapes (consensus bytes from
//! Bitcoin Core, verbose JSON from WhatsOnChain). Everything is normalised into
//! [`RawTransaction`]: a txid plus the ordered outputs with their raw
//! `scriptPubKey` bytes, which is all the decoder needs.

use bitcoin::consensus;
use serde::Deserialize;

/// A transaction reduced to its ordered outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub txid: String,
    pub outputs: Vec<RawOutput>,
}

/// One transaction output with its raw script bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub vout: u32,
    pub script_pubkey: Vec<u8>,
}

impl RawTransaction {
    /// Build from a consensus-encoded transaction hex string
    pub fn from_consensus_hex(tx_hex: &str) -> Result<Self, crate::decoder::DecoderError> {
        let bytes = hex::decode(tx_hex.trim())?;
        let transaction: bitcoin::Transaction = consensus::deserialize(&bytes)?;
        Ok(Self::from(&transaction))
    }
}

impl From<&bitcoin::Transaction> for RawTransaction {
    fn from(transaction: &bitcoin::Transaction) -> Self {
        Self {
            txid: transaction.compute_txid().to_string(),
            outputs: transaction
                .output
                .iter()
                .enumerate()
                .map(|(n, output)| RawOutput {
                    vout: n as u32,
                    script_pubkey: output.script_pubkey.to_bytes(),
                })
                .collect(),
        }
    }
}

/// Verbose transaction JSON as returned by WhatsOnChain and
/// `getrawtransaction <txid> 1`
#[derive(Debug, Clone, Deserialize)]
pub struct VerboseTransaction {
    pub txid: String,
    pub vout: Vec<VerboseOutput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerboseOutput {
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: VerboseScript,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerboseScript {
    pub hex: String,
}

impl TryFrom<VerboseTransaction> for RawTransaction {
    type Error = hex::FromHexError;

    fn try_from(verbose: VerboseTransaction) -> Result<Self, Self::Error> {
        let mut outputs = verbose
            .vout
            .into_iter()
            .map(|output| {
                Ok(RawOutput {
                    vout: output.n,
                    script_pubkey: hex::decode(&output.script_pub_key.hex)?,
                })
            })
            .collect::<Result<Vec<_>, hex::FromHexError>>()?;

        // Outputs are scanned in index order
        outputs.sort_by_key(|output| output.vout);

        Ok(Self {
            txid: verbose.txid,
            outputs,
        })
    }
}
