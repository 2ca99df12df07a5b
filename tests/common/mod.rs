//! Common Test Utilities
//!
//! Script and transaction builders shared by the unit and integration trees.

#![allow(dead_code)]

use bitcoin::{
    absolute, transaction, Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut,
    Witness,
};
use bitcom_peek::decoder::pushdata::build_data_carrier_script;
use bitcom_peek::types::{RawOutput, RawTransaction};

/// A pay-to-pubkey-hash script with a zero hash
pub fn p2pkh_script() -> Vec<u8> {
    let mut script = vec![0x76, 0xa9, 0x14];
    script.extend_from_slice(&[0u8; 20]);
    script.extend_from_slice(&[0x88, 0xac]);
    script
}

/// OP_RETURN script pushing each element with the smallest push opcode
pub fn op_return(elements: &[&[u8]]) -> Vec<u8> {
    build_data_carrier_script(elements)
}

/// Backend-neutral transaction with one output per script, in order
pub fn raw_transaction(scripts: Vec<Vec<u8>>) -> RawTransaction {
    RawTransaction {
        txid: "00".repeat(32),
        outputs: scripts
            .into_iter()
            .enumerate()
            .map(|(n, script_pubkey)| RawOutput {
                vout: n as u32,
                script_pubkey,
            })
            .collect(),
    }
}

/// Legacy-serialised transaction with a single null input
pub fn bitcoin_transaction(scripts: Vec<Vec<u8>>) -> Transaction {
    Transaction {
        version: transaction::Version::ONE,
        lock_time: absolute::LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: scripts
            .into_iter()
            .map(|script| TxOut {
                value: Amount::ZERO,
                script_pubkey: ScriptBuf::from_bytes(script),
            })
            .collect(),
    }
}
