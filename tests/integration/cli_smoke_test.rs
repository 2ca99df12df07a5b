//! CLI Smoke Test
//!
//! Runs the offline subcommands of the built binary and checks their output
//! and exit status.

use bitcom_peek::decoder::registry::prefixes;
use std::process::Command;

use crate::common::{op_return, p2pkh_script};

fn bitcom_peek(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_bitcom-peek"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_decode_script_text() {
    let script = hex::encode(op_return(&[prefixes::D_PROTOCOL, b"k", b"v", b"txt", b"2"]));
    let output = bitcom_peek(&["decode-script", &script]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Number of elements: 5\n"));
    assert!(stdout.contains("Protocol: D://\nPrefix: 19iG3WTYSsbyos3uJ733yK4zEioi1FesNU\nKey: k\nValue: v\nType: txt\nSequence: 2"));
}

#[test]
fn test_decode_script_json() {
    let script = hex::encode(op_return(&[prefixes::PIPE]));
    let output = bitcom_peek(&["decode-script", &script, "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["element_count"], 1);
    assert_eq!(value["records"][0]["protocol"], "pipe");
}

#[test]
fn test_non_op_return_script_fails() {
    let output = bitcom_peek(&["decode-script", &hex::encode(p2pkh_script())]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_raw_tx_without_op_return_is_reported_and_fails() {
    let tx = crate::common::bitcoin_transaction(vec![p2pkh_script()]);
    let tx_hex = hex::encode(bitcoin::consensus::serialize(&tx));
    let output = bitcom_peek(&["decode-raw-tx", &tx_hex]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end(), "Transaction does not contain any OP_RETURN data");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does not contain any OP_RETURN data"));
}

#[test]
fn test_raw_tx_without_op_return_json_fails() {
    let tx = crate::common::bitcoin_transaction(vec![p2pkh_script()]);
    let tx_hex = hex::encode(bitcoin::consensus::serialize(&tx));
    let output = bitcom_peek(&["decode-raw-tx", &tx_hex, "--format", "json"]);

    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["txid"], tx.compute_txid().to_string());
    assert!(value["vout"].is_null());
}

#[test]
fn test_invalid_raw_tx_hex_fails() {
    let output = bitcom_peek(&["decode-raw-tx", "zz"]);
    assert_eq!(output.status.code(), Some(1));
}
