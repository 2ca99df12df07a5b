//! End-to-end decoding from transaction to rendered report

use anyhow::Result;
use bitcom_peek::decoder::registry::prefixes;
use bitcom_peek::decoder::report::{render_json, render_text};
use bitcom_peek::decoder::{decode_script_hex, decode_transaction_data};
use bitcom_peek::rpc::whatsonchain::parse_transaction_json;
use bitcom_peek::types::RawTransaction;

use crate::common::{bitcoin_transaction, op_return, p2pkh_script};

fn signed_post_script() -> Vec<u8> {
    op_return(&[
        prefixes::B_FILE,
        b"Hello Bitcom",
        b"text/plain",
        b"UTF-8",
        b"hello.txt",
        prefixes::PIPE,
        prefixes::MAGIC_ATTRIBUTE,
        b"SET",
        b"app",
        b"demo",
        prefixes::PIPE,
        prefixes::AUTHOR_IDENTITY,
        b"BITCOIN_ECDSA",
        b"1EXhSbGFiEAZCE5eeBvUxT6cBVHhrpPWXz",
        &[0xaa, 0xbb],
    ])
}

#[test]
fn test_raw_transaction_to_text_report() -> Result<()> {
    let tx = bitcoin_transaction(vec![p2pkh_script(), signed_post_script()]);
    let tx_hex = hex::encode(bitcoin::consensus::serialize(&tx));

    let decoded = decode_transaction_data(&RawTransaction::from_consensus_hex(&tx_hex)?)?;
    let text = render_text(&decoded);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Tx output index: 1");
    assert_eq!(lines[1], "Number of elements: 15");
    assert!(lines.contains(&"Protocol: B://"));
    assert!(lines.contains(&"Data: 12 bytes"));
    assert!(lines.contains(&"Encoding: UTF-8"));
    assert!(lines.contains(&"Filename: hello.txt"));
    assert!(lines.contains(&"app: demo"));
    assert!(lines.contains(&"Signing Address: 1EXhSbGFiEAZCE5eeBvUxT6cBVHhrpPWXz"));
    assert!(lines.contains(&"Signature: aabb"));
    assert_eq!(lines.iter().filter(|l| **l == "| (pipe)").count(), 2);
    assert!(!text.contains("Error:"));
    Ok(())
}

#[test]
fn test_whatsonchain_json_to_json_report() -> Result<()> {
    let body = serde_json::json!({
        "txid": "d4738845dc0d045a35c72fcacaa2d4dee19a3be1cbfcb0d333ce2aec6f0de311",
        "vout": [
            {"value": 0.0, "n": 0, "scriptPubKey": {"hex": hex::encode(signed_post_script())}},
            {"value": 0.1, "n": 1, "scriptPubKey": {"hex": hex::encode(p2pkh_script())}},
        ]
    })
    .to_string();

    let tx = parse_transaction_json(&body)?;
    let value = render_json(&decode_transaction_data(&tx)?);

    assert_eq!(value["vout"], 0);
    assert_eq!(value["records"].as_array().map(Vec::len), Some(5));
    assert_eq!(value["records"][0]["protocol"], "b_file");
    assert_eq!(value["records"][0]["filename"], "hello.txt");
    assert_eq!(value["records"][2]["pairs"][0]["key"], "app");
    assert_eq!(value["records"][4]["signature"], "aabb");
    Ok(())
}

#[test]
fn test_truncated_tail_reported_after_valid_records() -> Result<()> {
    let script = op_return(&[
        prefixes::D_PROTOCOL,
        b"avatar",
        b"b://abc",
        b"b",
        b"1",
        prefixes::PIPE,
        prefixes::B_FILE,
        b"data",
    ]);
    let payload = decode_script_hex(&hex::encode(script))?;

    assert_eq!(payload.records().count(), 2);
    assert_eq!(payload.errors().count(), 1);
    assert!(payload.halt.is_none());
    Ok(())
}
