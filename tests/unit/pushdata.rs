//! Pushdata decoder tests against scripts built by the `bitcoin` crate

use anyhow::Result;
use bitcoin::opcodes::all::OP_RETURN;
use bitcoin::script::{Builder, PushBytesBuf};
use bitcom_peek::decoder::{decode_pushdata, DataCarrierScript, PushdataError};

use crate::common::op_return;

fn bitcoin_op_return(elements: &[Vec<u8>]) -> Result<Vec<u8>> {
    let mut builder = Builder::new().push_opcode(OP_RETURN);
    for element in elements {
        builder = builder.push_slice(PushBytesBuf::try_from(element.clone())?);
    }
    Ok(builder.into_script().into_bytes())
}

fn decoded_elements(script: &[u8]) -> Vec<Vec<u8>> {
    let script = DataCarrierScript::new(script).unwrap();
    let decoded = decode_pushdata(&script);
    assert!(decoded.is_complete(), "unexpected halt {:?}", decoded.halt);
    decoded
        .elements
        .iter()
        .map(|e| e.as_bytes().to_vec())
        .collect()
}

#[test]
fn test_reproduces_pushes_of_every_width() -> Result<()> {
    let elements = vec![
        vec![0x7c],
        vec![0x41; 75],
        vec![0x42; 76],
        vec![0x43; 255],
        vec![0x44; 256],
        vec![0x45; 65535],
        vec![0x46; 65536],
    ];
    let script = bitcoin_op_return(&elements)?;

    assert_eq!(decoded_elements(&script), elements);
    Ok(())
}

#[test]
fn test_encoder_matches_bitcoin_builder() -> Result<()> {
    let elements: Vec<Vec<u8>> = vec![
        b"19HxigV4QyBv3tHpQVcUEQyq1pzZVdoAut".to_vec(),
        vec![0u8; 100],
        vec![0xab; 300],
        b"|".to_vec(),
    ];
    let refs: Vec<&[u8]> = elements.iter().map(Vec::as_slice).collect();

    assert_eq!(op_return(&refs), bitcoin_op_return(&elements)?);
    Ok(())
}

#[test]
fn test_non_minimal_pushdata1_is_accepted() {
    // PUSHDATA1 used for a 3-byte push
    let script = [0x6a, 0x4c, 0x03, b'a', b'b', b'c'];
    assert_eq!(decoded_elements(&script), vec![b"abc".to_vec()]);
}

#[test]
fn test_pushdata2_declaring_more_than_remains() {
    let mut script = vec![0x6a, 0x01, 0x7c, 0x4d, 0x00, 0x01];
    script.extend_from_slice(&[0u8; 10]);

    let decoded = decode_pushdata(&DataCarrierScript::new(&script).unwrap());
    assert_eq!(decoded.elements.len(), 1);
    assert_eq!(
        decoded.halt,
        Some(PushdataError::MalformedPushdata {
            offset: 3,
            opcode: 0x4d,
            needed: 256,
            remaining: 10,
        })
    );
}

#[test]
fn test_decoding_is_repeatable() {
    let script = op_return(&[b"a", b"|", b"b"]);
    assert_eq!(decoded_elements(&script), decoded_elements(&script));
}
