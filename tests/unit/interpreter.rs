//! Protocol dispatcher scenarios

use bitcom_peek::decoder::registry::prefixes;
use bitcom_peek::decoder::{decode_pushdata, interpret, DataCarrierScript, ProtocolTag, RecordError};
use bitcom_peek::types::{ProtocolRecord, TextField};

use crate::common::op_return;

fn records(elements: &[&[u8]]) -> Vec<bitcom_peek::decoder::RecordOutcome> {
    let script = op_return(elements);
    let decoded = decode_pushdata(&DataCarrierScript::new(&script).unwrap());
    interpret(&decoded.elements)
}

#[test]
fn test_b_file_text_plain() {
    let body = [b'x'; 40];
    let outcomes = records(&[prefixes::B_FILE, &body, b"text/plain"]);

    assert_eq!(outcomes.len(), 1);
    match &outcomes[0].as_ref().unwrap().record {
        ProtocolRecord::BFile(b) => {
            assert_eq!(b.data_length, 40);
            assert_eq!(b.media_type, TextField::Text("text/plain".to_string()));
            assert!(b.encoding.is_none());
            assert!(b.filename.is_none());
        }
        other => panic!("unexpected record {:?}", other),
    }
}

#[test]
fn test_map_set_then_pipe() {
    let outcomes = records(&[
        prefixes::MAGIC_ATTRIBUTE,
        b"SET",
        b"app",
        b"demo",
        prefixes::PIPE,
    ]);

    assert_eq!(outcomes.len(), 2);
    match &outcomes[0].as_ref().unwrap().record {
        ProtocolRecord::MagicAttribute(map) => {
            assert_eq!(map.action.as_text(), Some("SET"));
            assert_eq!(map.pairs.len(), 1);
            assert_eq!(map.pairs[0].key.as_text(), Some("app"));
            assert_eq!(map.pairs[0].value.as_text(), Some("demo"));
            assert!(!map.incomplete_tail);
        }
        other => panic!("unexpected record {:?}", other),
    }
    assert_eq!(outcomes[1].as_ref().unwrap().tag(), ProtocolTag::Pipe);
}

#[test]
fn test_unknown_prefix_with_three_fields() {
    let outcomes = records(&[b"APP", b"one", b"two", b"three"]);

    assert_eq!(outcomes.len(), 1);
    let record = outcomes[0].as_ref().unwrap();
    assert_eq!(record.consumed(), 4);
    match &record.record {
        ProtocolRecord::Unknown(u) => {
            assert_eq!(u.prefix.as_text(), Some("APP"));
            let texts: Vec<_> = u.fields.iter().map(|f| f.text.clone().unwrap()).collect();
            assert_eq!(texts, vec!["one", "two", "three"]);
        }
        other => panic!("unexpected record {:?}", other),
    }
}

#[test]
fn test_b_map_aip_pipeline() {
    let outcomes = records(&[
        prefixes::B_FILE,
        b"# Hello",
        b"text/markdown",
        b"UTF-8",
        prefixes::PIPE,
        prefixes::MAGIC_ATTRIBUTE,
        b"SET",
        b"app",
        b"demo",
        b"type",
        b"post",
        prefixes::PIPE,
        prefixes::AUTHOR_IDENTITY,
        b"BITCOIN_ECDSA",
        b"1EXhSbGFiEAZCE5eeBvUxT6cBVHhrpPWXz",
        &[0x1f; 65],
        &[0x00],
        &[0x01],
    ]);

    let tags: Vec<_> = outcomes.iter().map(|o| o.as_ref().unwrap().tag()).collect();
    assert_eq!(
        tags,
        vec![
            ProtocolTag::BFile,
            ProtocolTag::Pipe,
            ProtocolTag::MagicAttribute,
            ProtocolTag::Pipe,
            ProtocolTag::AuthorIdentity,
        ]
    );

    match &outcomes[4].as_ref().unwrap().record {
        ProtocolRecord::AuthorIdentity(aip) => {
            assert_eq!(aip.signature.len(), 130);
            let indexes: Vec<_> = aip.field_indexes.iter().map(|i| i.value).collect();
            assert_eq!(indexes, vec![Some(0), Some(1)]);
        }
        other => panic!("unexpected record {:?}", other),
    }
}

#[test]
fn test_truncation_keeps_earlier_records_and_resyncs() {
    let outcomes = records(&[
        prefixes::PIPE,
        prefixes::D_PROTOCOL,
        b"key",
        prefixes::PIPE,
        b"tail",
    ]);

    assert_eq!(outcomes[0].as_ref().unwrap().tag(), ProtocolTag::Pipe);
    match &outcomes[1] {
        Err(RecordError::TruncatedProtocolRecord {
            protocol,
            index,
            required,
            ..
        }) => {
            assert_eq!(*protocol, ProtocolTag::DProtocol);
            assert_eq!(*index, 1);
            assert_eq!(*required, 4);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let resumed = outcomes[2].as_ref().unwrap();
    assert_eq!(resumed.start, 3);
    assert_eq!(resumed.tag(), ProtocolTag::Pipe);
    assert_eq!(outcomes[3].as_ref().unwrap().tag(), ProtocolTag::Unknown);
    assert_eq!(outcomes.len(), 4);
}

#[test]
fn test_truncation_without_later_pipe_ends_interpretation() {
    let outcomes = records(&[prefixes::AUTHOR_IDENTITY, b"BITCOIN_ECDSA", b"1addr"]);

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        outcomes[0],
        Err(RecordError::TruncatedProtocolRecord { available: 2, .. })
    ));
}

#[test]
fn test_interpretation_is_pure() {
    let elements: &[&[u8]] = &[prefixes::MAGIC_ATTRIBUTE, b"SET", b"k", prefixes::PIPE, b"?"];
    assert_eq!(records(elements), records(elements));
}

#[test]
fn test_non_utf8_field_does_not_abort_record() {
    let outcomes = records(&[prefixes::D_PROTOCOL, b"key", &[0xff, 0xfe], b"b", b"1"]);

    match &outcomes[0].as_ref().unwrap().record {
        ProtocolRecord::DProtocol(d) => {
            assert_eq!(d.key.as_text(), Some("key"));
            match &d.value {
                TextField::NonText(e) => {
                    assert_eq!(e.index, 2);
                    assert_eq!(e.hex, "fffe");
                    assert_eq!(e.valid_up_to, 0);
                }
                TextField::Text(t) => panic!("unexpected text {}", t),
            }
            assert_eq!(d.sequence.as_text(), Some("1"));
        }
        other => panic!("unexpected record {:?}", other),
    }
}
