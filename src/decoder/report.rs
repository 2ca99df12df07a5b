//! Human-readable and JSON rendering of decoded OP_RETURN data

use super::error::RecordError;
use super::{DecodedPayload, DecodedTransaction, RecordOutcome};
use crate::types::bitcom::{DecodedRecord, ProtocolRecord};
use serde_json::{json, Value};

const SEPARATOR_WIDTH: usize = 40;

/// Render a decoded transaction as text, one line per field
pub fn render_text(decoded: &DecodedTransaction) -> String {
    let mut lines = vec![format!("Tx output index: {}", decoded.vout)];
    lines.extend(payload_lines(&decoded.payload));
    lines.join("\n")
}

/// Render a decoded script without transaction context
pub fn render_payload_text(payload: &DecodedPayload) -> String {
    payload_lines(payload).join("\n")
}

fn payload_lines(payload: &DecodedPayload) -> Vec<String> {
    let mut lines = vec![format!("Number of elements: {}", payload.element_count)];
    if let Some(halt) = &payload.halt {
        lines.push(format!("Warning: {}", halt));
    }

    for outcome in &payload.records {
        lines.push("-".repeat(SEPARATOR_WIDTH));
        match outcome {
            Ok(record) => record_lines(record, &mut lines),
            Err(e) => error_lines(e, &mut lines),
        }
    }
    lines
}

fn record_lines(decoded: &DecodedRecord, lines: &mut Vec<String>) {
    let tag = decoded.tag();
    let prefix = tag
        .prefix()
        .map(|p| String::from_utf8_lossy(p).into_owned());

    match &decoded.record {
        ProtocolRecord::Pipe => {
            lines.push(tag.display_name().to_string());
            return;
        }
        ProtocolRecord::Unknown(unknown) => {
            lines.push(format!("Protocol: {}", tag));
            lines.push(format!("Prefix: {}", unknown.prefix));
            for field in &unknown.fields {
                lines.push(format!("Unknown field: {}", field));
            }
            return;
        }
        _ => {}
    }

    lines.push(format!("Protocol: {}", tag));
    if let Some(prefix) = prefix {
        lines.push(format!("Prefix: {}", prefix));
    }

    match &decoded.record {
        ProtocolRecord::BFile(b) => {
            lines.push(format!("Data: {} bytes", b.data_length));
            lines.push(format!("Media type: {}", b.media_type));
            if let Some(encoding) = &b.encoding {
                lines.push(format!("Encoding: {}", encoding));
            }
            if let Some(filename) = &b.filename {
                lines.push(format!("Filename: {}", filename));
            }
        }
        ProtocolRecord::AuthorIdentity(aip) => {
            lines.push(format!("Signing Algorithm: {}", aip.algorithm));
            lines.push(format!("Signing Address: {}", aip.address));
            lines.push(format!("Signature: {}", aip.signature));
            for index in &aip.field_indexes {
                let value = index
                    .value
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "too wide".to_string());
                lines.push(format!("Field Index: 0x{} ({})", index.hex, value));
            }
        }
        ProtocolRecord::MagicAttribute(map) => {
            lines.push(format!("Action: {}", map.action));
            for pair in &map.pairs {
                lines.push(format!("{}: {}", pair.key, pair.value));
            }
            if map.incomplete_tail {
                lines.push("Incomplete key/value pair".to_string());
            }
        }
        ProtocolRecord::DProtocol(d) => {
            lines.push(format!("Key: {}", d.key));
            lines.push(format!("Value: {}", d.value));
            lines.push(format!("Type: {}", d.value_type));
            lines.push(format!("Sequence: {}", d.sequence));
        }
        ProtocolRecord::Pipe | ProtocolRecord::Unknown(_) => {}
    }
}

fn error_lines(error: &RecordError, lines: &mut Vec<String>) {
    lines.push(format!("Error: {}", error));
    match error {
        RecordError::TruncatedProtocolRecord { fields, .. } => {
            for field in fields {
                lines.push(format!("Available field: 0x{}", field));
            }
        }
    }
}

/// Render a decoded transaction as a JSON document
pub fn render_json(decoded: &DecodedTransaction) -> Value {
    let mut value = payload_json(&decoded.payload);
    if let Value::Object(map) = &mut value {
        map.insert("txid".to_string(), json!(decoded.txid));
        map.insert("vout".to_string(), json!(decoded.vout));
    }
    value
}

/// Render a decoded script as a JSON document
pub fn payload_json(payload: &DecodedPayload) -> Value {
    json!({
        "element_count": payload.element_count,
        "halt": payload.halt.as_ref().map(|halt| json!({
            "error": halt.to_string(),
            "detail": halt,
        })),
        "records": payload.records.iter().map(outcome_json).collect::<Vec<_>>(),
    })
}

fn outcome_json(outcome: &RecordOutcome) -> Value {
    match outcome {
        Ok(record) => json!(record),
        Err(e) => json!({
            "error": e.to_string(),
            "detail": e,
        }),
    }
}
