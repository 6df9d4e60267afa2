//! # Result Assembler
//!
//! Builds the two structured response envelopes and serializes each with
//! a single `serde_json` pass. The original wire shapes are preserved
//! exactly: `{"txid": ..., "data": ...}` for reads and
//! `{"counter": ..., "txns": [{"txn": ..., "value": ...}]}` for history.

use crate::domain::entities::{
    HistoryEntry, HistoryEnvelope, KeyModification, ReadEnvelope, Tender,
};
use crate::errors::ContractError;

/// Assemble and serialize the read-with-txid envelope.
///
/// # Errors
///
/// Returns [`ContractError::Encode`] if serialization fails.
pub fn assemble_read(record: Tender, tx_id: String) -> Result<String, ContractError> {
    let envelope = ReadEnvelope {
        txid: tx_id,
        data: record,
    };
    serde_json::to_string(&envelope).map_err(|e| ContractError::Encode(e.to_string()))
}

/// Assemble and serialize the history envelope from accumulated
/// modifications, oldest first.
///
/// Tombstones render as a `null` value while keeping their transaction
/// id. `counter` always equals the number of entries; zero history is a
/// valid, empty envelope.
///
/// # Errors
///
/// Returns [`ContractError::Decode`] if a stored value is not valid
/// JSON, or [`ContractError::Encode`] if serialization fails.
pub fn assemble_history(modifications: Vec<KeyModification>) -> Result<String, ContractError> {
    let mut txns = Vec::with_capacity(modifications.len());
    for modification in modifications {
        txns.push(HistoryEntry {
            txn: modification.tx_id,
            value: parse_stored_value(modification.value.as_deref())?,
        });
    }

    let envelope = HistoryEnvelope {
        counter: txns.len() as u64,
        txns,
    };
    serde_json::to_string(&envelope).map_err(|e| ContractError::Encode(e.to_string()))
}

/// Parse a raw stored value into a JSON value for embedding.
///
/// Absent values (tombstones) become `null`.
fn parse_stored_value(raw: Option<&[u8]>) -> Result<serde_json::Value, ContractError> {
    match raw {
        None => Ok(serde_json::Value::Null),
        Some(bytes) => {
            serde_json::from_slice(bytes).map_err(|e| ContractError::Decode(e.to_string()))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
