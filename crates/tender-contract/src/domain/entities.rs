//! # Core Domain Entities
//!
//! The Tender record, the transient read-model types produced by
//! listings, and the two response envelopes the assembler serializes.
//!
//! Field names on the wire are fixed (they are the ledger's stored JSON
//! schema); the Rust-side names follow normal conventions and map via
//! serde renames.

use serde::{Deserialize, Serialize};

// =============================================================================
// TENDER
// =============================================================================

/// The sole persisted entity: nine opaque string fields keyed by `id`.
///
/// `amount` is text, never parsed as a number. A Tender is a pure value
/// type with no relationships to other entities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tender {
    /// Primary key; unique within the ledger keyspace, immutable once set.
    #[serde(rename = "Id")]
    pub id: String,
    /// External business identifier, opaque.
    #[serde(rename = "TenderID")]
    pub tender_id: String,
    #[serde(rename = "Accountcode")]
    pub account_code: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    /// Stored and compared as text, not a number.
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl Tender {
    /// Build a Tender from the nine invocation arguments.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: &str,
        tender_id: &str,
        account_code: &str,
        account: &str,
        name: &str,
        currency: &str,
        branch: &str,
        amount: &str,
        status: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            tender_id: tender_id.to_string(),
            account_code: account_code.to_string(),
            account: account.to_string(),
            name: name.to_string(),
            currency: currency.to_string(),
            branch: branch.to_string(),
            amount: amount.to_string(),
            status: status.to_string(),
        }
    }
}

// =============================================================================
// READ MODELS
// =============================================================================

/// One row of a full-range listing: the ledger key paired with the
/// decoded record. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Ledger key the record was stored under.
    #[serde(rename = "Key")]
    pub key: String,
    /// Decoded record.
    #[serde(rename = "Record")]
    pub record: Tender,
}

// =============================================================================
// PORT ITEM TYPES
// =============================================================================

/// One entry yielded by a range scan or rich query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    /// Ledger key.
    pub key: String,
    /// Raw stored payload.
    pub value: Vec<u8>,
}

/// One entry of a key's mutation history, as committed by the ledger.
///
/// A deletion is a tombstone: `is_delete` is true and `value` is `None`,
/// but the transaction id is still recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyModification {
    /// Id of the transaction that committed this mutation.
    pub tx_id: String,
    /// Payload at that point in time; `None` for tombstones.
    pub value: Option<Vec<u8>>,
    /// Commit timestamp in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// True if this entry records a deletion.
    pub is_delete: bool,
}

// =============================================================================
// RESPONSE ENVELOPES
// =============================================================================

/// Read-with-txid response: the current record paired with the
/// transaction id of its most recent history entry.
///
/// Serializes as `{"txid": "...", "data": {<Tender fields>}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEnvelope {
    /// Transaction id of the last history entry the backend yielded.
    pub txid: String,
    /// Current stored record.
    pub data: Tender,
}

/// One transaction of a history response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Committing transaction id.
    pub txn: String,
    /// Value at that time, or `null` for a tombstone.
    pub value: serde_json::Value,
}

/// Full history response for one key.
///
/// Serializes as `{"counter": <int>, "txns": [...]}` with `txns` ordered
/// oldest first and `counter == txns.len()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEnvelope {
    /// Number of history entries.
    pub counter: u64,
    /// Ordered transaction records, oldest first.
    pub txns: Vec<HistoryEntry>,
}

// =============================================================================
// TESTS
// =============================================================================
