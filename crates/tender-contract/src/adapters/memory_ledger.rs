//! # In-Memory Ledger Adapter
//!
//! Backend double for tests. Production deployments wire the port to the
//! ledger peer; this adapter keeps world state in an ordered map and
//! appends a history entry for every put and delete, the way the real
//! ledger's append-only log behaves.
//!
//! `rich_query` understands the equality subset of a JSON selector,
//! `{"selector": {"Field": "value", ...}}`, which is enough to exercise
//! the pass-through contract.

use crate::domain::entities::{KeyModification, KeyValue};
use crate::errors::LedgerError;
use crate::ports::outbound::{HistoryIterator, LedgerStore, StateIterator};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// In-memory ledger for testing.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// World state, key-ordered so range scans come back sorted.
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    /// Append-only mutation log per key. Survives deletion of the key.
    history: RwLock<HashMap<String, Vec<KeyModification>>>,
    /// Fault injection: when set, every read-side call fails.
    fail_reads: AtomicBool,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent read-side calls fail with `LedgerError::Io`.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), LedgerError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::Io("injected read failure".to_string()));
        }
        Ok(())
    }

    fn record_modification(&self, key: &str, value: Option<Vec<u8>>, is_delete: bool) {
        let modification = KeyModification {
            tx_id: Uuid::new_v4().to_string(),
            value,
            timestamp_ms: now_ms(),
            is_delete,
        };
        self.history
            .write()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push(modification);
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.check_reads()?;
        Ok(self.state.read().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.state
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        self.record_modification(key, Some(value.to_vec()), false);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), LedgerError> {
        self.state.write().unwrap().remove(key);
        self.record_modification(key, None, true);
        Ok(())
    }

    async fn range_scan(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn StateIterator>, LedgerError> {
        self.check_reads()?;
        // Fabric range semantics: start inclusive, end exclusive, empty
        // bound means unbounded.
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };

        let items: VecDeque<KeyValue> = self
            .state
            .read()
            .unwrap()
            .range((lower, upper))
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: v.clone(),
            })
            .collect();
        Ok(Box::new(SnapshotStateIterator { items }))
    }

    async fn rich_query(&self, expression: &str) -> Result<Box<dyn StateIterator>, LedgerError> {
        self.check_reads()?;
        let selector = parse_selector(expression)?;

        let items: VecDeque<KeyValue> = self
            .state
            .read()
            .unwrap()
            .iter()
            .filter(|(_, v)| matches_selector(v, &selector))
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: v.clone(),
            })
            .collect();
        Ok(Box::new(SnapshotStateIterator { items }))
    }

    async fn history_of(&self, key: &str) -> Result<Box<dyn HistoryIterator>, LedgerError> {
        self.check_reads()?;
        let items: VecDeque<KeyModification> = self
            .history
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
            .into();
        Ok(Box::new(SnapshotHistoryIterator { items }))
    }
}

// =============================================================================
// SELECTOR MATCHING
// =============================================================================

/// Extract the equality pairs from `{"selector": {...}}`.
fn parse_selector(expression: &str) -> Result<serde_json::Map<String, serde_json::Value>, LedgerError> {
    let parsed: serde_json::Value = serde_json::from_str(expression)
        .map_err(|e| LedgerError::InvalidQuery(e.to_string()))?;
    match parsed.get("selector").and_then(|s| s.as_object()) {
        Some(selector) => Ok(selector.clone()),
        None => Err(LedgerError::InvalidQuery(
            "expression has no selector object".to_string(),
        )),
    }
}

/// A stored value matches when every selector pair equals the
/// corresponding field. Values that are not JSON objects never match.
fn matches_selector(
    stored: &[u8],
    selector: &serde_json::Map<String, serde_json::Value>,
) -> bool {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(stored) else {
        return false;
    };
    selector
        .iter()
        .all(|(field, expected)| value.get(field) == Some(expected))
}

// =============================================================================
// SNAPSHOT CURSORS
// =============================================================================

/// Cursor over a snapshot taken at open time. Dropping it releases the
/// snapshot, which stands in for closing a backend cursor.
struct SnapshotStateIterator {
    items: VecDeque<KeyValue>,
}

#[async_trait]
impl StateIterator for SnapshotStateIterator {
    async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError> {
        Ok(self.items.pop_front())
    }
}

struct SnapshotHistoryIterator {
    items: VecDeque<KeyModification>,
}

#[async_trait]
impl HistoryIterator for SnapshotHistoryIterator {
    async fn next(&mut self) -> Result<Option<KeyModification>, LedgerError> {
        Ok(self.items.pop_front())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_put_delete() {
        let ledger = InMemoryLedger::new();

        assert_eq!(ledger.get("k1").await.unwrap(), None);
        ledger.put("k1", b"v1").await.unwrap();
        assert_eq!(ledger.get("k1").await.unwrap(), Some(b"v1".to_vec()));

        ledger.delete("k1").await.unwrap();
        assert_eq!(ledger.get("k1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_range_scan_is_key_ordered_and_bounded() {
        let ledger = InMemoryLedger::new();
        ledger.put("c", b"3").await.unwrap();
        ledger.put("a", b"1").await.unwrap();
        ledger.put("b", b"2").await.unwrap();

        let mut scan = ledger.range_scan("", "").await.unwrap();
        let mut keys = Vec::new();
        while let Some(kv) = scan.next().await.unwrap() {
            keys.push(kv.key);
        }
        assert_eq!(keys, vec!["a", "b", "c"]);

        // end bound is exclusive
        let mut scan = ledger.range_scan("a", "c").await.unwrap();
        let mut keys = Vec::new();
        while let Some(kv) = scan.next().await.unwrap() {
            keys.push(kv.key);
        }
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_history_records_every_mutation_oldest_first() {
        let ledger = InMemoryLedger::new();
        ledger.put("k1", b"{\"v\":1}").await.unwrap();
        ledger.put("k1", b"{\"v\":2}").await.unwrap();
        ledger.delete("k1").await.unwrap();

        let mut history = ledger.history_of("k1").await.unwrap();
        let mut entries = Vec::new();
        while let Some(m) = history.next().await.unwrap() {
            entries.push(m);
        }
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].value, Some(b"{\"v\":1}".to_vec()));
        assert_eq!(entries[1].value, Some(b"{\"v\":2}".to_vec()));
        assert!(entries[2].is_delete);
        assert_eq!(entries[2].value, None);
        assert!(!entries[2].tx_id.is_empty());
    }

    #[tokio::test]
    async fn test_history_of_unknown_key_is_empty() {
        let ledger = InMemoryLedger::new();
        let mut history = ledger.history_of("missing").await.unwrap();
        assert!(history.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rich_query_equality_selector() {
        let ledger = InMemoryLedger::new();
        ledger
            .put("k1", br#"{"Status":"OPEN","Currency":"USD"}"#)
            .await
            .unwrap();
        ledger
            .put("k2", br#"{"Status":"CLOSED","Currency":"USD"}"#)
            .await
            .unwrap();

        let mut matches = ledger
            .rich_query(r#"{"selector":{"Status":"OPEN"}}"#)
            .await
            .unwrap();
        let first = matches.next().await.unwrap().unwrap();
        assert_eq!(first.key, "k1");
        assert!(matches.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rich_query_rejects_bad_expression() {
        let ledger = InMemoryLedger::new();
        let err = ledger.rich_query("not json").await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuery(_)));

        let err = ledger.rich_query(r#"{"fields":[]}"#).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_fault_injection() {
        let ledger = InMemoryLedger::new();
        ledger.fail_reads(true);
        assert!(matches!(
            ledger.get("k1").await.unwrap_err(),
            LedgerError::Io(_)
        ));
        ledger.fail_reads(false);
        assert!(ledger.get("k1").await.is_ok());
    }
}
