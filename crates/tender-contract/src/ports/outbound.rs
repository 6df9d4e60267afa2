//! # Driven Ports (SPI - Outbound)
//!
//! The Ledger Access Port: the single capability the repository depends
//! on. The surrounding platform owns the real implementation; this crate
//! ships an in-memory adapter for tests (`adapters::InMemoryLedger`).
//!
//! ## Resource rule
//!
//! Range scans, rich queries and history reads hand back boxed cursors.
//! Dropping the box releases the backend cursor, so every exit path of a
//! consumer — success or early error — closes it exactly once.

use crate::domain::entities::{KeyModification, KeyValue};
use crate::errors::LedgerError;
use async_trait::async_trait;

// =============================================================================
// CURSORS
// =============================================================================

/// Pull-based cursor over `(key, value)` state entries.
///
/// Range scans yield in key order; rich-query order is backend-defined
/// and must be passed through unchanged.
#[async_trait]
pub trait StateIterator: Send {
    /// Fetch the next entry, or `None` when exhausted.
    async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError>;
}

impl core::fmt::Debug for dyn StateIterator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("StateIterator")
    }
}

/// Pull-based cursor over a key's mutation history, oldest first per the
/// backend's commit order.
#[async_trait]
pub trait HistoryIterator: Send {
    /// Fetch the next modification, or `None` when exhausted.
    async fn next(&mut self) -> Result<Option<KeyModification>, LedgerError>;
}

// =============================================================================
// LEDGER STORE
// =============================================================================

/// Interface to the externally owned transactional ledger.
///
/// Each call executes inside the ledger transaction bound to the current
/// invocation; isolation and conflict detection between transactions are
/// the platform's concern, not this port's. Read-your-writes within one
/// invocation is only guaranteed if the backend provides it.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent.
    ///
    /// Absence is a normal `Ok(None)`, never an error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// Remove `key` from world state. History retention for the key is
    /// the backend's responsibility.
    async fn delete(&self, key: &str) -> Result<(), LedgerError>;

    /// Scan `[start, end)` in key order. Empty bounds mean unbounded.
    async fn range_scan(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn StateIterator>, LedgerError>;

    /// Evaluate an opaque, backend-specific rich-query expression
    /// server-side and stream the matches.
    async fn rich_query(&self, expression: &str) -> Result<Box<dyn StateIterator>, LedgerError>;

    /// Stream the full mutation history for `key`, oldest first.
    ///
    /// A key with no history yields an immediately exhausted cursor.
    async fn history_of(&self, key: &str) -> Result<Box<dyn HistoryIterator>, LedgerError>;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal object-safety check: the port must be usable behind a
    /// trait object, since adapters are injected dynamically.
    struct NullLedger;

    #[async_trait]
    impl LedgerStore for NullLedger {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
            Ok(None)
        }

        async fn put(&self, _key: &str, _value: &[u8]) -> Result<(), LedgerError> {
            Ok(())
        }

        async fn delete(&self, _key: &str) -> Result<(), LedgerError> {
            Ok(())
        }

        async fn range_scan(
            &self,
            _start: &str,
            _end: &str,
        ) -> Result<Box<dyn StateIterator>, LedgerError> {
            Ok(Box::new(Empty))
        }

        async fn rich_query(
            &self,
            _expression: &str,
        ) -> Result<Box<dyn StateIterator>, LedgerError> {
            Ok(Box::new(Empty))
        }

        async fn history_of(&self, _key: &str) -> Result<Box<dyn HistoryIterator>, LedgerError> {
            Ok(Box::new(Empty))
        }
    }

    struct Empty;

    #[async_trait]
    impl StateIterator for Empty {
        async fn next(&mut self) -> Result<Option<KeyValue>, LedgerError> {
            Ok(None)
        }
    }

    #[async_trait]
    impl HistoryIterator for Empty {
        async fn next(&mut self) -> Result<Option<KeyModification>, LedgerError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_port_is_object_safe() {
        let ledger: Box<dyn LedgerStore> = Box::new(NullLedger);
        assert_eq!(ledger.get("any").await.unwrap(), None);

        let mut scan = ledger.range_scan("", "").await.unwrap();
        assert!(scan.next().await.unwrap().is_none());
    }
}
