//! # Tender Service
//!
//! The entity repository: implements [`ContractApi`] on top of an
//! injected [`LedgerStore`]. The service is stateless — it holds nothing
//! but the port handle; all state lives in the externally owned ledger,
//! and each operation runs to completion within the one ledger
//! transaction the dispatcher bound it to.
//!
//! ## Contracts enforced here
//!
//! - `create` fails on an existing id, `update`/`delete` on a missing one
//! - listings are all-or-nothing: one undecodable record aborts the call
//! - every cursor is released exactly once, on success and on early error
//! - a read's txid is the last history entry the backend yields

use crate::domain::entities::{QueryResult, Tender};
use crate::domain::{assembler, codec};
use crate::errors::ContractError;
use crate::ports::inbound::ContractApi;
use crate::ports::outbound::LedgerStore;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The Tender entity repository over an injected ledger backend.
pub struct TenderService<L: LedgerStore> {
    /// Ledger Access Port handle. The only field; see module docs.
    ledger: Arc<L>,
}

impl<L: LedgerStore> TenderService<L> {
    /// Create a service over the given backend.
    pub fn new(ledger: L) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }

    /// Access the underlying backend (wiring and tests).
    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Existence check shared by create/update/delete.
    ///
    /// Absence is a normal `false`; only a failing lookup is an error.
    async fn exists(&self, id: &str) -> Result<bool, ContractError> {
        Ok(self.ledger.get(id).await?.is_some())
    }

    /// Encode and store a record under its id.
    async fn store(&self, record: &Tender) -> Result<(), ContractError> {
        let payload = codec::encode(record)?;
        self.ledger.put(&record.id, &payload).await?;
        Ok(())
    }
}

#[async_trait]
impl<L: LedgerStore> ContractApi for TenderService<L> {
    async fn init_ledger(&self) -> Result<(), ContractError> {
        // No seed records yet; the hook stays so seeding is one edit away.
        info!("Tender-Chain v1.0 contract initialized");
        Ok(())
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn create_data(
        &self,
        id: &str,
        tender_id: &str,
        account_code: &str,
        account: &str,
        name: &str,
        currency: &str,
        branch: &str,
        amount: &str,
        status: &str,
    ) -> Result<(), ContractError> {
        if self.exists(id).await? {
            return Err(ContractError::AlreadyExists(id.to_string()));
        }

        let record = Tender::new(
            id,
            tender_id,
            account_code,
            account,
            name,
            currency,
            branch,
            amount,
            status,
        );
        self.store(&record).await?;
        info!("record created");
        Ok(())
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn read_data(&self, id: &str) -> Result<String, ContractError> {
        let payload = self
            .ledger
            .get(id)
            .await?
            .ok_or_else(|| ContractError::NotFound(id.to_string()))?;
        let record = codec::decode(&payload)?;

        // Walk the full history and keep the tx id of the last entry the
        // backend yields: the most recent mutation per its commit order.
        let mut cursor = self.ledger.history_of(id).await?;
        let mut last_tx_id = String::new();
        loop {
            match cursor.next().await {
                Ok(Some(modification)) => last_tx_id = modification.tx_id,
                Ok(None) => break,
                Err(e) => return Err(ContractError::HistoryRead(e.to_string())),
            }
        }
        drop(cursor);

        debug!(txid = %last_tx_id, "record read");
        assembler::assemble_read(record, last_tx_id)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn update_data(
        &self,
        id: &str,
        tender_id: &str,
        account_code: &str,
        account: &str,
        name: &str,
        currency: &str,
        branch: &str,
        amount: &str,
        status: &str,
    ) -> Result<(), ContractError> {
        if !self.exists(id).await? {
            return Err(ContractError::NotFound(id.to_string()));
        }

        // Full overwrite from the complete argument list, no merge.
        let record = Tender::new(
            id,
            tender_id,
            account_code,
            account,
            name,
            currency,
            branch,
            amount,
            status,
        );
        self.store(&record).await?;
        info!("record updated");
        Ok(())
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn delete_data(&self, id: &str) -> Result<(), ContractError> {
        if !self.exists(id).await? {
            return Err(ContractError::NotFound(id.to_string()));
        }
        self.ledger.delete(id).await?;
        info!("record deleted");
        Ok(())
    }

    async fn data_exists(&self, id: &str) -> Result<bool, ContractError> {
        self.exists(id).await
    }

    #[instrument(skip_all)]
    async fn get_all_data(&self) -> Result<Vec<QueryResult>, ContractError> {
        let mut cursor = self.ledger.range_scan("", "").await?;

        let mut results = Vec::new();
        while let Some(kv) = cursor.next().await? {
            // One undecodable record aborts the listing; the early
            // return drops the cursor.
            let record = codec::decode(&kv.value)?;
            results.push(QueryResult {
                key: kv.key,
                record,
            });
        }

        debug!(records = results.len(), "full range listed");
        Ok(results)
    }

    #[instrument(skip_all)]
    async fn query_data(&self, expression: &str) -> Result<Vec<Tender>, ContractError> {
        let mut cursor = self.ledger.rich_query(expression).await?;

        // Keys are dropped here: query responses carry values only.
        let mut records = Vec::new();
        while let Some(kv) = cursor.next().await? {
            records.push(codec::decode(&kv.value)?);
        }

        debug!(records = records.len(), "rich query evaluated");
        Ok(records)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn get_history(&self, id: &str) -> Result<String, ContractError> {
        let mut cursor = self.ledger.history_of(id).await?;

        let mut modifications = Vec::new();
        loop {
            match cursor.next().await {
                Ok(Some(modification)) => modifications.push(modification),
                Ok(None) => break,
                Err(e) => return Err(ContractError::HistoryRead(e.to_string())),
            }
        }
        drop(cursor);

        debug!(entries = modifications.len(), "history read");
        assembler::assemble_history(modifications)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;
    use crate::domain::entities::KeyModification;
    use crate::errors::LedgerError;
    use crate::ports::outbound::{HistoryIterator, StateIterator};

    fn service() -> TenderService<InMemoryLedger> {
        TenderService::new(InMemoryLedger::new())
    }

    async fn create_sample(svc: &TenderService<InMemoryLedger>, id: &str, status: &str) {
        svc.create_data(id, "TID1", "AC1", "A1", "N1", "USD", "B1", "100", status)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_then_exists() {
        let svc = service();
        assert!(!svc.data_exists("T1").await.unwrap());
        create_sample(&svc, "T1", "OPEN").await;
        assert!(svc.data_exists("T1").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_twice_fails_and_keeps_first_value() {
        let svc = service();
        create_sample(&svc, "T1", "OPEN").await;

        let err = svc
            .create_data("T1", "TID2", "AC2", "A2", "N2", "EUR", "B2", "200", "CLOSED")
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists(_)));

        let json = svc.read_data("T1").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["Status"], "OPEN");
        assert_eq!(value["data"]["Amount"], "100");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let svc = service();
        let err = svc
            .update_data("T1", "TID1", "AC1", "A1", "N1", "USD", "B1", "100", "OPEN")
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::NotFound(_)));
        assert!(!svc.data_exists("T1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let svc = service();
        let err = svc.delete_data("T1").await.unwrap_err();
        assert!(matches!(err, ContractError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_read_is_not_found() {
        let svc = service();
        create_sample(&svc, "T1", "OPEN").await;
        svc.delete_data("T1").await.unwrap();

        assert!(!svc.data_exists("T1").await.unwrap());
        let err = svc.read_data("T1").await.unwrap_err();
        assert!(matches!(err, ContractError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_pairs_record_with_latest_txid() {
        let svc = service();
        create_sample(&svc, "T1", "OPEN").await;
        svc.update_data("T1", "TID1", "AC1", "A1", "N1", "USD", "B1", "100", "CLOSED")
            .await
            .unwrap();

        let json = svc.read_data("T1").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["Status"], "CLOSED");

        // The read's txid must be the last history entry's tx id.
        let history = svc.get_history("T1").await.unwrap();
        let history: serde_json::Value = serde_json::from_str(&history).unwrap();
        let last_txn = history["txns"].as_array().unwrap().last().unwrap();
        assert_eq!(value["txid"], last_txn["txn"]);
        assert!(!value["txid"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_counts_writes_and_delete() {
        let svc = service();
        create_sample(&svc, "T1", "OPEN").await;
        svc.update_data("T1", "TID1", "AC1", "A1", "N1", "USD", "B1", "100", "HELD")
            .await
            .unwrap();
        svc.update_data("T1", "TID1", "AC1", "A1", "N1", "USD", "B1", "100", "CLOSED")
            .await
            .unwrap();
        svc.delete_data("T1").await.unwrap();

        let json = svc.get_history("T1").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["counter"], 4);

        let txns = value["txns"].as_array().unwrap();
        assert_eq!(txns.len(), 4);
        assert_eq!(txns[0]["value"]["Status"], "OPEN");
        assert_eq!(txns[1]["value"]["Status"], "HELD");
        assert_eq!(txns[2]["value"]["Status"], "CLOSED");
        assert!(txns[3]["value"].is_null());
    }

    #[tokio::test]
    async fn test_history_of_untouched_key_is_empty() {
        let svc = service();
        let json = svc.get_history("never-written").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["counter"], 0);
        assert_eq!(value["txns"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_get_all_on_empty_keyspace() {
        let svc = service();
        let results = svc.get_all_data().await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_preserves_keys_and_order() {
        let svc = service();
        create_sample(&svc, "T2", "OPEN").await;
        create_sample(&svc, "T1", "OPEN").await;

        let results = svc.get_all_data().await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].key, "T1");
        assert_eq!(results[1].key, "T2");
        assert_eq!(results[0].record.id, "T1");
    }

    #[tokio::test]
    async fn test_get_all_aborts_on_one_bad_record() {
        let svc = service();
        create_sample(&svc, "T1", "OPEN").await;
        // Inject a payload the codec cannot decode.
        svc.ledger().put("T0", b"garbage").await.unwrap();

        let err = svc.get_all_data().await.unwrap_err();
        assert!(matches!(err, ContractError::Decode(_)));
    }

    #[tokio::test]
    async fn test_query_returns_values_without_keys() {
        let svc = service();
        create_sample(&svc, "T1", "OPEN").await;
        create_sample(&svc, "T2", "CLOSED").await;
        create_sample(&svc, "T3", "OPEN").await;

        let records = svc
            .query_data(r#"{"selector":{"Status":"OPEN"}}"#)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.status == "OPEN"));
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_not_false() {
        let svc = service();
        svc.ledger().fail_reads(true);

        let err = svc.data_exists("T1").await.unwrap_err();
        assert!(matches!(err, ContractError::Backend(_)));
    }

    #[tokio::test]
    async fn test_history_failure_mid_iteration() {
        /// Backend whose history cursor fails after one entry.
        struct FlakyLedger;

        struct FlakyHistory {
            yielded: bool,
        }

        #[async_trait]
        impl HistoryIterator for FlakyHistory {
            async fn next(&mut self) -> Result<Option<KeyModification>, LedgerError> {
                if self.yielded {
                    return Err(LedgerError::Io("cursor torn down".to_string()));
                }
                self.yielded = true;
                Ok(Some(KeyModification {
                    tx_id: "tx-1".to_string(),
                    value: None,
                    timestamp_ms: 0,
                    is_delete: true,
                }))
            }
        }

        #[async_trait]
        impl LedgerStore for FlakyLedger {
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
                Err(LedgerError::Unavailable)
            }
            async fn rich_query(
                &self,
                _expression: &str,
            ) -> Result<Box<dyn StateIterator>, LedgerError> {
                Err(LedgerError::Unavailable)
            }
            async fn history_of(
                &self,
                _key: &str,
            ) -> Result<Box<dyn HistoryIterator>, LedgerError> {
                Ok(Box::new(FlakyHistory { yielded: false }))
            }
        }

        let svc = TenderService::new(FlakyLedger);
        let err = svc.get_history("T1").await.unwrap_err();
        assert!(matches!(err, ContractError::HistoryRead(_)));
    }

    #[tokio::test]
    async fn test_init_ledger_is_a_noop() {
        let svc = service();
        svc.init_ledger().await.unwrap();
        assert!(svc.get_all_data().await.unwrap().is_empty());
    }
}
