//! # Driving Ports (API - Inbound)
//!
//! The invocation surface exposed to the platform dispatcher: one entry
//! point per operation, parameters as plain strings. The dispatcher owns
//! transport and cancellation; every method here runs synchronously to
//! completion within one ledger transaction.

use crate::domain::entities::{QueryResult, Tender};
use crate::errors::ContractError;
use async_trait::async_trait;

/// Primary API of the Tender contract.
///
/// `read_data` and `get_history` return pre-serialized JSON envelopes
/// (the dispatcher forwards them verbatim); the listing operations
/// return structured values.
#[async_trait]
pub trait ContractApi: Send + Sync {
    /// Bootstrap hook. Currently seeds zero records and logs a fixed
    /// startup message.
    async fn init_ledger(&self) -> Result<(), ContractError>;

    /// Store a new record. Fails with `AlreadyExists` if `id` is taken;
    /// an encode failure leaves no write behind.
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<(), ContractError>;

    /// Read the current record together with the transaction id of its
    /// most recent history entry, as
    /// `{"txid": "...", "data": {<Tender fields>}}`.
    async fn read_data(&self, id: &str) -> Result<String, ContractError>;

    /// Overwrite an existing record in full. No merge: the stored value
    /// is rebuilt from the caller's complete argument list. Fails with
    /// `NotFound` if `id` is absent.
    #[allow(clippy::too_many_arguments)]
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
    ) -> Result<(), ContractError>;

    /// Remove an existing record. Fails with `NotFound` if absent.
    async fn delete_data(&self, id: &str) -> Result<(), ContractError>;

    /// True iff a non-absent value is stored under `id`. A failing
    /// lookup is `Backend`, never a silent `false`.
    async fn data_exists(&self, id: &str) -> Result<bool, ContractError>;

    /// Decode every record in the keyspace, in key order, keys
    /// preserved. One undecodable record aborts the whole listing.
    async fn get_all_data(&self) -> Result<Vec<QueryResult>, ContractError>;

    /// Delegate a rich-query expression to the backend and decode the
    /// matches. Keys are discarded from the result; order is the
    /// backend's, passed through unchanged.
    async fn query_data(&self, expression: &str) -> Result<Vec<Tender>, ContractError>;

    /// Full mutation trail for `id`, oldest first, as
    /// `{"counter": <int>, "txns": [{"txn": "...", "value": ...}]}`.
    async fn get_history(&self, id: &str) -> Result<String, ContractError>;
}
