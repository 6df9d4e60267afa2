//! # Error Types
//!
//! All error types for the Tender contract core.
//!
//! The backend reports failures as [`LedgerError`]; the repository wraps
//! them into the contract taxonomy ([`ContractError`]) so callers never
//! see backend-specific types.

use thiserror::Error;

// =============================================================================
// LEDGER ERRORS (Outbound Port)
// =============================================================================

/// Errors raised by the Ledger Access Port.
///
/// Implementations translate their native failures into these variants;
/// the repository never branches on anything finer-grained.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Connection to the ledger peer lost.
    #[error("ledger unavailable")]
    Unavailable,

    /// Read or write against the ledger failed.
    #[error("ledger I/O error: {0}")]
    Io(String),

    /// The rich-query expression was rejected by the backend.
    #[error("invalid query expression: {0}")]
    InvalidQuery(String),

    /// An iterator was pulled after the backend released it.
    #[error("iterator already closed")]
    IteratorClosed,
}

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Errors reported to the invocation dispatcher.
///
/// `NotFound` and `AlreadyExists` are expected business outcomes the
/// caller branches on; every other variant aborts the enclosing ledger
/// transaction.
#[derive(Debug, Error)]
pub enum ContractError {
    /// No record stored under the requested id.
    #[error("record {0} does not exist")]
    NotFound(String),

    /// A record with this id is already stored.
    #[error("record {0} already exists")]
    AlreadyExists(String),

    /// The ledger backend itself failed.
    #[error("ledger backend failure: {0}")]
    Backend(#[from] LedgerError),

    /// A stored payload could not be decoded as a Tender.
    #[error("malformed stored payload: {0}")]
    Decode(String),

    /// A Tender could not be encoded for storage.
    #[error("failed to encode record: {0}")]
    Encode(String),

    /// History iteration failed mid-stream.
    #[error("failed to read history record: {0}")]
    HistoryRead(String),
}

impl ContractError {
    /// Returns true for expected business outcomes the caller can
    /// recover from without aborting the transaction.
    #[must_use]
    pub fn is_business_outcome(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::AlreadyExists(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
