//! # Tender Contract - Ledger-Backed Record Store
//!
//! Business-logic core for the Tender record store: a single entity type
//! persisted as key/value state in an externally supplied transactional
//! ledger, with CRUD, existence checks, full-range enumeration, rich
//! predicate queries, and per-key audit history.
//!
//! ## Architecture
//!
//! Hexagonal: the repository ([`service::TenderService`]) is stateless
//! over an injected Ledger Access Port and never sees a backend-specific
//! type.
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Entity + envelopes | `domain/entities.rs` | Tender, read models, response shapes |
//! | Codec | `domain/codec.rs` | Tender <-> stored JSON payload |
//! | Result Assembler | `domain/assembler.rs` | read-with-txid + history envelopes |
//! | Ledger Access Port | `ports/outbound.rs` | get/put/delete/scan/query/history |
//! | Invocation surface | `ports/inbound.rs` | one entry point per operation |
//! | Repository | `service.rs` | CRUD + query/history reconstruction |
//! | Test backend | `adapters/memory_ledger.rs` | in-memory ledger with history log |
//!
//! ## Error taxonomy
//!
//! `NotFound` / `AlreadyExists` are recoverable business outcomes;
//! `Backend`, `Decode`, `Encode` and `HistoryRead` abort the enclosing
//! ledger transaction. See [`errors::ContractError`].
//!
//! ## Out of scope
//!
//! Consensus, block validation, gossip, endorsement policy and ordering
//! belong to the surrounding ledger platform. Process bootstrap lives in
//! the `tender-node` crate.
//!
//! ## Usage Example
//!
//! ```
//! use tender_contract::prelude::*;
//!
//! # async fn demo() -> Result<(), ContractError> {
//! let contract = TenderService::new(InMemoryLedger::new());
//! contract
//!     .create_data("T1", "TID1", "AC1", "A1", "N1", "USD", "B1", "100", "OPEN")
//!     .await?;
//! let envelope = contract.read_data("T1").await?;
//! assert!(envelope.contains("\"txid\""));
//! # Ok(())
//! # }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        HistoryEntry, HistoryEnvelope, KeyModification, KeyValue, QueryResult, ReadEnvelope,
        Tender,
    };

    // Codec + assembler
    pub use crate::domain::assembler::{assemble_history, assemble_read};
    pub use crate::domain::codec::{decode, encode};

    // Ports
    pub use crate::ports::inbound::ContractApi;
    pub use crate::ports::outbound::{HistoryIterator, LedgerStore, StateIterator};

    // Errors
    pub use crate::errors::{ContractError, LedgerError};

    // Adapters
    pub use crate::adapters::InMemoryLedger;

    // Service
    pub use crate::service::TenderService;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
