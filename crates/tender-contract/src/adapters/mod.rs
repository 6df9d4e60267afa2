//! # Adapters
//!
//! Implementations of the outbound port. Only the in-memory test double
//! lives here; the production adapter belongs to the hosting platform.

pub mod memory_ledger;

pub use memory_ledger::InMemoryLedger;
