//! # Entity Codec
//!
//! Serializes the Tender record to and from its stored JSON payload.
//!
//! Decoding is tolerant: missing fields default to the empty string and
//! unknown fields are ignored. The stored schema carries no version
//! marker, so strictness would turn every additive change into a decode
//! failure across the whole keyspace.

use crate::domain::entities::Tender;
use crate::errors::ContractError;

/// Encode a Tender into its stored payload.
///
/// # Errors
///
/// Returns [`ContractError::Encode`] if serialization fails. This should
/// not occur for well-formed input but is surfaced, never swallowed.
pub fn encode(record: &Tender) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(record).map_err(|e| ContractError::Encode(e.to_string()))
}

/// Decode a stored payload into a Tender.
///
/// # Errors
///
/// Returns [`ContractError::Decode`] if the payload is not a well-formed
/// JSON object.
pub fn decode(payload: &[u8]) -> Result<Tender, ContractError> {
    serde_json::from_slice(payload).map_err(|e| ContractError::Decode(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
