//! # Ports
//!
//! Hexagonal boundaries of the contract core:
//! - `inbound` - the API the platform dispatcher drives
//! - `outbound` - the Ledger Access Port the repository depends on

pub mod inbound;
pub mod outbound;
