//! # Domain Layer
//!
//! Entities, the entity codec, and the result assembler. Pure logic with
//! no backend dependencies; everything here is reachable from the
//! service without touching a port.

pub mod assembler;
pub mod codec;
pub mod entities;
