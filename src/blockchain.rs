// Thin re-export module: implementation is in `blockchain/core.rs`, split into
// block sealing, chain management and chain verification.

pub mod core;
pub use core::*;
