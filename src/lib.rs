//! Sealchain - a minimal hash-chained ledger sealed with proof-of-work
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Block sealing, the chain, and chain verification
//! - [`transaction`] - Transaction type
//! - [`mempool`] - Pending transactions awaiting the next block
//!
//! ## Proof-of-Work
//! - [`miner`] - Nonce search with cancellation
//!
//! ## Cryptography
//! - [`crypto`] - Content hashing (SHA-256)
//!
//! ## Shared Access
//! - [`node`] - Mutex-guarded ledger handle for multi-threaded callers
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - Terminal rendering

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod mempool;
pub mod transaction;

// ============================================================================
// Proof-of-Work
// ============================================================================
pub mod miner;

// ============================================================================
// Cryptography
// ============================================================================
pub mod crypto;

// ============================================================================
// Shared Access
// ============================================================================
pub mod node;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod cli;
pub mod config;
pub mod error;
