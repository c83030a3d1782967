//! Hashing primitives for Sealchain

use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Hash the concatenation `a || decimal(n) || b` and return lowercase hex.
///
/// Every hash in the ledger goes through this function: transaction ids,
/// proof-of-work candidates and block hashes.
pub fn calculate_hash<N: Display>(a: &str, n: N, b: &str) -> String {
    let data = format!("{}{}{}", a, n, b);
    sha256_hex(data.as_bytes())
}

/// Hash of a block. The leading field is the timestamp followed by the
/// fixed-width digest of the payload, so bytes cannot shift between the two.
pub fn block_hash(timestamp: &str, payload: &str, nonce: u64, previous_hash: &str) -> String {
    let head = format!("{}{}", timestamp, sha256_hex(payload.as_bytes()));
    calculate_hash(&head, nonce, previous_hash)
}

/// Plain SHA-256 over raw bytes, hex encoded.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Number of leading `'0'` hex characters in `hash`.
pub fn leading_zeros(hash: &str) -> usize {
    hash.chars().take_while(|c| *c == '0').count()
}

/// True when `hash` starts with at least `difficulty` zero hex digits.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    leading_zeros(hash) >= difficulty as usize
}
