use super::block::Block;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// `previous_hash` does not match the predecessor's hash (or the genesis sentinel).
    BrokenLink,
    /// Stored `current_hash` does not match the block's own fields.
    HashMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStatus {
    Valid,
    Invalid { index: usize, reason: InvalidReason },
}

impl ChainStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ChainStatus::Valid)
    }

    pub fn invalid_index(&self) -> Option<usize> {
        match self {
            ChainStatus::Valid => None,
            ChainStatus::Invalid { index, .. } => Some(*index),
        }
    }
}

impl fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainStatus::Valid => write!(f, "Blockchain is valid"),
            ChainStatus::Invalid { index, reason } => {
                let why = match reason {
                    InvalidReason::BrokenLink => "previous hash does not match",
                    InvalidReason::HashMismatch => "block hash does not match its contents",
                };
                write!(f, "Blockchain is invalid at block {}: {}", index, why)
            }
        }
    }
}

/// Walk the chain from the first block and report the first block that either
/// does not link to its predecessor or whose stored hash disagrees with its fields.
///
/// Proof-of-work is not re-checked here. A block whose payload was rewritten and
/// rehashed stays self-consistent, and the break shows up at its successor.
pub fn verify_chain(blocks: &[Block], genesis_previous_hash: &str) -> ChainStatus {
    let mut expected_previous = genesis_previous_hash;
    for (index, block) in blocks.iter().enumerate() {
        if block.previous_hash != expected_previous {
            return ChainStatus::Invalid {
                index,
                reason: InvalidReason::BrokenLink,
            };
        }
        if !block.is_self_consistent() {
            return ChainStatus::Invalid {
                index,
                reason: InvalidReason::HashMismatch,
            };
        }
        expected_previous = &block.current_hash;
    }
    ChainStatus::Valid
}
