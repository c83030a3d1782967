//! Error types for Sealchain

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    IndexOutOfRange { index: usize, len: usize },
    SerializationFailure(String),
    InvalidDifficulty(u32),
    MiningCancelled,
    MiningExhausted(u64),
    ConfigError(String),
    IoError(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChainError::IndexOutOfRange { index, len } => {
                write!(f, "Block index {} out of range (chain length {})", index, len)
            }
            ChainError::SerializationFailure(msg) => write!(f, "Serialization failure: {}", msg),
            ChainError::InvalidDifficulty(d) => write!(
                f,
                "Invalid difficulty {}: a hash has at most {} hex digits",
                d,
                crate::crypto::HASH_HEX_LEN
            ),
            ChainError::MiningCancelled => write!(f, "Mining cancelled"),
            ChainError::MiningExhausted(attempts) => {
                write!(f, "Mining gave up after {} attempts", attempts)
            }
            ChainError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            ChainError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::SerializationFailure(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
