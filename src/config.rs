//! Configuration management for Sealchain

use crate::crypto::HASH_HEX_LEN;
use crate::error::{ChainError, Result};
use crate::miner::DEFAULT_PROGRESS_INTERVAL;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "sealchain.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub miner: MinerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    #[serde(default = "default_genesis_previous_hash")]
    pub genesis_previous_hash: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            genesis_previous_hash: default_genesis_previous_hash(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MinerConfig {
    /// Give up after this many nonces. Unbounded when absent.
    #[serde(default)]
    pub max_attempts: Option<u64>,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            max_attempts: None,
            progress_interval: default_progress_interval(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.ledger.difficulty as usize > HASH_HEX_LEN {
            return Err(ChainError::ConfigError(format!(
                "ledger.difficulty must be at most {}, got {}",
                HASH_HEX_LEN, self.ledger.difficulty
            )));
        }
        if self.ledger.genesis_previous_hash.is_empty() {
            return Err(ChainError::ConfigError(
                "ledger.genesis_previous_hash must not be empty".to_string(),
            ));
        }
        if self.miner.progress_interval == 0 {
            return Err(ChainError::ConfigError(
                "miner.progress_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load `sealchain.toml` from the working directory, using defaults when it is absent.
pub fn load_config() -> Result<Config> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config_from(path)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

fn default_difficulty() -> u32 {
    2
}

fn default_genesis_previous_hash() -> String {
    "0000".to_string()
}

fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}
