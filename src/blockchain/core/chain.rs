use super::block::Block;
use super::validation::{verify_chain, ChainStatus};
use crate::config::{Config, MinerConfig};
use crate::error::{ChainError, Result};
use crate::mempool::Mempool;
use crate::miner::{CancelToken, ProofOfWork};
use crate::transaction::Transaction;
use tracing::{info, warn};

/// Previous hash recorded in the first block of every chain.
pub const GENESIS_PREVIOUS_HASH: &str = "0000";

/// An append-only sequence of sealed blocks plus the pool feeding the next one.
#[derive(Debug, Clone)]
pub struct Blockchain {
    blocks: Vec<Block>,
    mempool: Mempool,
    genesis_previous_hash: String,
    miner: MinerConfig,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Create an empty chain with the default genesis sentinel and an unbounded miner.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            mempool: Mempool::new(),
            genesis_previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            miner: MinerConfig::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            blocks: Vec::new(),
            mempool: Mempool::new(),
            genesis_previous_hash: config.ledger.genesis_previous_hash.clone(),
            miner: config.miner.clone(),
        })
    }

    /// Queue a transaction for the next block.
    pub fn add_transaction(&mut self, sender: &str, recipient: &str, amount: f64) -> Transaction {
        self.mempool.add(sender, recipient, amount)
    }

    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    pub fn append_block(&mut self, difficulty: u32) -> Result<Block> {
        self.append_block_with_cancel(difficulty, &CancelToken::new())
    }

    /// Seal the pending transactions into a new block and append it.
    ///
    /// The pool is only drained once sealing succeeds. On any error the chain
    /// and pool are left exactly as they were.
    pub fn append_block_with_cancel(&mut self, difficulty: u32, cancel: &CancelToken) -> Result<Block> {
        let pow = ProofOfWork::new(difficulty)?
            .with_max_attempts(self.miner.max_attempts)
            .with_progress_interval(self.miner.progress_interval);
        let previous_hash = self.last_hash().to_string();

        let block = Block::seal_with(&previous_hash, &pow, self.mempool.transactions(), cancel)?;

        let included = self.mempool.drain();
        self.blocks.push(block.clone());
        info!(
            "Sealed block {} with {} transactions (nonce = {}, hash = {})",
            self.blocks.len() - 1,
            included.len(),
            block.nonce,
            block.current_hash
        );
        Ok(block)
    }

    /// Hash the next block will chain off: the genesis sentinel while the chain is empty.
    pub fn last_hash(&self) -> &str {
        self.blocks
            .last()
            .map(|b| b.current_hash.as_str())
            .unwrap_or(self.genesis_previous_hash.as_str())
    }

    pub fn genesis_previous_hash(&self) -> &str {
        &self.genesis_previous_hash
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Negative indices cannot be expressed; anything at or past the end is `IndexOutOfRange`.
    pub fn get_block(&self, index: usize) -> Result<&Block> {
        self.blocks.get(index).ok_or(ChainError::IndexOutOfRange {
            index,
            len: self.blocks.len(),
        })
    }

    pub fn verify(&self) -> ChainStatus {
        let status = verify_chain(&self.blocks, &self.genesis_previous_hash);
        if !status.is_valid() {
            warn!("{}", status);
        }
        status
    }

    /// Overwrite a sealed block's payload and rehash it in place, as an attacker
    /// rewriting history would. The successor's link no longer matches, which
    /// `verify` reports.
    pub fn tamper_block(&mut self, index: usize, payload: impl Into<String>) -> Result<()> {
        let len = self.blocks.len();
        let block = self
            .blocks
            .get_mut(index)
            .ok_or(ChainError::IndexOutOfRange { index, len })?;
        block.transactions = payload.into();
        block.current_hash = block.calculate_hash();
        warn!("Block {} payload overwritten, new hash {}", index, block.current_hash);
        Ok(())
    }
}
