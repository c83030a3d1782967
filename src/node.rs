//! Shared ledger handle for callers on several threads
//!
//! All access goes through one mutex. Sealing holds it across
//! read-last-hash, proof-of-work and append, so two sealers can never mine
//! against the same stale tip. Submitters wait while a block is being mined.

use crate::blockchain::{Block, Blockchain, ChainStatus};
use crate::config::Config;
use crate::error::Result;
use crate::miner::CancelToken;
use crate::transaction::Transaction;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Node {
    pub config: Config,
    blockchain: Arc<Mutex<Blockchain>>,
    cancel: CancelToken,
}

impl Node {
    pub fn new(config: Config) -> Result<Self> {
        let blockchain = Blockchain::from_config(&config)?;
        info!(
            "Starting ledger node (difficulty = {}, genesis = {})",
            config.ledger.difficulty, config.ledger.genesis_previous_hash
        );
        Ok(Self {
            config,
            blockchain: Arc::new(Mutex::new(blockchain)),
            cancel: CancelToken::new(),
        })
    }

    pub fn submit_transaction(&self, sender: &str, recipient: &str, amount: f64) -> Transaction {
        self.blockchain.lock().add_transaction(sender, recipient, amount)
    }

    /// Seal at the configured difficulty.
    pub fn seal(&self) -> Result<Block> {
        self.seal_block(self.config.ledger.difficulty)
    }

    pub fn seal_block(&self, difficulty: u32) -> Result<Block> {
        let mut chain = self.blockchain.lock();
        // A cancel aimed at a previous search must not abort this one.
        self.cancel.reset();
        chain.append_block_with_cancel(difficulty, &self.cancel)
    }

    /// Abort the search currently running under `seal_block`, if any.
    pub fn cancel_mining(&self) {
        self.cancel.cancel();
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.blockchain.lock().mempool().transactions().to_vec()
    }

    pub fn blocks(&self) -> Vec<Block> {
        self.blockchain.lock().blocks().to_vec()
    }

    pub fn get_block(&self, index: usize) -> Result<Block> {
        self.blockchain.lock().get_block(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.blockchain.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blockchain.lock().is_empty()
    }

    pub fn verify(&self) -> ChainStatus {
        self.blockchain.lock().verify()
    }

    pub fn tamper_block(&self, index: usize, payload: impl Into<String>) -> Result<()> {
        self.blockchain.lock().tamper_block(index, payload)
    }
}
