use crate::crypto::{block_hash, meets_difficulty};
use crate::error::Result;
use crate::mempool::encode_payload;
use crate::miner::{CancelToken, ProofOfWork};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// A sealed block. `transactions` is the JSON snapshot of the pool at sealing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub timestamp: String,
    pub nonce: u64,
    pub previous_hash: String,
    pub current_hash: String,
    pub difficulty: u32,
    pub transactions: String,
}

impl Block {
    /// Mine and build a block chained off `previous_hash` that embeds `transactions`.
    pub fn seal(previous_hash: &str, difficulty: u32, transactions: &[Transaction]) -> Result<Self> {
        let pow = ProofOfWork::new(difficulty)?;
        Self::seal_with(previous_hash, &pow, transactions, &CancelToken::new())
    }

    /// The payload is encoded before any work is done, so an encoding failure
    /// costs nothing and yields no block.
    pub fn seal_with(
        previous_hash: &str,
        pow: &ProofOfWork,
        transactions: &[Transaction],
        cancel: &CancelToken,
    ) -> Result<Self> {
        let payload = encode_payload(transactions)?;
        let solution = pow.search(previous_hash, &payload, cancel)?;

        Ok(Block {
            timestamp: solution.timestamp,
            nonce: solution.nonce,
            previous_hash: previous_hash.to_string(),
            current_hash: solution.hash,
            difficulty: pow.difficulty(),
            transactions: payload,
        })
    }

    pub fn calculate_hash(&self) -> String {
        block_hash(&self.timestamp, &self.transactions, self.nonce, &self.previous_hash)
    }

    /// Stored hash matches the block's own fields.
    pub fn is_self_consistent(&self) -> bool {
        self.current_hash == self.calculate_hash()
    }

    pub fn meets_difficulty(&self) -> bool {
        meets_difficulty(&self.current_hash, self.difficulty)
    }

    /// Parse the payload back into transactions. Fails if it was overwritten with non-JSON.
    pub fn decode_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(serde_json::from_str(&self.transactions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainError;

    #[test]
    fn test_sealed_block_is_consistent() {
        let txs = vec![Transaction::new("Alice", "Bob", 10.5)];
        let block = Block::seal("0000", 1, &txs).unwrap();
        assert_eq!(block.previous_hash, "0000");
        assert_eq!(block.difficulty, 1);
        assert!(block.is_self_consistent());
        assert!(block.meets_difficulty());
        assert_eq!(block.decode_transactions().unwrap(), txs);
    }

    #[test]
    fn test_payload_edit_breaks_consistency() {
        let mut block = Block::seal("0000", 0, &[]).unwrap();
        assert_eq!(block.transactions, "[]");
        block.transactions = "forged".to_string();
        assert!(!block.is_self_consistent());
        assert!(matches!(
            block.decode_transactions(),
            Err(ChainError::SerializationFailure(_))
        ));
    }

    #[test]
    fn test_seal_respects_cancellation() {
        let pow = ProofOfWork::new(64).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = Block::seal_with("0000", &pow, &[], &cancel);
        assert_eq!(result.unwrap_err(), ChainError::MiningCancelled);
    }
}
