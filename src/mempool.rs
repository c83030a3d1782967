//! Transaction mempool: pending transfers waiting for the next sealed block

use crate::error::{ChainError, Result};
use crate::transaction::Transaction;

#[derive(Debug, Clone, Default)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transaction from its fields and queue it. Insertion order is kept.
    pub fn add(&mut self, sender: &str, recipient: &str, amount: f64) -> Transaction {
        let tx = Transaction::new(sender, recipient, amount);
        self.transactions.push(tx.clone());
        tx
    }

    /// Take every pending transaction, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// JSON snapshot of the pending transactions, `[]` when empty.
    pub fn snapshot_payload(&self) -> Result<String> {
        encode_payload(&self.transactions)
    }
}

/// JSON has no encoding for NaN or infinity, so a pool holding one cannot be sealed.
pub(crate) fn encode_payload(transactions: &[Transaction]) -> Result<String> {
    if let Some(tx) = transactions.iter().find(|tx| !tx.amount.is_finite()) {
        return Err(ChainError::SerializationFailure(format!(
            "transaction {} has non-finite amount {}",
            tx.id, tx.amount
        )));
    }
    Ok(serde_json::to_string(transactions)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut pool = Mempool::new();
        let first = pool.add("Alice", "Bob", 10.5);
        let second = pool.add("Bob", "Charlie", 20.0);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.transactions()[0], first);
        assert_eq!(pool.transactions()[1], second);
    }

    #[test]
    fn test_drain_empties_pool() {
        let mut pool = Mempool::new();
        pool.add("Alice", "Bob", 1.0);
        pool.add("Alice", "Bob", 1.0);
        let drained = pool.drain();
        assert_eq!(drained.len(), 2);
        assert!(pool.is_empty());
        assert!(pool.drain().is_empty());
    }

    #[test]
    fn test_empty_payload_is_json_array() {
        let pool = Mempool::new();
        assert_eq!(pool.snapshot_payload().unwrap(), "[]");
    }

    #[test]
    fn test_non_finite_amount_fails_encoding() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut pool = Mempool::new();
            pool.add("Alice", "Bob", 1.0);
            pool.add("Alice", "Bob", amount);
            assert!(matches!(
                pool.snapshot_payload(),
                Err(ChainError::SerializationFailure(_))
            ));
            assert_eq!(pool.len(), 2);
        }
    }

    #[test]
    fn test_payload_round_trips() {
        let mut pool = Mempool::new();
        pool.add("Alice", "Bob", 10.5);
        let payload = pool.snapshot_payload().unwrap();
        let decoded: Vec<Transaction> = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, pool.transactions());
    }
}
