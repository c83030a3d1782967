//! Transaction type carried in block payloads

use crate::crypto::calculate_hash;
use serde::{Deserialize, Serialize};

/// A value transfer waiting in the mempool or embedded in a sealed block.
///
/// Transactions are not validated: any sender, recipient or amount
/// (including zero or negative values) is accepted. Non-finite amounts are
/// accepted into the pool but fail when the pool is sealed into a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    pub id: String,
    #[serde(rename = "sender_blockchain_address")]
    pub sender: String,
    #[serde(rename = "recipient_blockchain_address")]
    pub recipient: String,
    #[serde(rename = "value")]
    pub amount: f64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        let sender = sender.into();
        let recipient = recipient.into();
        let id = Self::derive_id(&sender, &recipient, amount);
        Transaction {
            id,
            sender,
            recipient,
            amount,
        }
    }

    /// The id hashes `(sender, integer part of amount, recipient)`, so two
    /// transfers between the same parties whose amounts share an integer part
    /// get the same id.
    pub fn derive_id(sender: &str, recipient: &str, amount: f64) -> String {
        calculate_hash(sender, amount.trunc() as i64, recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_derived_from_fields() {
        let tx = Transaction::new("Alice", "Bob", 10.5);
        assert_eq!(tx.id, calculate_hash("Alice", 10, "Bob"));
        assert_eq!(tx.sender, "Alice");
        assert_eq!(tx.recipient, "Bob");
        assert_eq!(tx.amount, 10.5);
    }

    #[test]
    fn test_identical_fields_collide() {
        let a = Transaction::new("Alice", "Bob", 10.5);
        let b = Transaction::new("Alice", "Bob", 10.9);
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, Transaction::new("Bob", "Alice", 10.5).id);
    }

    #[test]
    fn test_permissive_amounts() {
        let neg = Transaction::new("", "", -3.7);
        assert_eq!(neg.id, calculate_hash("", -3, ""));
        let zero = Transaction::new("x", "y", 0.0);
        assert_eq!(zero.amount, 0.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let tx = Transaction::new("Alice", "Bob", 20.0);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["sender_blockchain_address"], "Alice");
        assert_eq!(json["recipient_blockchain_address"], "Bob");
        assert_eq!(json["value"], 20.0);
        assert_eq!(json["transaction_id"], tx.id.as_str());
    }
}
