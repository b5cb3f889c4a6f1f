use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A sealed entry of the ledger. Field names are part of the hashed encoding
/// and of the wire format exchanged with peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds (UTC), sub-second precision
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Build a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// The first block of every ledger.
    pub fn genesis() -> Self {
        Self::new(
            1,
            Vec::new(),
            GENESIS_PROOF,
            GENESIS_PREVIOUS_HASH.to_string(),
        )
    }

    #[cfg(test)]
    pub fn is_genesis(&self) -> bool {
        self.index == 1 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    #[test]
    fn genesis_has_fixed_fields() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert_eq!(b.proof, 100);
        assert_eq!(b.previous_hash, "1");
        assert!(b.transactions.is_empty());
        assert!(b.is_genesis());
        assert!(b.timestamp > 0.0);
    }

    #[test]
    fn decodes_peer_payload() {
        let raw = r#"{
            "index": 2,
            "previous_hash": "abc",
            "proof": 35293,
            "timestamp": 1700000000.25,
            "transactions": [{"amount": 1, "recipient": "r", "sender": "0"}]
        }"#;
        let b: Block = serde_json::from_str(raw).unwrap();
        assert_eq!(b.index, 2);
        assert_eq!(b.timestamp, 1700000000.25);
        assert_eq!(b.transactions, vec![Transaction::reward("r", 1)]);
        assert!(!b.is_genesis());
    }
}
