use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Quantity moved by a transaction. Kept as the exact JSON number received so
/// that peers re-hash byte-identical blocks.
pub type Amount = Number;

/// Sender reserved for coins minted by the node as a mining reward.
pub const REWARD_SENDER: &str = "0";

/// A transfer waiting in the pool or sealed inside a block.
/// No signature or balance checks are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Amount,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// Coinbase-style credit paying `amount` to `recipient`.
    pub fn reward(recipient: impl Into<String>, amount: u64) -> Self {
        Self::new(REWARD_SENDER, recipient, amount)
    }

    #[cfg(test)]
    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_uses_reserved_sender() {
        let tx = Transaction::reward("abc", 1);
        assert!(tx.is_reward());
        assert_eq!(tx.recipient, "abc");
        assert_eq!(tx.amount, Number::from(1u64));
    }

    #[test]
    fn amount_is_kept_verbatim() {
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"a","recipient":"b","amount":-2.5}"#).unwrap();
        assert_eq!(tx.amount.as_f64(), Some(-2.5));
        assert_eq!(
            serde_json::to_string(&tx).unwrap(),
            r#"{"sender":"a","recipient":"b","amount":-2.5}"#
        );
    }
}
