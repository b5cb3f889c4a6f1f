use log::{debug, info};

use super::{Block, GENESIS_PREVIOUS_HASH, ProofOfWork, hasher};
use crate::error::LedgerError;
use crate::transaction::{Amount, Transaction};

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug, Clone)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    pow: ProofOfWork,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(ProofOfWork::default())
    }
}

impl Ledger {
    /// Initialize a new ledger with its genesis block already sealed.
    pub fn new(pow: ProofOfWork) -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            pow,
        }
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// When `previous_hash` is `None` it is derived from the current tail.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> Block {
        let previous_hash = previous_hash.unwrap_or_else(|| match self.chain.last() {
            Some(last) => hasher::digest(last),
            None => GENESIS_PREVIOUS_HASH.to_string(),
        });
        let transactions = std::mem::take(&mut self.pending);
        let block = Block::new(self.next_index(), transactions, proof, previous_hash);
        self.chain.push(block.clone());
        info!(
            "LEDGER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        block
    }

    /// Queue a transaction and return the index of the block expected to hold it.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> u64 {
        self.queue(Transaction::new(sender, recipient, amount))
    }

    /// Queue an already built transaction, such as a mining reward.
    pub fn queue(&mut self, tx: Transaction) -> u64 {
        debug!(
            "LEDGER - queued tx {} -> {} ({}), pool size {}",
            tx.sender,
            tx.recipient,
            tx.amount,
            self.pending.len() + 1
        );
        self.pending.push(tx);
        self.next_index()
    }

    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Check hash linkage and proof-of-work for every adjacent pair of `chain`
    /// using this ledger's puzzle. Local state is not consulted.
    pub fn is_valid_chain(&self, chain: &[Block]) -> bool {
        validate_chain(&self.pow, chain)
    }

    /// Swap in a chain adopted by consensus. The pending pool is kept.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        info!(
            "LEDGER - chain replaced: {} -> {} blocks",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn pow(&self) -> &ProofOfWork {
        &self.pow
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    fn next_index(&self) -> u64 {
        self.chain.last().map_or(1, |b| b.index + 1)
    }
}

/// Validity rule shared by the ledger and consensus: every block links to the
/// digest of its predecessor and solves the puzzle relative to its proof.
/// A single block is valid; an empty chain is not.
pub fn validate_chain(pow: &ProofOfWork, chain: &[Block]) -> bool {
    if chain.is_empty() {
        return false;
    }
    chain.windows(2).all(|pair| {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.previous_hash != hasher::digest(prev) {
            debug!("LEDGER - block #{} breaks hash linkage", curr.index);
            return false;
        }
        if !pow.verify(prev.proof, curr.proof) {
            debug!("LEDGER - block #{} carries an invalid proof", curr.index);
            return false;
        }
        true
    })
}
