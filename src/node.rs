use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};

use crate::blockchain::{Block, Ledger, ProofOfWork, hasher};
use crate::config::NodeConfig;
use crate::error::{PeerError, ProofError};
use crate::network::{ChainFetcher, ConsensusResolver, PeerSet};
use crate::transaction::{Amount, Transaction};

/// One node's state: ledger (chain and pending pool behind a single lock),
/// known peers and the identity credited with mining rewards.
#[derive(Debug)]
pub struct Node {
    id: String,
    reward: u64,
    ledger: Mutex<Ledger>,
    peers: Mutex<PeerSet>,
}

impl Node {
    pub fn new(id: impl Into<String>, pow: ProofOfWork, reward: u64) -> Self {
        Self {
            id: id.into(),
            reward,
            ledger: Mutex::new(Ledger::new(pow)),
            peers: Mutex::new(PeerSet::new()),
        }
    }

    /// Build a node from configuration and register its bootstrap peers.
    pub fn from_config(config: &NodeConfig) -> Result<Self, PeerError> {
        let node = Self::new(config.node_id.clone(), config.pow(), config.reward);
        if !config.peers.is_empty() {
            node.register_peers(&config.peers)?;
        }
        Ok(node)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // A poisoned lock still holds a consistent ledger: every mutation is a
    // single push, drain or swap.
    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn peer_set(&self) -> MutexGuard<'_, PeerSet> {
        self.peers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Solve the puzzle for the current tail, credit the reward and seal a block.
    ///
    /// The search runs without holding the ledger lock. If the tail changed in
    /// the meantime the search restarts against the new tail.
    pub fn mine(&self) -> Result<Block, ProofError> {
        let (mut last, pow) = {
            let ledger = self.ledger();
            (ledger.last_block()?.clone(), *ledger.pow())
        };

        loop {
            let proof = pow.solve(last.proof)?;

            let mut ledger = self.ledger();
            let tail = ledger.last_block()?;
            if *tail != last {
                debug!(
                    "MINER - tail moved from #{} to #{} during search, retrying",
                    last.index, tail.index
                );
                last = tail.clone();
                continue;
            }

            ledger.queue(Transaction::reward(self.id.clone(), self.reward));
            let block = ledger.seal_block(proof, Some(hasher::digest(&last)));
            info!(
                "MINER - forged block #{} (proof={}, reward {} -> {})",
                block.index, block.proof, self.reward, self.id
            );
            return Ok(block);
        }
    }

    /// Queue a transaction; returns the index of the block expected to include it.
    pub fn submit_transaction(
        &self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> u64 {
        self.ledger().add_transaction(sender, recipient, amount)
    }

    #[cfg(test)]
    pub fn last_block(&self) -> Result<Block, crate::error::LedgerError> {
        self.ledger().last_block().cloned()
    }

    /// Copy of the chain and its length, taken under one lock.
    pub fn chain_snapshot(&self) -> (Vec<Block>, usize) {
        let ledger = self.ledger();
        (ledger.chain().to_vec(), ledger.len())
    }

    #[cfg(test)]
    pub fn pending_snapshot(&self) -> Vec<Transaction> {
        self.ledger().pending().to_vec()
    }

    pub fn is_chain_valid(&self) -> bool {
        let ledger = self.ledger();
        ledger.is_valid_chain(ledger.chain())
    }

    /// Register every address or none: one invalid address rejects the batch.
    /// Returns the full sorted peer list afterwards.
    pub fn register_peers<I, S>(&self, addresses: I) -> Result<Vec<String>, PeerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut peers = self.peer_set();
        let mut staged = peers.clone();
        for address in addresses {
            let location = staged.register(address.as_ref())?;
            debug!("PEERS - accepted {} as {location}", address.as_ref());
        }
        if staged.len() > peers.len() {
            info!("PEERS - {} -> {} known peers", peers.len(), staged.len());
        }
        *peers = staged;
        Ok(peers.list())
    }

    pub fn peers(&self) -> Vec<String> {
        self.peer_set().list()
    }

    /// Local chain length and puzzle, as needed to judge peer chains.
    pub fn consensus_view(&self) -> (usize, ProofOfWork) {
        let ledger = self.ledger();
        (ledger.len(), *ledger.pow())
    }

    /// Adopt `chain` if it is still strictly longer than the local chain.
    pub fn adopt_chain(&self, chain: Vec<Block>) -> bool {
        let mut ledger = self.ledger();
        if chain.len() <= ledger.len() {
            debug!(
                "CONSENSUS - candidate of {} blocks no longer beats local {}",
                chain.len(),
                ledger.len()
            );
            return false;
        }
        ledger.replace_chain(chain);
        true
    }

    /// Run the longest-valid-chain rule against all registered peers.
    pub async fn resolve(&self, fetcher: &dyn ChainFetcher) -> bool {
        ConsensusResolver::new(fetcher).resolve(self).await
    }
}
