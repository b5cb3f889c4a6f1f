use log::{debug, info, warn};

use super::ChainFetcher;
use crate::blockchain::{Block, ProofOfWork, model::validate_chain};
use crate::node::Node;

/// Longest-valid-chain rule over the node's registered peers.
pub struct ConsensusResolver<'a> {
    fetcher: &'a dyn ChainFetcher,
}

impl<'a> ConsensusResolver<'a> {
    pub fn new(fetcher: &'a dyn ChainFetcher) -> Self {
        Self { fetcher }
    }

    /// Replace the node's chain with the longest valid peer chain, if any is
    /// strictly longer. Returns whether the chain was replaced.
    pub async fn resolve(&self, node: &Node) -> bool {
        let peers = node.peers();
        let (local_length, pow) = node.consensus_view();

        match self.longest_valid(&peers, local_length, &pow).await {
            Some(chain) => node.adopt_chain(chain),
            None => {
                debug!("CONSENSUS - local chain ({local_length} blocks) is authoritative");
                false
            }
        }
    }

    /// Scan `peers` in order and keep the first chain reaching each new
    /// maximum length above `local_length` that also validates under `pow`.
    /// Unreachable or malformed peers are skipped.
    pub async fn longest_valid(
        &self,
        peers: &[String],
        local_length: usize,
        pow: &ProofOfWork,
    ) -> Option<Vec<Block>> {
        let mut best_length = local_length;
        let mut best_chain = None;

        for peer in peers {
            let chain = match self
                .fetcher
                .fetch_chain(peer)
                .await
                .and_then(|remote| remote.into_checked())
            {
                Ok(chain) => chain,
                Err(e) => {
                    warn!("CONSENSUS - skipping peer {peer}: {e}");
                    continue;
                }
            };

            if chain.len() <= best_length {
                debug!(
                    "CONSENSUS - peer {peer} offers {} blocks, need more than {best_length}",
                    chain.len()
                );
                continue;
            }
            if !validate_chain(pow, &chain) {
                warn!("CONSENSUS - peer {peer} sent an invalid chain of {} blocks", chain.len());
                continue;
            }

            info!("CONSENSUS - peer {peer} leads with {} blocks", chain.len());
            best_length = chain.len();
            best_chain = Some(chain);
        }

        best_chain
    }
}
