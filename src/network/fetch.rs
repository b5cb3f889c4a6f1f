use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::FetchError;

/// A peer's full chain as served by its `GET /chain` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl RemoteChain {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }

    /// Blocks of a payload whose reported length matches its content.
    pub fn into_checked(self) -> Result<Vec<Block>, FetchError> {
        if self.length != self.chain.len() {
            return Err(FetchError::LengthMismatch {
                reported: self.length,
                actual: self.chain.len(),
            });
        }
        Ok(self.chain)
    }
}

/// Capability to retrieve the chain held by a peer at `host[:port]`.
#[async_trait]
pub trait ChainFetcher: Send + Sync {
    async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, FetchError>;
}

/// Fetches `http://{peer}/chain` with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: reqwest::Client,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, FetchError> {
        let url = format!("http://{peer}/chain");
        debug!("FETCH - GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<RemoteChain>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::{ChainFetcher, RemoteChain};
    use crate::blockchain::{Block, Ledger, ProofOfWork, hasher};
    use crate::error::FetchError;

    /// Serves canned answers per peer location; unknown peers are unreachable.
    #[derive(Debug, Default)]
    pub struct StaticFetcher {
        responses: HashMap<String, Result<RemoteChain, FetchError>>,
    }

    impl StaticFetcher {
        pub fn with_chain(mut self, peer: &str, chain: Vec<Block>) -> Self {
            self.responses
                .insert(peer.to_string(), Ok(RemoteChain::new(chain)));
            self
        }

        pub fn with_payload(mut self, peer: &str, payload: RemoteChain) -> Self {
            self.responses.insert(peer.to_string(), Ok(payload));
            self
        }

        pub fn with_error(mut self, peer: &str, err: FetchError) -> Self {
            self.responses.insert(peer.to_string(), Err(err));
            self
        }
    }

    #[async_trait]
    impl ChainFetcher for StaticFetcher {
        async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, FetchError> {
            self.responses
                .get(peer)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Transport(format!("{peer} unreachable"))))
        }
    }

    /// A valid chain of `blocks` blocks (genesis included) mined with `pow`.
    pub fn mined_chain(pow: ProofOfWork, blocks: usize) -> Vec<Block> {
        let mut ledger = Ledger::new(pow);
        while ledger.len() < blocks {
            let last = ledger.last_block().unwrap().clone();
            let proof = pow.solve(last.proof).unwrap();
            ledger.add_transaction("0", format!("peer-{}", ledger.len()), 1);
            ledger.seal_block(proof, Some(hasher::digest(&last)));
        }
        ledger.chain().to_vec()
    }
}
