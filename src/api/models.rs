use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::network::ChainFetcher;
use crate::node::Node;
use crate::transaction::{Amount, Transaction};

/// Shared application state: the node plus the client used to reach peers.
pub struct AppState {
    pub node: Node,
    pub fetcher: Box<dyn ChainFetcher>,
}

impl AppState {
    pub fn new(node: Node, fetcher: impl ChainFetcher + 'static) -> Self {
        Self {
            node,
            fetcher: Box::new(fetcher),
        }
    }
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- TX API Models ---------- */

/// Every field is optional so missing ones can be reported by name.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Amount>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ResolveResponse {
    Replaced { message: String, new_chain: Vec<Block> },
    Authoritative { message: String, chain: Vec<Block> },
}
