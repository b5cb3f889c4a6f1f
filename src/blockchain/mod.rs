pub mod block;
pub mod hasher;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::Ledger;
pub use pow::ProofOfWork;

/// Default Proof-of-Work difficulty (number of leading zero hex digits).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Coins credited to the node for each mined block.
pub const MINING_REWARD: u64 = 1;
