pub mod consensus;
pub mod fetch;
pub mod peers;

pub use consensus::ConsensusResolver;
pub use fetch::{ChainFetcher, HttpChainFetcher, RemoteChain};
pub use peers::PeerSet;
