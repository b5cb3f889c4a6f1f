use thiserror::Error;

/// Raised when the ledger is asked for its tail before genesis exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("chain is empty: genesis block missing")]
    EmptyChain,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("no proof found for last_proof={last_proof} within {cap} iterations")]
    IterationCapReached { last_proof: u64, cap: u64 },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeerError {
    #[error("invalid peer address: {0:?}")]
    InvalidAddress(String),
}

/// Reasons a peer's chain could not be retrieved. Never surfaced past consensus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("peer answered with HTTP {0}")]
    Status(u16),
    #[error("undecodable chain payload: {0}")]
    Decode(String),
    #[error("peer reported length {reported} but sent {actual} blocks")]
    LengthMismatch { reported: usize, actual: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
