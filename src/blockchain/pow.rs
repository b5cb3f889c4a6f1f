use log::debug;

use super::{DEFAULT_DIFFICULTY, hasher};
use crate::error::ProofError;

/// Proof-of-work puzzle: find `p` such that `sha256("{last_proof}{p}")`
/// starts with `difficulty` zero hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
    max_iterations: Option<u64>,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY, None)
    }
}

impl ProofOfWork {
    pub fn new(difficulty: usize, max_iterations: Option<u64>) -> Self {
        Self {
            difficulty,
            max_iterations,
        }
    }

    #[cfg(test)]
    pub fn with_difficulty(difficulty: usize) -> Self {
        Self::new(difficulty, None)
    }

    /// Check whether `proof` solves the puzzle relative to `last_proof`.
    pub fn verify(&self, last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        let hash = hasher::sha256_hex(guess.as_bytes());
        hash.bytes().take_while(|&c| c == b'0').count() >= self.difficulty
    }

    /// Linear search from 0 for the first proof accepted by [`verify`](Self::verify).
    /// Only fails when an iteration cap is configured and reached.
    pub fn solve(&self, last_proof: u64) -> Result<u64, ProofError> {
        let mut proof: u64 = 0;
        loop {
            if let Some(cap) = self.max_iterations {
                if proof >= cap {
                    return Err(ProofError::IterationCapReached { last_proof, cap });
                }
            }
            if self.verify(last_proof, proof) {
                debug!(
                    "POW - solved last_proof={} proof={} difficulty={}",
                    last_proof, proof, self.difficulty
                );
                return Ok(proof);
            }
            proof += 1;
        }
    }
}
