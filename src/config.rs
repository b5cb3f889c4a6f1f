use std::env;
use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, MINING_REWARD, ProofOfWork};
use crate::error::ConfigError;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub node_id: String,
    pub difficulty: usize,
    pub max_iterations: Option<u64>,
    pub reward: u64,
    pub peer_timeout: Duration,
    pub peers: Vec<String>,
}

impl NodeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 5000)?;
        let node_id = lookup("NODE_ID")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let difficulty = parse_or(&lookup, "POW_DIFFICULTY", DEFAULT_DIFFICULTY)?;
        let max_iterations = parse_opt(&lookup, "POW_MAX_ITERATIONS")?;
        let reward = parse_or(&lookup, "MINING_REWARD", MINING_REWARD)?;
        let peer_timeout = Duration::from_secs(parse_or(&lookup, "PEER_TIMEOUT_SECS", 5)?);
        let peers = lookup("PEERS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            node_id,
            difficulty,
            max_iterations,
            reward,
            peer_timeout,
            peers,
        })
    }

    pub fn pow(&self) -> ProofOfWork {
        ProofOfWork::new(self.difficulty, self.max_iterations)
    }
}

fn parse_opt<L, T>(lookup: &L, key: &'static str) -> Result<Option<T>, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn parse_or<L, T>(lookup: &L, key: &'static str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
