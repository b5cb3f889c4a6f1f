use std::collections::BTreeSet;

use url::Url;

use crate::error::PeerError;

/// Known peers, stored as `host[:port]` and iterated in sorted order.
#[derive(Debug, Default, Clone)]
pub struct PeerSet {
    peers: BTreeSet<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer by any URI-ish address; only its network location is kept.
    /// Returns the canonical location that was stored.
    pub fn register(&mut self, address: &str) -> Result<String, PeerError> {
        let location = canonical_location(address)?;
        self.peers.insert(location.clone());
        Ok(location)
    }

    pub fn list(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Reduce `address` to `host[:port]`. Scheme, credentials, path, query and
/// fragment are dropped; a bare `host:port` is read as `http://host:port`.
/// A port written in the address is kept even when it is the scheme default,
/// since peers are always fetched over plain `http://`.
pub fn canonical_location(address: &str) -> Result<String, PeerError> {
    let invalid = || PeerError::InvalidAddress(address.to_string());

    let trimmed = address.trim();
    let url = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{trimmed}"))
    }
    .map_err(|_| invalid())?;

    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let port = match url.port() {
        Some(port) => Some(port),
        None if has_explicit_port(trimmed) => url.port_or_known_default(),
        None => None,
    };
    Ok(match port {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

// `Url` forgets a port equal to the scheme default, so look at the raw authority.
fn has_explicit_port(address: &str) -> bool {
    let rest = address.split_once("://").map_or(address, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let after_host = match host_port.rfind(']') {
        Some(end) => &host_port[end + 1..],
        None => host_port,
    };
    after_host
        .split_once(':')
        .is_some_and(|(_, port)| !port.is_empty())
}
