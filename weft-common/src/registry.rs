use std::collections::HashSet;

use crate::errors::InvokeError;
use crate::peer::Peer;

/// Collapses a caller-supplied peer list to peers unique by name,
/// keeping the first occurrence and its position.
///
/// Fails with [`InvokeError::NoPeers`] when nothing survives, which is
/// the only failure mode; no network capability is touched here.
pub fn dedup_peers(peers: Vec<Peer>) -> Result<Vec<Peer>, InvokeError> {
    let mut seen = HashSet::new();
    let unique: Vec<Peer> = peers
        .into_iter()
        .filter(|p| seen.insert(p.name.clone()))
        .collect();

    if unique.is_empty() {
        return Err(InvokeError::NoPeers);
    }
    Ok(unique)
}
