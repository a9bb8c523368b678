use serde::{Deserialize, Serialize};

/// A network peer able to endorse and validate transactions.
///
/// Peers are supplied by the caller per invocation and never mutated.
/// `name` is the peer's common name and acts as the identity key when
/// deduplicating a candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub name: String,
    /// Endpoint proposals are sent to.
    pub endpoint: String,
    /// Endpoint the commit-event channel connects to.
    pub event_endpoint: String,
    /// Identity trusted by this peer's event channel. Event
    /// registrations are signed with it, not with the identity that
    /// submitted the proposal.
    pub admin_identity: String,
}

impl Peer {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        event_endpoint: impl Into<String>,
        admin_identity: impl Into<String>,
    ) -> Self {
        Peer {
            name: name.into(),
            endpoint: endpoint.into(),
            event_endpoint: event_endpoint.into(),
            admin_identity: admin_identity.into(),
        }
    }
}

impl std::fmt::Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.endpoint)
    }
}
