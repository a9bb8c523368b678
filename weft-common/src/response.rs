use serde::{Deserialize, Serialize};

/// What one endorsing peer answered to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerResponse {
    /// The peer simulated the proposal and returned a status plus the
    /// application-level result bytes. Status 200 is the sole success
    /// criterion.
    Endorsement { status: u16, payload: Vec<u8> },
    /// The peer answered with a diagnostic instead of an endorsement.
    Failure { message: String },
}

/// Application result carried by a good endorsement.
///
/// Payload bytes are parsed as JSON when possible; anything that does
/// not parse stays opaque text. Keeping the two shapes as an explicit
/// union lets callers branch without re-probing the bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum EndorsementPayload {
    Structured(serde_json::Value),
    Raw(String),
}

impl EndorsementPayload {
    pub fn decode(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => EndorsementPayload::Structured(value),
            Err(_) => EndorsementPayload::Raw(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            EndorsementPayload::Structured(value) => Some(value),
            EndorsementPayload::Raw(_) => None,
        }
    }
}

impl std::fmt::Display for EndorsementPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndorsementPayload::Structured(value) => write!(f, "{}", value),
            EndorsementPayload::Raw(text) => write!(f, "{}", text),
        }
    }
}
