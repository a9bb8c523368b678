//! Extraction of human-readable reasons from peer diagnostic strings.
//!
//! Peers wrap the interesting part of a rejection in transport and
//! chaincode framing, e.g.
//! `"chaincode error: Incorrect number of arguments. Expecting 5"`.
//! This module strips the framing; it is pure text processing.

/// Prefixes peers put in front of the actual rejection reason.
/// Matched against the last occurrence so nested framing unwraps to
/// the innermost message.
const DIAGNOSTIC_MARKERS: &[&str] = &[
    "chaincode error:",
    "transaction returned with failure:",
    "message:",
    "description=",
];

/// Returns the text after the innermost known marker, trimmed, or
/// `None` when no marker matches or nothing follows it.
pub fn parse_peer_diagnostic(message: &str) -> Option<String> {
    let mut cut: Option<usize> = None;
    for marker in DIAGNOSTIC_MARKERS {
        if let Some(pos) = message.rfind(marker) {
            let end = pos + marker.len();
            cut = Some(cut.map_or(end, |c| c.max(end)));
        }
    }

    cut.map(|end| message[end..].trim().to_string())
        .filter(|reason| !reason.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chaincode_error_prefix_is_stripped() {
        let reason =
            parse_peer_diagnostic("chaincode error: Incorrect number of arguments. Expecting 5");
        assert_eq!(reason.as_deref(), Some("Incorrect number of arguments. Expecting 5"));
    }

    #[test]
    fn test_innermost_marker_wins() {
        let msg = "transaction returned with failure: chaincode error: asset not found";
        assert_eq!(parse_peer_diagnostic(msg).as_deref(), Some("asset not found"));
    }

    #[test]
    fn test_unknown_framing_returns_none() {
        assert_eq!(parse_peer_diagnostic("connection refused"), None);
    }

    #[test]
    fn test_marker_with_nothing_after_returns_none() {
        assert_eq!(parse_peer_diagnostic("chaincode error:   "), None);
    }
}
