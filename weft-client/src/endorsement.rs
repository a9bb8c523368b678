//! Proposal broadcast and endorsement evaluation.

use tracing::{debug, info, warn};
use weft_common::{
    parse_peer_diagnostic, EndorsementPayload, InvokeError, InvokeRequest, Peer, PeerResponse,
};

use crate::network::{ChannelHandle, ProposalBundle};

/// Sends the invocation proposal to every peer in one fan-out call.
pub async fn broadcast_proposal(
    channel: &dyn ChannelHandle,
    request: &InvokeRequest,
    peers: &[Peer],
) -> Result<ProposalBundle, InvokeError> {
    debug!(
        tx_id = %request.tx_id,
        function = %request.function,
        peers = peers.len(),
        "broadcasting proposal"
    );
    channel
        .send_proposal(request, peers)
        .await
        .map_err(|e| InvokeError::Network(e.to_string()))
}

/// Decides whether the proposal is good and extracts the candidate
/// result.
///
/// Only the first peer's response is authoritative; responses from the
/// other endorsers are not cross-checked. That is the documented
/// policy, not an oversight, and it must not be upgraded to quorum
/// matching here.
pub fn evaluate(bundle: &ProposalBundle) -> Result<EndorsementPayload, InvokeError> {
    match bundle.responses.first() {
        Some(PeerResponse::Endorsement { status: 200, payload }) => {
            let decoded = EndorsementPayload::decode(payload);
            info!(payload = %decoded, "proposal endorsed");
            Ok(decoded)
        }
        Some(PeerResponse::Endorsement { status, payload }) => {
            let raw = String::from_utf8_lossy(payload);
            warn!(status, "proposal returned non-success status");
            let reason = if raw.trim().is_empty() {
                format!("Error: proposal returned status {status}")
            } else {
                format!("Error: {}", raw.trim())
            };
            Err(InvokeError::ProposalRejected(reason))
        }
        Some(PeerResponse::Failure { message }) => {
            warn!(%message, "proposal rejected by peer");
            let reason = parse_peer_diagnostic(message).unwrap_or_else(|| message.clone());
            Err(InvokeError::ProposalRejected(format!("Error: {reason}")))
        }
        None => Err(InvokeError::ProposalRejected(
            "Error: no proposal responses received".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ProposalArtifact;

    fn bundle(responses: Vec<PeerResponse>) -> ProposalBundle {
        ProposalBundle { responses, artifact: ProposalArtifact::default() }
    }

    #[test]
    fn test_status_200_yields_decoded_payload() {
        let b = bundle(vec![PeerResponse::Endorsement {
            status: 200,
            payload: br#"{"make":"Porsche"}"#.to_vec(),
        }]);

        let payload = evaluate(&b).unwrap();
        assert_eq!(payload.as_value().unwrap()["make"], "Porsche");
    }

    #[test]
    fn test_diagnostic_message_is_parsed() {
        let b = bundle(vec![PeerResponse::Failure {
            message: "chaincode error: Incorrect number of arguments. Expecting 5".to_string(),
        }]);

        let err = evaluate(&b).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: Incorrect number of arguments. Expecting 5"
        );
    }

    #[test]
    fn test_unparseable_diagnostic_falls_back_to_raw_message() {
        let b = bundle(vec![PeerResponse::Failure { message: "connection reset".to_string() }]);

        let err = evaluate(&b).unwrap_err();
        assert_eq!(err.to_string(), "Error: connection reset");
    }

    #[test]
    fn test_non_200_status_is_rejected() {
        let b = bundle(vec![PeerResponse::Endorsement { status: 500, payload: vec![] }]);
        assert!(matches!(evaluate(&b), Err(InvokeError::ProposalRejected(_))));
    }

    #[test]
    fn test_empty_response_set_is_rejected() {
        let err = evaluate(&bundle(vec![])).unwrap_err();
        assert!(matches!(err, InvokeError::ProposalRejected(_)));
    }

    #[test]
    fn test_only_first_response_is_authoritative() {
        // First response wins even when a later peer disagrees.
        let b = bundle(vec![
            PeerResponse::Endorsement { status: 200, payload: b"\"ok\"".to_vec() },
            PeerResponse::Failure { message: "chaincode error: boom".to_string() },
        ]);
        assert!(evaluate(&b).is_ok());
    }
}
