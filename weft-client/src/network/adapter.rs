use std::fmt::Debug;

use async_trait::async_trait;
use weft_common::{InvokeRequest, Peer, PeerResponse, TransactionId};

use super::error::NetworkError;

/// Signed proposal material the ordering service needs verbatim.
/// Produced by `send_proposal`, consumed by `send_transaction`; the
/// workflow never looks inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalArtifact(pub Vec<u8>);

/// Everything a proposal broadcast came back with: one response per
/// queried peer plus the artifact required for submission.
#[derive(Debug, Clone)]
pub struct ProposalBundle {
    pub responses: Vec<PeerResponse>,
    pub artifact: ProposalArtifact,
}

/// Outcome of handing the endorsed transaction to the ordering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Success,
    Failure(String),
}

/// The bootstrapped network client: identity binding and transaction
/// id minting. Key storage and crypto-suite setup happen behind this
/// seam.
#[async_trait]
pub trait LedgerClient: Send + Sync + Debug {
    /// Binds the client to a signing identity. Every signed operation
    /// after this call is attributed to `name`.
    async fn set_identity(&self, name: &str) -> Result<(), NetworkError>;

    fn new_transaction_id(&self) -> TransactionId;
}

/// A handle onto one ledger channel.
#[async_trait]
pub trait ChannelHandle: Send + Sync + Debug {
    /// Fans the proposal out to every peer concurrently; one call, one
    /// response per peer. No retry here, a transport failure aborts the
    /// invocation.
    async fn send_proposal(
        &self,
        request: &InvokeRequest,
        peers: &[Peer],
    ) -> Result<ProposalBundle, NetworkError>;

    /// Submits the endorsed transaction to the ordering service.
    async fn send_transaction(
        &self,
        bundle: &ProposalBundle,
    ) -> Result<SubmissionStatus, NetworkError>;
}
