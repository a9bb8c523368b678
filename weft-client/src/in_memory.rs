//! In-memory fabric implementing every network capability, with
//! scriptable behavior per leg. Used by the integration tests and the
//! demo binary; no sockets involved.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use weft_common::{InvokeRequest, Peer, PeerResponse, TransactionId, ValidationCode};

use crate::network::{
    ChannelCredentials, ChannelHandle, CommitNotice, CommitSubscription, CredentialProvider,
    EventHub, LedgerClient, NetworkError, ProposalArtifact, ProposalBundle, SubmissionStatus,
};

/// How every queried peer answers a proposal.
#[derive(Debug, Clone)]
pub enum ProposalBehavior {
    Endorse { status: u16, payload: Vec<u8> },
    Reject { message: String },
    Transport { error: String },
}

/// How the ordering service answers a submission.
#[derive(Debug, Clone)]
pub enum SubmissionBehavior {
    Accept,
    Refuse { reason: String },
    Transport { error: String },
}

/// One scripted event-hub episode, consumed per arm attempt.
#[derive(Debug, Clone)]
pub enum EventScript {
    /// Deliver a commit notice with this code after a delay.
    Commit { code: ValidationCode, after: Duration },
    /// Fail the connect itself.
    ConnectError { error: String },
    /// Connect, then fail the stream after a delay.
    StreamError { error: String, after: Duration },
    /// Connect and never deliver anything; lets the deadline fire.
    Silence,
}

#[derive(Debug, Default)]
struct FabricState {
    identity_log: Vec<String>,
    last_proposal_peers: Vec<String>,
    proposal: Option<ProposalBehavior>,
    submission: Option<SubmissionBehavior>,
    events: VecDeque<EventScript>,
    counters: FabricCounters,
    // Senders for Silence scripts are parked here so the channel stays
    // open until the deadline cancels the listener.
    parked: Vec<mpsc::Sender<Result<CommitNotice, NetworkError>>>,
}

/// Snapshot of observable side effects, for assertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FabricCounters {
    pub proposals_sent: usize,
    pub transactions_sent: usize,
    pub connects: usize,
    pub disconnects: usize,
    pub subscriptions: usize,
    pub unsubscribes: usize,
}

/// Handle onto the shared fabric; clone freely, every capability view
/// shares the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFabric {
    state: Arc<Mutex<FabricState>>,
}

impl InMemoryFabric {
    /// A fabric that endorses with status 200 and an empty JSON object,
    /// accepts submissions, and stays silent on the event channel until
    /// scripted otherwise.
    pub fn new() -> Self {
        InMemoryFabric::default()
    }

    pub fn set_proposal(&self, behavior: ProposalBehavior) {
        self.state.lock().unwrap().proposal = Some(behavior);
    }

    pub fn set_submission(&self, behavior: SubmissionBehavior) {
        self.state.lock().unwrap().submission = Some(behavior);
    }

    pub fn push_event(&self, script: EventScript) {
        self.state.lock().unwrap().events.push_back(script);
    }

    pub fn counters(&self) -> FabricCounters {
        self.state.lock().unwrap().counters.clone()
    }

    /// Identities bound over the fabric's lifetime, in order.
    pub fn identity_log(&self) -> Vec<String> {
        self.state.lock().unwrap().identity_log.clone()
    }

    /// Peer names the most recent proposal fanned out to.
    pub fn proposal_peers(&self) -> Vec<String> {
        self.state.lock().unwrap().last_proposal_peers.clone()
    }

    pub fn client(&self) -> InMemoryClient {
        InMemoryClient { state: Arc::clone(&self.state) }
    }

    pub fn channel(&self) -> InMemoryChannel {
        InMemoryChannel { state: Arc::clone(&self.state) }
    }

    pub fn credentials(&self) -> InMemoryCredentials {
        InMemoryCredentials
    }

    pub fn event_hub(&self) -> InMemoryEventHub {
        InMemoryEventHub { state: Arc::clone(&self.state), target: None, connected: false }
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryClient {
    state: Arc<Mutex<FabricState>>,
}

#[async_trait]
impl LedgerClient for InMemoryClient {
    async fn set_identity(&self, name: &str) -> Result<(), NetworkError> {
        self.state.lock().unwrap().identity_log.push(name.to_string());
        Ok(())
    }

    fn new_transaction_id(&self) -> TransactionId {
        TransactionId::mint()
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryChannel {
    state: Arc<Mutex<FabricState>>,
}

#[async_trait]
impl ChannelHandle for InMemoryChannel {
    async fn send_proposal(
        &self,
        request: &InvokeRequest,
        peers: &[Peer],
    ) -> Result<ProposalBundle, NetworkError> {
        let behavior = {
            let mut state = self.state.lock().unwrap();
            state.counters.proposals_sent += 1;
            state.last_proposal_peers = peers.iter().map(|p| p.name.clone()).collect();
            state.proposal.clone()
        };

        let behavior = behavior
            .unwrap_or(ProposalBehavior::Endorse { status: 200, payload: b"{}".to_vec() });

        let response = match behavior {
            ProposalBehavior::Endorse { status, payload } => {
                PeerResponse::Endorsement { status, payload }
            }
            ProposalBehavior::Reject { message } => PeerResponse::Failure { message },
            ProposalBehavior::Transport { error } => return Err(NetworkError::Send(error)),
        };

        Ok(ProposalBundle {
            responses: peers.iter().map(|_| response.clone()).collect(),
            artifact: ProposalArtifact(request.tx_id.0.clone().into_bytes()),
        })
    }

    async fn send_transaction(
        &self,
        _bundle: &ProposalBundle,
    ) -> Result<SubmissionStatus, NetworkError> {
        let behavior = {
            let mut state = self.state.lock().unwrap();
            state.counters.transactions_sent += 1;
            state.submission.clone()
        };

        match behavior.unwrap_or(SubmissionBehavior::Accept) {
            SubmissionBehavior::Accept => Ok(SubmissionStatus::Success),
            SubmissionBehavior::Refuse { reason } => Ok(SubmissionStatus::Failure(reason)),
            SubmissionBehavior::Transport { error } => Err(NetworkError::Send(error)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryCredentials;

#[async_trait]
impl CredentialProvider for InMemoryCredentials {
    async fn connection_options(&self, peer: &Peer) -> Result<ChannelCredentials, NetworkError> {
        Ok(ChannelCredentials { server_name: Some(peer.name.clone()), ..Default::default() })
    }
}

pub struct InMemoryEventHub {
    state: Arc<Mutex<FabricState>>,
    target: Option<String>,
    connected: bool,
}

#[async_trait]
impl EventHub for InMemoryEventHub {
    fn set_target(&mut self, address: &str, _credentials: ChannelCredentials) {
        self.target = Some(address.to_string());
    }

    async fn connect(&mut self) -> Result<(), NetworkError> {
        if self.target.is_none() {
            return Err(NetworkError::Connect("no target address set".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        if matches!(state.events.front(), Some(EventScript::ConnectError { .. })) {
            if let Some(EventScript::ConnectError { error }) = state.events.pop_front() {
                return Err(NetworkError::Connect(error));
            }
        }
        state.counters.connects += 1;
        drop(state);
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) {
        if self.connected {
            self.state.lock().unwrap().counters.disconnects += 1;
            self.connected = false;
        }
    }

    async fn subscribe_commit(
        &mut self,
        tx_id: &TransactionId,
    ) -> Result<CommitSubscription, NetworkError> {
        let script = {
            let mut state = self.state.lock().unwrap();
            state.counters.subscriptions += 1;
            state.events.pop_front()
        };

        let (sender, subscription) = CommitSubscription::channel();
        match script.unwrap_or(EventScript::Silence) {
            EventScript::Commit { code, after } => {
                let tx_id = tx_id.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = sender.send(Ok(CommitNotice { tx_id, code })).await;
                });
            }
            EventScript::StreamError { error, after } => {
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = sender.send(Err(NetworkError::Stream(error))).await;
                });
            }
            EventScript::Silence => {
                self.state.lock().unwrap().parked.push(sender);
            }
            // Already consumed by connect; an extra one here means the
            // script was mis-ordered, treat it as a registration error.
            EventScript::ConnectError { error } => {
                return Err(NetworkError::Registration(error));
            }
        }

        Ok(subscription)
    }

    async fn unsubscribe(&mut self, _tx_id: &TransactionId) {
        self.state.lock().unwrap().counters.unsubscribes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> Peer {
        Peer::new("peer0", "grpc://peer0:7051", "grpc://peer0:7053", "admin")
    }

    #[tokio::test]
    async fn test_default_fabric_endorses() {
        let fabric = InMemoryFabric::new();
        let request = InvokeRequest::new("cc", "fn", vec![], "ch", TransactionId::mint());

        let bundle =
            fabric.channel().send_proposal(&request, &[peer(), peer()]).await.unwrap();
        assert_eq!(bundle.responses.len(), 2);
        assert!(matches!(
            bundle.responses[0],
            PeerResponse::Endorsement { status: 200, .. }
        ));
    }

    #[tokio::test]
    async fn test_scripted_commit_is_delivered() {
        let fabric = InMemoryFabric::new();
        fabric.push_event(EventScript::Commit {
            code: ValidationCode::Valid,
            after: Duration::from_millis(5),
        });

        let mut hub = fabric.event_hub();
        hub.set_target("grpc://peer0:7053", ChannelCredentials::default());
        hub.connect().await.unwrap();
        let mut sub = hub.subscribe_commit(&TransactionId::from("tx-1")).await.unwrap();

        let notice = sub.next().await.unwrap();
        assert!(notice.code.is_valid());
        assert_eq!(notice.tx_id, TransactionId::from("tx-1"));
    }

    #[tokio::test]
    async fn test_connect_error_script_fails_connect() {
        let fabric = InMemoryFabric::new();
        fabric.push_event(EventScript::ConnectError { error: "refused".to_string() });

        let mut hub = fabric.event_hub();
        hub.set_target("grpc://peer0:7053", ChannelCredentials::default());
        assert!(hub.connect().await.is_err());
        // Failed connect never counts toward the open-channel balance.
        assert_eq!(fabric.counters().connects, 0);
    }
}
