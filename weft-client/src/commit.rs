//! Commit orchestration: ordering submission raced together with a
//! commit-event listener under one wall-clock deadline.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};
use weft_common::{InvokeError, Peer, TransactionId, ValidationCode};

use crate::network::{
    ChannelHandle, CredentialProvider, EventHub, LedgerClient, NetworkError, ProposalBundle,
    SubmissionStatus,
};
use crate::outcome::CommitVerdict;

/// Consecutive event-channel transport errors tolerated within one
/// invocation; the next one is fatal.
pub const MAX_EVENT_HUB_RETRIES: u32 = 5;

/// What one arm-and-listen attempt ended with.
enum ListenOutcome {
    Committed(ValidationCode),
    TimedOut,
    Transport(NetworkError),
}

/// The listener leg of one invocation.
///
/// Owns the event hub for the whole invocation and closes it on every
/// exit path. The deadline instant is captured once at construction;
/// transport-error retries re-open the channel but never extend it, so
/// a flaky channel can burn the entire budget on reconnects. Do not
/// "fix" that by resetting the deadline; callers size the budget for
/// the whole confirmation, reconnects included.
pub struct CommitWatcher<'a> {
    client: &'a dyn LedgerClient,
    credentials: &'a dyn CredentialProvider,
    hub: Box<dyn EventHub>,
    peer: &'a Peer,
    tx_id: &'a TransactionId,
    deadline: Instant,
    retries: u32,
}

impl<'a> CommitWatcher<'a> {
    pub fn new(
        client: &'a dyn LedgerClient,
        credentials: &'a dyn CredentialProvider,
        hub: Box<dyn EventHub>,
        peer: &'a Peer,
        tx_id: &'a TransactionId,
        budget: Duration,
    ) -> Self {
        CommitWatcher {
            client,
            credentials,
            hub,
            peer,
            tx_id,
            deadline: Instant::now() + budget,
            retries: 0,
        }
    }

    /// Runs the listener leg to completion: a validation code, a
    /// timeout, or retry exhaustion.
    pub async fn watch(mut self) -> Result<ValidationCode, InvokeError> {
        // Event registrations must be signed by an identity the peer's
        // event channel trusts, not by the proposal submitter.
        self.client
            .set_identity(&self.peer.admin_identity)
            .await
            .map_err(|e| InvokeError::EventStream(e.to_string()))?;

        loop {
            match self.listen_once().await {
                ListenOutcome::Committed(code) => {
                    info!(tx_id = %self.tx_id, code = %code, "commit event received");
                    return Ok(code);
                }
                ListenOutcome::TimedOut => {
                    warn!(tx_id = %self.tx_id, "no commit event before the deadline");
                    return Err(InvokeError::Timeout);
                }
                ListenOutcome::Transport(err) => {
                    self.retries += 1;
                    if self.retries > MAX_EVENT_HUB_RETRIES {
                        warn!(tx_id = %self.tx_id, retries = self.retries - 1, error = %err,
                            "event channel retry budget exhausted");
                        return Err(InvokeError::EventStream(err.to_string()));
                    }
                    warn!(tx_id = %self.tx_id, retry = self.retries, error = %err,
                        "event channel dropped, re-arming listener");
                }
            }
        }
    }

    /// One arm-and-listen cycle: credentials, connect, register, wait.
    /// The channel is disconnected before returning on every path.
    async fn listen_once(&mut self) -> ListenOutcome {
        let creds = match self.credentials.connection_options(self.peer).await {
            Ok(creds) => creds,
            Err(e) => return ListenOutcome::Transport(e),
        };
        self.hub.set_target(&self.peer.event_endpoint, creds);

        if let Err(e) = self.hub.connect().await {
            return ListenOutcome::Transport(e);
        }

        let mut subscription = match self.hub.subscribe_commit(self.tx_id).await {
            Ok(sub) => sub,
            Err(e) => {
                self.hub.disconnect().await;
                return ListenOutcome::Transport(e);
            }
        };
        debug!(tx_id = %self.tx_id, peer = %self.peer.name, "listening for commit event");

        // Dropping the subscription future on expiry is the only
        // cancellation in the workflow; the timer itself dies with it
        // on every other terminal transition.
        match tokio::time::timeout_at(self.deadline, subscription.next()).await {
            Ok(Ok(notice)) => {
                self.hub.unsubscribe(self.tx_id).await;
                self.hub.disconnect().await;
                ListenOutcome::Committed(notice.code)
            }
            Ok(Err(e)) => {
                self.hub.disconnect().await;
                ListenOutcome::Transport(e)
            }
            Err(_) => {
                self.hub.unsubscribe(self.tx_id).await;
                self.hub.disconnect().await;
                ListenOutcome::TimedOut
            }
        }
    }
}

/// Runs both commit legs concurrently and waits for both.
///
/// The submission call is issued alongside the listener; neither leg
/// short-circuits the other, since "ordered but later invalid" and
/// "ordering rejected but event pending" must both be observable. A
/// submission transport error is folded into the verdict rather than
/// retried; listener failures (timeout, retry exhaustion) propagate as
/// errors once both legs have finished.
pub async fn orchestrate_commit(
    client: &dyn LedgerClient,
    channel: &dyn ChannelHandle,
    credentials: &dyn CredentialProvider,
    hub: Box<dyn EventHub>,
    peers: &[Peer],
    bundle: &ProposalBundle,
    tx_id: &TransactionId,
    budget: Duration,
) -> Result<CommitVerdict, InvokeError> {
    // The listener arms on the first registered peer.
    let listen_peer = peers.first().ok_or(InvokeError::NoPeers)?;
    let watcher = CommitWatcher::new(client, credentials, hub, listen_peer, tx_id, budget);

    let submission_leg = async {
        match channel.send_transaction(bundle).await {
            Ok(status) => status,
            Err(e) => SubmissionStatus::Failure(e.to_string()),
        }
    };

    let (submission, listened) = tokio::join!(submission_leg, watcher.watch());
    let validation = listened?;

    Ok(CommitVerdict { submission, validation })
}
