use async_trait::async_trait;
use tokio::sync::mpsc;
use weft_common::{TransactionId, ValidationCode};

use super::credentials::ChannelCredentials;
use super::error::NetworkError;

/// Notification that a transaction was sequenced and validated (or
/// rejected) on the ledger.
#[derive(Debug, Clone)]
pub struct CommitNotice {
    pub tx_id: TransactionId,
    pub code: ValidationCode,
}

/// A live registration for commit events of one transaction.
///
/// The subscription has exactly three outcomes: a commit notice, a
/// transport error delivered in-band, or cancellation by the caller
/// dropping it (the deadline timer does exactly that).
pub struct CommitSubscription {
    rx: mpsc::Receiver<Result<CommitNotice, NetworkError>>,
}

impl CommitSubscription {
    pub fn new(rx: mpsc::Receiver<Result<CommitNotice, NetworkError>>) -> Self {
        CommitSubscription { rx }
    }

    /// Creates a connected sender/subscription pair. Hub
    /// implementations hand the sender to whatever task watches the
    /// wire.
    pub fn channel() -> (mpsc::Sender<Result<CommitNotice, NetworkError>>, Self) {
        let (tx, rx) = mpsc::channel(4);
        (tx, CommitSubscription::new(rx))
    }

    /// Waits for the next outcome. A closed channel counts as a
    /// transport error, never as a silent hang.
    pub async fn next(&mut self) -> Result<CommitNotice, NetworkError> {
        match self.rx.recv().await {
            Some(outcome) => outcome,
            None => Err(NetworkError::StreamClosed),
        }
    }
}

/// An event channel onto one peer.
///
/// Exclusively owned by the listener leg of one invocation; every exit
/// path must call `disconnect`.
#[async_trait]
pub trait EventHub: Send + Sync {
    /// Points the hub at a peer's event endpoint with the credentials
    /// its channel trusts. Must be called before `connect`.
    fn set_target(&mut self, address: &str, credentials: ChannelCredentials);

    async fn connect(&mut self) -> Result<(), NetworkError>;

    async fn disconnect(&mut self);

    /// Registers interest in commit events for `tx_id`.
    async fn subscribe_commit(
        &mut self,
        tx_id: &TransactionId,
    ) -> Result<CommitSubscription, NetworkError>;

    async fn unsubscribe(&mut self, tx_id: &TransactionId);
}
