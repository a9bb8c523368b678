//! Weft invocation client: submits a transaction to a permissioned
//! ledger and confirms commitment by listening for ledger events
//! instead of trusting the proposal response alone.
//!
//! Pipeline: peer registry → proposal broadcast → endorsement
//! evaluation → commit orchestration (ordering submission raced with a
//! commit-event listener under one deadline) → outcome reconciliation.

pub mod commit;
pub mod config;
pub mod endorsement;
pub mod in_memory;
pub mod invoke;
pub mod network;
pub mod outcome;

pub use commit::{orchestrate_commit, CommitWatcher, MAX_EVENT_HUB_RETRIES};
pub use config::ClientConfig;
pub use endorsement::{broadcast_proposal, evaluate};
pub use invoke::{invoke_transaction, InvokeParams, DEFAULT_TIMEOUT};
pub use network::{
    ChannelCredentials, ChannelHandle, CommitNotice, CommitSubscription, CredentialProvider,
    EventHub, LedgerClient, NetworkError, ProposalArtifact, ProposalBundle, SubmissionStatus,
};
pub use outcome::{reconcile, CommitVerdict};
