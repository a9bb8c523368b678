//! Capability seams toward the ledger network.
//!
//! The workflow never talks to a transport directly; it consumes these
//! traits. Real deployments implement them over the platform SDK, the
//! tests and the demo binary use the in-memory fabric from
//! [`crate::in_memory`].

pub mod adapter;
pub mod credentials;
pub mod error;
pub mod events;

pub use adapter::{ChannelHandle, LedgerClient, ProposalArtifact, ProposalBundle, SubmissionStatus};
pub use credentials::{ChannelCredentials, CredentialProvider, FileCredentialProvider};
pub use error::NetworkError;
pub use events::{CommitNotice, CommitSubscription, EventHub};
