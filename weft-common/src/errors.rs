use thiserror::Error;

/// Terminal failures of one invocation workflow.
///
/// Callers are expected to branch on the variant (or the message text),
/// not on numeric codes; the only raw platform codes exposed are the
/// validation codes embedded in `CommitFailed` reasons.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// No peers left after deduplication. Raised before any network call.
    #[error("No peers supplied for the invocation")]
    NoPeers,

    /// The endorsing peer rejected the proposal. The message already
    /// carries the extracted human-readable reason, so it is surfaced
    /// verbatim.
    #[error("{0}")]
    ProposalRejected(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The commit event did not arrive within the configured budget.
    #[error("Transaction did not complete within the allowed time")]
    Timeout,

    /// The event channel kept failing past the retry budget.
    #[error("Event channel error: {0}")]
    EventStream(String),

    /// Ordering and/or validation failed; one line per failing leg.
    #[error("Transaction failed to commit:\n{0}")]
    CommitFailed(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
