use thiserror::Error;

/// Transport-level failures reported by the network capabilities.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Failed to send: {0}")]
    Send(String),

    #[error("Event registration failed: {0}")]
    Registration(String),

    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Event stream error: {0}")]
    Stream(String),

    #[error("Event stream closed by remote")]
    StreamClosed,
}
