//! Shared data model for the Weft invocation client.
//!
//! Everything here is pure: peer descriptors and their deduplication,
//! invocation requests, proposal responses, validation codes, and the
//! diagnostic-string parser. Network capabilities live in
//! `weft-client`.

pub mod diagnostics;
pub mod errors;
pub mod peer;
pub mod registry;
pub mod request;
pub mod response;
pub mod validation;

pub use diagnostics::parse_peer_diagnostic;
pub use errors::InvokeError;
pub use peer::Peer;
pub use registry::dedup_peers;
pub use request::{normalize_args, InvokeRequest, TransactionId};
pub use response::{EndorsementPayload, PeerResponse};
pub use validation::ValidationCode;
