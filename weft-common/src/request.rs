use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of one submitted transaction.
///
/// Minted once per invocation and owned by the workflow for its whole
/// lifetime; the commit-event listener registers interest under this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn mint() -> Self {
        TransactionId(Uuid::new_v4().simple().to_string())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        TransactionId(s.to_string())
    }
}

/// One fully-shaped invocation request, immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    /// Target contract (chaincode) identifier.
    pub contract: String,
    pub function: String,
    pub args: Vec<String>,
    /// Ledger channel the invocation targets.
    pub channel: String,
    pub tx_id: TransactionId,
}

impl InvokeRequest {
    pub fn new(
        contract: impl Into<String>,
        function: impl Into<String>,
        args: Vec<String>,
        channel: impl Into<String>,
        tx_id: TransactionId,
    ) -> Self {
        InvokeRequest {
            contract: contract.into(),
            function: function.into(),
            args,
            channel: channel.into(),
            tx_id,
        }
    }
}

/// Strips trailing absent arguments from a positional list.
///
/// Interior gaps are kept positional by mapping them to the empty
/// string, so `["a", None, "c", None, None]` becomes `["a", "", "c"]`.
pub fn normalize_args(mut args: Vec<Option<String>>) -> Vec<String> {
    while matches!(args.last(), Some(None)) {
        args.pop();
    }
    args.into_iter().map(Option::unwrap_or_default).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_is_unique() {
        assert_ne!(TransactionId::mint(), TransactionId::mint());
    }

    #[test]
    fn test_normalize_strips_trailing_absent() {
        let args = vec![Some("a".to_string()), Some("b".to_string()), None, None];
        assert_eq!(normalize_args(args), vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_keeps_interior_gaps_positional() {
        let args = vec![Some("a".to_string()), None, Some("c".to_string()), None];
        assert_eq!(normalize_args(args), vec!["a", "", "c"]);
    }

    #[test]
    fn test_normalize_all_absent_yields_empty() {
        assert!(normalize_args(vec![None, None]).is_empty());
        assert!(normalize_args(vec![]).is_empty());
    }
}
