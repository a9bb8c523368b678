use serde::{Deserialize, Serialize};

/// Validation outcome attached to a commit event.
///
/// The set is fixed by the ledger platform; [`ValidationCode::Valid`]
/// is the single success sentinel. Codes this client does not know are
/// carried through as [`ValidationCode::Other`] and treated as
/// non-valid, so new platform codes degrade to reported commit
/// failures instead of surprises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationCode {
    Valid,
    MvccReadConflict,
    PhantomReadConflict,
    EndorsementPolicyFailure,
    BadProposalTxid,
    DuplicateTxid,
    ExpiredChaincode,
    NotValidated,
    InvalidOtherReason,
    Other(String),
}

impl ValidationCode {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationCode::Valid)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ValidationCode::Valid => "VALID",
            ValidationCode::MvccReadConflict => "MVCC_READ_CONFLICT",
            ValidationCode::PhantomReadConflict => "PHANTOM_READ_CONFLICT",
            ValidationCode::EndorsementPolicyFailure => "ENDORSEMENT_POLICY_FAILURE",
            ValidationCode::BadProposalTxid => "BAD_PROPOSAL_TXID",
            ValidationCode::DuplicateTxid => "DUPLICATE_TXID",
            ValidationCode::ExpiredChaincode => "EXPIRED_CHAINCODE",
            ValidationCode::NotValidated => "NOT_VALIDATED",
            ValidationCode::InvalidOtherReason => "INVALID_OTHER_REASON",
            ValidationCode::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ValidationCode {
    fn from(code: &str) -> Self {
        match code {
            "VALID" => ValidationCode::Valid,
            "MVCC_READ_CONFLICT" => ValidationCode::MvccReadConflict,
            "PHANTOM_READ_CONFLICT" => ValidationCode::PhantomReadConflict,
            "ENDORSEMENT_POLICY_FAILURE" => ValidationCode::EndorsementPolicyFailure,
            "BAD_PROPOSAL_TXID" => ValidationCode::BadProposalTxid,
            "DUPLICATE_TXID" => ValidationCode::DuplicateTxid,
            "EXPIRED_CHAINCODE" => ValidationCode::ExpiredChaincode,
            "NOT_VALIDATED" => ValidationCode::NotValidated,
            "INVALID_OTHER_REASON" => ValidationCode::InvalidOtherReason,
            other => ValidationCode::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_valid_is_valid() {
        assert!(ValidationCode::Valid.is_valid());
        assert!(!ValidationCode::MvccReadConflict.is_valid());
        assert!(!ValidationCode::Other("SOMETHING_NEW".into()).is_valid());
    }

    #[test]
    fn test_str_roundtrip() {
        for code in [
            ValidationCode::Valid,
            ValidationCode::MvccReadConflict,
            ValidationCode::EndorsementPolicyFailure,
            ValidationCode::ExpiredChaincode,
        ] {
            assert_eq!(ValidationCode::from(code.as_str()), code);
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let code = ValidationCode::from("FUTURE_CODE");
        assert_eq!(code, ValidationCode::Other("FUTURE_CODE".to_string()));
        assert_eq!(code.as_str(), "FUTURE_CODE");
    }
}
