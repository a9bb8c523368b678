//! Reconciliation of the two commit legs into one verdict.

use weft_common::{EndorsementPayload, InvokeError, ValidationCode};

use crate::network::SubmissionStatus;

/// Joint outcome of ordering submission and event confirmation.
#[derive(Debug, Clone)]
pub struct CommitVerdict {
    pub submission: SubmissionStatus,
    pub validation: ValidationCode,
}

impl CommitVerdict {
    pub fn is_success(&self) -> bool {
        self.submission == SubmissionStatus::Success && self.validation.is_valid()
    }
}

/// Success only when both legs succeeded; otherwise every failing leg
/// gets its own line in the reason. On success the caller receives the
/// endorsement's decoded payload — the confirmation metadata is
/// discardable once success is established.
pub fn reconcile(
    verdict: CommitVerdict,
    payload: EndorsementPayload,
) -> Result<EndorsementPayload, InvokeError> {
    let mut failures = Vec::new();

    if let SubmissionStatus::Failure(reason) = &verdict.submission {
        failures.push(format!("Failed to order the transaction: {reason}"));
    }
    if !verdict.validation.is_valid() {
        failures.push(format!(
            "Transaction was invalidated on the ledger with code: {}",
            verdict.validation
        ));
    }

    if failures.is_empty() {
        Ok(payload)
    } else {
        Err(InvokeError::CommitFailed(failures.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EndorsementPayload {
        EndorsementPayload::Raw("ok".to_string())
    }

    #[test]
    fn test_both_legs_good_resolves_payload() {
        let verdict = CommitVerdict {
            submission: SubmissionStatus::Success,
            validation: ValidationCode::Valid,
        };
        assert!(verdict.is_success());
        assert_eq!(reconcile(verdict, payload()).unwrap(), payload());
    }

    #[test]
    fn test_submission_failure_alone_is_reported() {
        let verdict = CommitVerdict {
            submission: SubmissionStatus::Failure("orderer unavailable".to_string()),
            validation: ValidationCode::Valid,
        };
        let err = reconcile(verdict, payload()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("orderer unavailable"), "{msg}");
        assert!(!msg.contains("invalidated"), "{msg}");
    }

    #[test]
    fn test_validation_failure_names_the_code() {
        let verdict = CommitVerdict {
            submission: SubmissionStatus::Success,
            validation: ValidationCode::MvccReadConflict,
        };
        let err = reconcile(verdict, payload()).unwrap_err();
        assert!(err.to_string().contains("MVCC_READ_CONFLICT"));
    }

    #[test]
    fn test_both_failures_are_listed_independently() {
        let verdict = CommitVerdict {
            submission: SubmissionStatus::Failure("broadcast refused".to_string()),
            validation: ValidationCode::EndorsementPolicyFailure,
        };
        let err = reconcile(verdict, payload()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broadcast refused"), "{msg}");
        assert!(msg.contains("ENDORSEMENT_POLICY_FAILURE"), "{msg}");
        assert!(msg.lines().count() >= 2, "one line per failing leg: {msg}");
    }
}
