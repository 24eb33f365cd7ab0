//! Response verification against a request's expectation.
use crate::engine::TransferOutcome;
use crate::schedule::{Request, VerificationKind};

/// Verdict for one resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub pass: bool,
    /// Transport-level failure or missing response: the reporter prints
    /// "ERROR" in place of the transfer timing.
    pub error: bool,
    pub detail: Option<String>,
}

impl VerificationResult {
    const fn passed() -> Self {
        Self {
            pass: true,
            error: false,
            detail: None,
        }
    }

    fn failed(detail: String) -> Self {
        Self {
            pass: false,
            error: false,
            detail: Some(detail),
        }
    }

    fn errored(detail: String) -> Self {
        Self {
            pass: false,
            error: true,
            detail: Some(detail),
        }
    }
}

/// Compares a completed transfer against the request's expectation.
/// Total: transport failures and mismatches become FAIL verdicts, never
/// errors out of this function.
#[must_use]
pub fn verify(request: &Request, outcome: &TransferOutcome) -> VerificationResult {
    if let Some(transport_error) = outcome.transport_error.as_ref() {
        return VerificationResult::errored(transport_error.clone());
    }
    match request.kind {
        VerificationKind::Code => verify_status_code(&request.expected, outcome),
    }
}

fn verify_status_code(expected: &str, outcome: &TransferOutcome) -> VerificationResult {
    if outcome.status == 0 {
        return VerificationResult::errored("No Server Response".to_owned());
    }
    let observed = outcome.status.to_string();
    if observed != expected {
        return VerificationResult::failed(format!("Expected {} response code", expected));
    }
    VerificationResult::passed()
}
