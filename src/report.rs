//! Result compilation and output.
use tracing::debug;

use crate::engine::TransferOutcome;
use crate::schedule::{HttpMethod, Request, Schedule};
use crate::verify::{VerificationResult, verify};

/// One line of the final result block.
#[derive(Debug, Clone)]
pub struct ResultRecord {
    /// 1-based position in final schedule order.
    pub index: usize,
    pub label: &'static str,
    /// Transfer timing in seconds, or "ERROR" for transport failures.
    pub timing_or_status: String,
    pub url: String,
    pub status: u16,
    pub method: HttpMethod,
    pub detail: Option<String>,
}

/// Joins outcomes back to their requests and emits one record per
/// request in schedule order (offset ascending, then line order),
/// regardless of the order transfers completed in.
#[must_use]
pub fn compile_results(schedule: &Schedule, outcomes: &[TransferOutcome]) -> Vec<ResultRecord> {
    let mut by_slot: Vec<Option<&TransferOutcome>> = vec![None; schedule.len()];
    for outcome in outcomes {
        if let Some(entry) = by_slot.get_mut(outcome.slot) {
            *entry = Some(outcome);
        }
    }

    let mut records = Vec::with_capacity(schedule.len());
    for request in schedule.requests() {
        let stored = by_slot.get(request.slot).copied().flatten();
        let fallback = TransferOutcome::unresolved(request.slot);
        let outcome = stored.unwrap_or(&fallback);
        let verdict = verify(request, outcome);
        records.push(build_record(request, outcome, verdict));
    }
    records
}

fn build_record(
    request: &Request,
    outcome: &TransferOutcome,
    verdict: VerificationResult,
) -> ResultRecord {
    let label = if verdict.pass { "PASS" } else { "FAIL" };
    let timing_or_status = if verdict.error {
        "ERROR".to_owned()
    } else {
        format!("{:.3}", outcome.elapsed.as_secs_f64())
    };
    ResultRecord {
        index: request.slot.saturating_add(1),
        label,
        timing_or_status,
        url: request.url.clone(),
        status: outcome.status,
        method: request.method,
        detail: verdict.detail,
    }
}

/// Prints the numbered result block.
pub fn print_results(records: &[ResultRecord]) {
    println!();
    println!("Results:");
    for record in records {
        println!("{}", format_record(record));
    }
}

#[must_use]
pub fn format_record(record: &ResultRecord) -> String {
    record.detail.as_ref().map_or_else(
        || {
            format!(
                "{} {} {} {} {} {}",
                record.index,
                record.label,
                record.timing_or_status,
                record.url,
                record.status,
                record.method
            )
        },
        |detail| {
            format!(
                "{} {} {} {} {} {} {}",
                record.index,
                record.label,
                record.timing_or_status,
                record.url,
                record.status,
                record.method,
                detail
            )
        },
    )
}

/// Debug echo of the in-memory schedule, in dispatch order.
pub fn debug_schedule(schedule: &Schedule) {
    debug!("In-memory schedule:");
    for request in schedule.requests() {
        debug!(
            "  {}ms -> {} {} ({} {})",
            request.offset_ms,
            request.method,
            request.url,
            request.kind.as_str(),
            request.expected
        );
    }
}
