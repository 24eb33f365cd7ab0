use std::collections::BTreeMap;

use tracing::debug;

use super::types::{HttpMethod, Request, Schedule, VerificationKind};
use crate::error::ScheduleError;

const COMMENT_MARKER: char = '#';

/// Parses schedule directives, one per line:
///
/// ```text
/// <startTimeMs> <URL> <method> [<verificationKind> <expectedValue>]
/// ```
///
/// Lines containing a comment marker and lines with fewer than three
/// tokens are skipped. A directive without an explicit verification
/// pair defaults to a status-code check against 200.
///
/// # Errors
///
/// Returns an error for a malformed start offset or an unknown
/// verification kind; either aborts schedule construction.
pub fn parse_schedule(input: &str) -> Result<Schedule, ScheduleError> {
    let mut buckets: BTreeMap<u64, Vec<Request>> = BTreeMap::new();

    for (index, raw_line) in input.lines().enumerate() {
        let line = index.saturating_add(1);
        let text = raw_line.trim();
        debug!("{}: {}", line, text);

        if text.contains(COMMENT_MARKER) {
            continue;
        }
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < 3 {
            if !text.is_empty() {
                debug!("Line {}: fewer than 3 fields, dropped", line);
            }
            continue;
        }
        let (Some(offset_token), Some(url), Some(method_token)) =
            (tokens.first(), tokens.get(1), tokens.get(2))
        else {
            continue;
        };

        let offset_ms = parse_offset_ms(offset_token).ok_or_else(|| {
            ScheduleError::InvalidOffset {
                line,
                value: (*offset_token).to_owned(),
            }
        })?;

        let (kind, expected) = match (tokens.get(3), tokens.get(4)) {
            (Some(kind_token), Some(value_token)) => {
                let kind = VerificationKind::from_token(kind_token).ok_or_else(|| {
                    ScheduleError::UnknownVerificationKind {
                        line,
                        kind: (*kind_token).to_owned(),
                    }
                })?;
                (kind, (*value_token).to_owned())
            }
            _ => {
                let kind = VerificationKind::Code;
                (kind, kind.default_expected().to_owned())
            }
        };

        buckets.entry(offset_ms).or_default().push(Request {
            slot: 0,
            offset_ms,
            url: (*url).to_owned(),
            method: HttpMethod::from_token(method_token),
            kind,
            expected,
        });
    }

    Ok(Schedule::from_buckets(buckets))
}

/// Offsets are bucket keys, so they use fixed-point milliseconds:
/// decimal spellings round to the nearest whole millisecond and land in
/// the same bucket as their integral form.
fn parse_offset_ms(token: &str) -> Option<u64> {
    if let Ok(offset) = token.parse::<u64>() {
        return Some(offset);
    }
    let value = token.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.round() as u64)
}
