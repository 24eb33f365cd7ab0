use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Line {line}: invalid start offset '{value}'. Expected non-negative milliseconds.")]
    InvalidOffset { line: usize, value: String },
    #[error("Line {line}: unknown verification kind '{kind}'. Supported kinds: code.")]
    UnknownVerificationKind { line: usize, kind: String },
}
