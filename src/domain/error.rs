use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ConfigError(String),
    HttpError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of a single grade request against the scoring backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    /// Non-2xx response. `body` is the best-effort response text.
    BackendError { status: u16, body: String },
    /// No response at all (connect, DNS, reset, body read).
    RequestFailed(String),
    /// 2xx response whose body is not a JSON report.
    MalformedResponse(String),
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::BackendError { status, body } => {
                write!(f, "Backend error ({}): {}", status, body)
            }
            GradeError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            GradeError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for GradeError {}

/// User-visible classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    TabNotActive,
    BackendError,
    RequestFailed,
}

impl From<&GradeError> for FailureKind {
    fn from(err: &GradeError) -> Self {
        match err {
            GradeError::BackendError { .. } => FailureKind::BackendError,
            // Parse failures read the same as transport failures on the badge.
            GradeError::RequestFailed(_) | GradeError::MalformedResponse(_) => {
                FailureKind::RequestFailed
            }
        }
    }
}
