use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    SourceUnavailable,
    Timeout,
    DeviceRejected,
    TransportFailure,
}

/// What went wrong talking to the controller, as an operator needs to tell it apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    SourceUnavailable,
    Timeout,
    DeviceRejected,
    TransportFailure,
}

impl FailureKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::SourceUnavailable => "no light sequences available from controller or snapshot",
            Self::Timeout => "light controller did not respond in time",
            Self::DeviceRejected => "light controller rejected the request",
            Self::TransportFailure => "light controller unreachable",
        }
    }
}

impl From<FailureKind> for ErrorCode {
    fn from(value: FailureKind) -> Self {
        match value {
            FailureKind::SourceUnavailable => Self::SourceUnavailable,
            FailureKind::Timeout => Self::Timeout,
            FailureKind::DeviceRejected => Self::DeviceRejected,
            FailureKind::TransportFailure => Self::TransportFailure,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The operator-facing message for `kind`, followed by the underlying detail.
    pub fn from_failure(kind: FailureKind, detail: impl std::fmt::Display) -> Self {
        Self::new(kind.into(), format!("{}: {detail}", kind.message()))
    }
}
