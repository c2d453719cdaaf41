use std::fmt;

use bytes::Bytes;

pub type RequestId = u64;

/// The two routes exposed by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TailorCv,
    CoverLetter,
}

impl Endpoint {
    /// Path segments appended to the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::TailorCv => "cv/tailor",
            Endpoint::CoverLetter => "cover-letter/generate",
        }
    }
}

/// One multipart submission: the résumé file plus the job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub endpoint: Endpoint,
    pub resume_name: String,
    pub resume_bytes: Bytes,
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    GenerationCompleted {
        request_id: RequestId,
        result: Result<String, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    Network,
    /// The engine no longer accepts requests.
    EngineStopped,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::EngineStopped => write!(f, "engine stopped"),
        }
    }
}
