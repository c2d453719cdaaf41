use bytes::Bytes;

use crate::view_model::AppViewModel;

/// Sequence number tagging each accepted dispatch within a session.
pub type RequestId = u64;

/// Message used when a failed settlement arrives without any error text.
pub const FAILURE_FALLBACK_MESSAGE: &str = "Request failed";

/// The two generation routes offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    TailorCv,
    GenerateCoverLetter,
}

impl OperationKind {
    /// Human-facing name of the artifact this operation produces.
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::TailorCv => "tailored résumé",
            OperationKind::GenerateCoverLetter => "cover letter",
        }
    }

    /// Stem used when suggesting a filename for an exported artifact.
    pub fn file_stem(self) -> &'static str {
        match self {
            OperationKind::TailorCv => "tailored-cv",
            OperationKind::GenerateCoverLetter => "cover-letter",
        }
    }
}

/// The selected résumé: an opaque payload plus the name shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeInput {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeInput {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Lifecycle of the single submission slot.
///
/// Each variant carries exactly the data valid in that phase, so a pending
/// request can never also hold an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
        kind: OperationKind,
    },
    Settled {
        kind: OperationKind,
        artifact: String,
    },
    Failed {
        kind: OperationKind,
        message: String,
    },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Settled { .. })
    }

    /// Operation most recently dispatched, if any survives in this state.
    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Pending { kind, .. }
            | SubmissionState::Settled { kind, .. }
            | SubmissionState::Failed { kind, .. } => Some(*kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    resume: Option<ResumeInput>,
    job_description: String,
    submission: SubmissionState,
    last_request_id: RequestId,
    copied: bool,
    copy_token: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    pub fn resume(&self) -> Option<&ResumeInput> {
        self.resume.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn has_resume(&self) -> bool {
        self.resume.is_some()
    }

    /// Whitespace-only descriptions count as absent.
    pub fn has_job_description(&self) -> bool {
        !self.job_description.trim().is_empty()
    }

    /// Both inputs supplied; says nothing about whether a request is in flight.
    pub fn is_ready(&self) -> bool {
        self.has_resume() && self.has_job_description()
    }

    pub fn can_dispatch(&self) -> bool {
        self.is_ready() && !self.submission.is_pending()
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_resume(&mut self, resume: ResumeInput) {
        self.resume = Some(resume);
        self.dirty = true;
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.dirty = true;
        }
    }

    /// Moves to `Pending`, dropping any previous result, and returns the new request id.
    pub(crate) fn begin_request(&mut self, kind: OperationKind) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.submission = SubmissionState::Pending { request_id, kind };
        self.clear_copied();
        self.dirty = true;
        request_id
    }

    /// Settles the pending request if `request_id` still identifies it.
    ///
    /// Returns `false` for stale completions, leaving the state untouched.
    pub(crate) fn settle(&mut self, request_id: RequestId, outcome: Result<String, String>) -> bool {
        let kind = match self.submission {
            SubmissionState::Pending {
                request_id: pending,
                kind,
            } if pending == request_id => kind,
            _ => return false,
        };
        self.submission = match outcome {
            Ok(artifact) => SubmissionState::Settled { kind, artifact },
            Err(message) => {
                let message = if message.trim().is_empty() {
                    FAILURE_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                };
                SubmissionState::Failed { kind, message }
            }
        };
        self.dirty = true;
        true
    }

    /// Raises the copy acknowledgment and returns the token that may later clear it.
    pub(crate) fn mark_copied(&mut self) -> u64 {
        self.copy_token += 1;
        self.copied = true;
        self.dirty = true;
        self.copy_token
    }

    pub(crate) fn expire_copied(&mut self, token: u64) {
        if self.copied && token == self.copy_token {
            self.copied = false;
            self.dirty = true;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.resume = None;
        self.job_description.clear();
        self.submission = SubmissionState::Idle;
        self.clear_copied();
        self.dirty = true;
    }

    fn clear_copied(&mut self) {
        self.copied = false;
        // Outstanding expiry timers must not touch a later acknowledgment.
        self.copy_token += 1;
    }
}
