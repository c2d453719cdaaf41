use std::time::Duration;

use crate::{ExportedFile, OperationKind, RequestId, ResumeInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit both inputs to the route selected by `kind`.
    DispatchGeneration {
        request_id: RequestId,
        kind: OperationKind,
        resume: ResumeInput,
        job_description: String,
    },
    /// Tell the user why nothing was sent.
    RejectDispatch(ValidationError),
    CopyToClipboard { text: String },
    /// Send `Msg::CopiedExpired { token }` once `after` has elapsed.
    ScheduleCopiedReset { token: u64, after: Duration },
    ExportArtifact(ExportedFile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload your CV and enter a job description.")]
    MissingInputs,
    #[error("Please upload your CV and enter a job description.")]
    MissingResume,
    #[error("Please upload your CV and enter a job description.")]
    MissingJobDescription,
}

impl ValidationError {
    pub(crate) fn for_inputs(has_resume: bool, has_job_description: bool) -> Option<Self> {
        match (has_resume, has_job_description) {
            (true, true) => None,
            (false, false) => Some(ValidationError::MissingInputs),
            (false, true) => Some(ValidationError::MissingResume),
            (true, false) => Some(ValidationError::MissingJobDescription),
        }
    }
}
