use crate::{ExportExtension, OperationKind, RequestId, ResumeInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked (or dropped) a résumé file.
    ResumeSelected(ResumeInput),
    /// User edited the job description.
    JobDescriptionChanged(String),
    /// User asked for one of the two generation operations.
    DispatchClicked(OperationKind),
    /// Engine settled a dispatched request, with the artifact or the error text.
    GenerationFinished {
        request_id: RequestId,
        outcome: Result<String, String>,
    },
    /// User clicked Copy on the presented artifact.
    CopyClicked,
    /// Platform finished writing to the clipboard.
    CopyFinished { succeeded: bool },
    /// The copy acknowledgment timer fired.
    CopiedExpired { token: u64 },
    /// User asked to save the presented artifact.
    ExportClicked(ExportExtension),
    /// User clicked Start Over.
    ResetClicked,
}
