//! JobCraft core: pure submission state machine and view-model helpers.
mod effect;
mod export;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ValidationError};
pub use export::{package_artifact, ExportExtension, ExportedFile, EXPORT_CONTENT_TYPE};
pub use msg::Msg;
pub use state::{
    AppState, OperationKind, RequestId, ResumeInput, SubmissionState, FAILURE_FALLBACK_MESSAGE,
};
pub use update::{update, COPIED_ACK_DURATION};
pub use view_model::{AppViewModel, FailureView, ProgressStage, ResultView, STAGE_TITLES};
