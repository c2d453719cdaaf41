use crate::{AppState, OperationKind, SubmissionState};

/// Titles of the four progress stages, in display order.
pub const STAGE_TITLES: [&str; 4] = ["Upload CV", "Job Description", "Generate", "Complete"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStage {
    pub step: u8,
    pub title: &'static str,
    pub completed: bool,
    /// The first incomplete stage; at most one stage is active.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub kind: OperationKind,
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureView {
    pub kind: OperationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub resume_name: Option<String>,
    pub resume_bytes: usize,
    pub job_description_chars: usize,
    pub ready: bool,
    pub can_dispatch: bool,
    /// Operation currently in flight.
    pub busy: Option<OperationKind>,
    pub progress: Vec<ProgressStage>,
    pub result: Option<ResultView>,
    pub failure: Option<FailureView>,
    pub copied: bool,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let settled = state.submission().is_settled();
        let completion = [state.has_resume(), state.has_job_description(), settled, settled];
        let active_index = completion.iter().position(|done| !done);
        let progress = STAGE_TITLES
            .into_iter()
            .zip(completion)
            .enumerate()
            .map(|(index, (title, completed))| ProgressStage {
                step: index as u8 + 1,
                title,
                completed,
                active: active_index == Some(index),
            })
            .collect();

        let (busy, result, failure) = match state.submission() {
            SubmissionState::Idle => (None, None, None),
            SubmissionState::Pending { kind, .. } => (Some(*kind), None, None),
            SubmissionState::Settled { kind, artifact } => (
                None,
                Some(ResultView {
                    kind: *kind,
                    label: kind.label(),
                    text: artifact.clone(),
                }),
                None,
            ),
            SubmissionState::Failed { kind, message } => (
                None,
                None,
                Some(FailureView {
                    kind: *kind,
                    message: message.clone(),
                }),
            ),
        };

        Self {
            resume_name: state.resume().map(|resume| resume.file_name.clone()),
            resume_bytes: state.resume().map_or(0, |resume| resume.bytes.len()),
            job_description_chars: state.job_description().chars().count(),
            ready: state.is_ready(),
            can_dispatch: state.can_dispatch(),
            busy,
            progress,
            result,
            failure,
            copied: state.copied(),
        }
    }

    pub fn stage_completed(&self, step: u8) -> bool {
        self.progress
            .iter()
            .any(|stage| stage.step == step && stage.completed)
    }
}
