use std::time::Duration;

use crate::{package_artifact, AppState, Effect, Msg, SubmissionState, ValidationError};

/// How long the "copied" acknowledgment stays visible.
pub const COPIED_ACK_DURATION: Duration = Duration::from_secs(2);

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ResumeSelected(resume) => {
            state.set_resume(resume);
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::DispatchClicked(kind) => {
            // Actions are disabled while a request is in flight; a stray click is dropped.
            if state.submission().is_pending() {
                return (state, Vec::new());
            }
            if let Some(err) = ValidationError::for_inputs(state.has_resume(), state.has_job_description()) {
                return (state, vec![Effect::RejectDispatch(err)]);
            }
            let Some(resume) = state.resume().cloned() else {
                return (state, Vec::new());
            };
            let job_description = state.job_description().to_string();
            let request_id = state.begin_request(kind);
            vec![Effect::DispatchGeneration {
                request_id,
                kind,
                resume,
                job_description,
            }]
        }
        Msg::GenerationFinished {
            request_id,
            outcome,
        } => {
            state.settle(request_id, outcome);
            Vec::new()
        }
        Msg::CopyClicked => match state.submission() {
            SubmissionState::Settled { artifact, .. } => vec![Effect::CopyToClipboard {
                text: artifact.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::CopyFinished { succeeded } => {
            if succeeded && state.submission().is_settled() {
                let token = state.mark_copied();
                vec![Effect::ScheduleCopiedReset {
                    token,
                    after: COPIED_ACK_DURATION,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::CopiedExpired { token } => {
            state.expire_copied(token);
            Vec::new()
        }
        Msg::ExportClicked(extension) => match state.submission() {
            SubmissionState::Settled { kind, artifact } => {
                vec![Effect::ExportArtifact(package_artifact(*kind, artifact, extension))]
            }
            _ => Vec::new(),
        },
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
    };

    (state, effects)
}
