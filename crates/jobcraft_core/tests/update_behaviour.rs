use std::sync::Once;

use jobcraft_core::{
    update, AppState, Effect, Msg, OperationKind, ResumeInput, SubmissionState, ValidationError,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobcraft_logging::initialize_for_tests);
}

fn resume() -> ResumeInput {
    ResumeInput::new("cv.txt", b"Jane Doe\nRust engineer".to_vec())
}

fn ready_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::ResumeSelected(resume()));
    let (state, _) = update(
        state,
        Msg::JobDescriptionChanged("Senior Engineer role requiring Go".to_string()),
    );
    state
}

fn dispatch(state: AppState, kind: OperationKind) -> (AppState, Vec<Effect>) {
    update(state, Msg::DispatchClicked(kind))
}

fn request_id_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::DispatchGeneration { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("dispatch effect")
}

#[test]
fn dispatch_without_resume_is_rejected_without_state_change() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::JobDescriptionChanged("Senior Engineer role requiring Go".to_string()),
    );
    let before = state.clone();

    let (next, effects) = dispatch(state, OperationKind::TailorCv);

    assert_eq!(next, before);
    assert_eq!(next.submission(), &SubmissionState::Idle);
    assert_eq!(
        effects,
        vec![Effect::RejectDispatch(ValidationError::MissingResume)]
    );
}

#[test]
fn dispatch_with_blank_description_is_rejected() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ResumeSelected(resume()));
    let (state, _) = update(state, Msg::JobDescriptionChanged("   \n\t".to_string()));
    let before = state.clone();

    let (next, effects) = dispatch(state, OperationKind::GenerateCoverLetter);

    assert_eq!(next, before);
    assert_eq!(
        effects,
        vec![Effect::RejectDispatch(ValidationError::MissingJobDescription)]
    );
}

#[test]
fn dispatch_with_no_inputs_reports_both_missing() {
    init_logging();
    let (next, effects) = dispatch(AppState::new(), OperationKind::TailorCv);

    assert_eq!(next, AppState::new());
    assert_eq!(
        effects,
        vec![Effect::RejectDispatch(ValidationError::MissingInputs)]
    );
    assert_eq!(
        ValidationError::MissingInputs.to_string(),
        "Please upload your CV and enter a job description."
    );
}

#[test]
fn accepted_dispatch_moves_to_pending_and_emits_request() {
    init_logging();
    let (mut state, effects) = dispatch(ready_state(), OperationKind::TailorCv);

    assert_eq!(
        state.submission(),
        &SubmissionState::Pending {
            request_id: 1,
            kind: OperationKind::TailorCv
        }
    );
    assert_eq!(
        effects,
        vec![Effect::DispatchGeneration {
            request_id: 1,
            kind: OperationKind::TailorCv,
            resume: resume(),
            job_description: "Senior Engineer role requiring Go".to_string(),
        }]
    );
    assert!(state.consume_dirty());
    assert!(!state.view().can_dispatch);
}

#[test]
fn second_dispatch_is_blocked_while_pending() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let first_id = request_id_of(&effects);
    let pending = state.clone();

    let (state, effects) = dispatch(state, OperationKind::GenerateCoverLetter);
    assert_eq!(state, pending);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: first_id,
            outcome: Ok("Tailored text...".to_string()),
        },
    );
    let (state, effects) = dispatch(state, OperationKind::GenerateCoverLetter);
    assert_eq!(request_id_of(&effects), first_id + 1);
    assert_eq!(
        state.submission().kind(),
        Some(OperationKind::GenerateCoverLetter)
    );
}

#[test]
fn tailor_scenario_settles_with_artifact_and_label() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let request_id = request_id_of(&effects);

    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id,
            outcome: Ok("Tailored text...".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.submission(),
        &SubmissionState::Settled {
            kind: OperationKind::TailorCv,
            artifact: "Tailored text...".to_string(),
        }
    );
    let result = state.view().result.expect("result view");
    assert_eq!(result.label, "tailored résumé");
    assert_eq!(result.kind, OperationKind::TailorCv);
}

#[test]
fn placeholder_artifact_still_counts_as_settled() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::GenerateCoverLetter);
    let request_id = request_id_of(&effects);

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id,
            outcome: Ok("No result".to_string()),
        },
    );

    assert_eq!(
        state.submission(),
        &SubmissionState::Settled {
            kind: OperationKind::GenerateCoverLetter,
            artifact: "No result".to_string(),
        }
    );
    assert_eq!(state.view().result.unwrap().label, "cover letter");
}

#[test]
fn failure_settles_with_message() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let request_id = request_id_of(&effects);

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id,
            outcome: Err("http status 500".to_string()),
        },
    );

    assert_eq!(
        state.submission(),
        &SubmissionState::Failed {
            kind: OperationKind::TailorCv,
            message: "http status 500".to_string(),
        }
    );
    let view = state.view();
    assert!(view.result.is_none());
    assert_eq!(view.failure.unwrap().message, "http status 500");
    assert!(view.can_dispatch);
}

#[test]
fn failure_message_is_never_empty() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let request_id = request_id_of(&effects);

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id,
            outcome: Err(String::new()),
        },
    );

    match state.submission() {
        SubmissionState::Failed { message, .. } => assert!(!message.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn redispatch_after_failure_clears_previous_outcome() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: request_id_of(&effects),
            outcome: Err("connection refused".to_string()),
        },
    );

    let (state, effects) = dispatch(state, OperationKind::TailorCv);

    assert_eq!(effects.len(), 1);
    let view = state.view();
    assert_eq!(view.busy, Some(OperationKind::TailorCv));
    assert!(view.failure.is_none());
    assert!(view.result.is_none());
}

#[test]
fn late_completion_after_reset_is_discarded() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let stale_id = request_id_of(&effects);
    let (state, _) = update(state, Msg::ResetClicked);

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: stale_id,
            outcome: Ok("Too late".to_string()),
        },
    );

    assert_eq!(state.submission(), &SubmissionState::Idle);
    assert!(state.view().result.is_none());
}

#[test]
fn completion_for_other_request_is_ignored() {
    init_logging();
    let (state, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let current = request_id_of(&effects);
    let pending = state.clone();

    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: current + 7,
            outcome: Ok("Wrong request".to_string()),
        },
    );

    assert_eq!(state, pending);
}

#[test]
fn reset_from_any_state_returns_to_idle_and_clears_inputs() {
    init_logging();
    let (pending, effects) = dispatch(ready_state(), OperationKind::TailorCv);
    let (settled, _) = update(
        pending.clone(),
        Msg::GenerationFinished {
            request_id: request_id_of(&effects),
            outcome: Ok("Tailored text...".to_string()),
        },
    );
    let (failed, _) = update(
        pending.clone(),
        Msg::GenerationFinished {
            request_id: request_id_of(&effects),
            outcome: Err("boom".to_string()),
        },
    );

    for state in [AppState::new(), ready_state(), pending, settled, failed] {
        let (next, effects) = update(state, Msg::ResetClicked);
        assert!(effects.is_empty());
        assert!(next.resume().is_none());
        assert_eq!(next.job_description(), "");
        assert_eq!(next.submission(), &SubmissionState::Idle);
        assert!(!next.copied());
    }
}

#[test]
fn new_resume_replaces_previous_selection() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ResumeSelected(resume()));
    let (state, _) = update(
        state,
        Msg::ResumeSelected(ResumeInput::new("cv.pdf", b"%PDF-1.7".to_vec())),
    );

    let view = state.view();
    assert_eq!(view.resume_name.as_deref(), Some("cv.pdf"));
    assert_eq!(view.resume_bytes, 8);
}

#[test]
fn job_description_is_stored_verbatim() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::JobDescriptionChanged("  padded text \n".to_string()),
    );
    assert_eq!(state.job_description(), "  padded text \n");

    let (mut state, _) = update(state, Msg::JobDescriptionChanged(String::new()));
    assert_eq!(state.job_description(), "");
    assert!(state.consume_dirty());
    assert!(!state.view().ready);
}
