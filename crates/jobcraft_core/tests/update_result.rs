use jobcraft_core::{
    update, AppState, Effect, ExportExtension, ExportedFile, Msg, OperationKind, ResumeInput,
    COPIED_ACK_DURATION, EXPORT_CONTENT_TYPE,
};

fn settled_state(kind: OperationKind, artifact: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::ResumeSelected(ResumeInput::new("cv.txt", b"resume".to_vec())),
    );
    let (state, _) = update(
        state,
        Msg::JobDescriptionChanged("Platform engineer".to_string()),
    );
    let (state, effects) = update(state, Msg::DispatchClicked(kind));
    let request_id = match effects.as_slice() {
        [Effect::DispatchGeneration { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id,
            outcome: Ok(artifact.to_string()),
        },
    );
    state
}

fn scheduled_token(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::ScheduleCopiedReset { token, after }] => {
            assert_eq!(*after, COPIED_ACK_DURATION);
            *token
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn copy_emits_full_artifact_text() {
    let state = settled_state(OperationKind::TailorCv, "Line one\nLine two");

    let (_state, effects) = update(state, Msg::CopyClicked);

    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "Line one\nLine two".to_string()
        }]
    );
}

#[test]
fn copy_acknowledgment_clears_after_timer() {
    let state = settled_state(OperationKind::TailorCv, "text");
    let (state, _) = update(state, Msg::CopyClicked);

    let (state, effects) = update(state, Msg::CopyFinished { succeeded: true });
    let token = scheduled_token(&effects);
    assert!(state.view().copied);

    let (state, _) = update(state, Msg::CopiedExpired { token });
    assert!(!state.view().copied);
}

#[test]
fn stale_copy_timer_does_not_clear_newer_acknowledgment() {
    let state = settled_state(OperationKind::TailorCv, "text");
    let (state, effects) = update(state, Msg::CopyFinished { succeeded: true });
    let first = scheduled_token(&effects);
    let (state, effects) = update(state, Msg::CopyFinished { succeeded: true });
    let second = scheduled_token(&effects);
    assert_ne!(first, second);

    let (state, _) = update(state, Msg::CopiedExpired { token: first });
    assert!(state.view().copied);

    let (state, _) = update(state, Msg::CopiedExpired { token: second });
    assert!(!state.view().copied);
}

#[test]
fn failed_copy_never_shows_acknowledgment() {
    let state = settled_state(OperationKind::TailorCv, "text");
    let (state, effects) = update(state, Msg::CopyFinished { succeeded: false });

    assert!(effects.is_empty());
    assert!(!state.view().copied);
}

#[test]
fn export_packages_plain_text_under_suggested_name() {
    let state = settled_state(OperationKind::GenerateCoverLetter, "Dear hiring manager");

    let (_state, effects) = update(state, Msg::ExportClicked(ExportExtension::Docx));

    assert_eq!(
        effects,
        vec![Effect::ExportArtifact(ExportedFile {
            file_name: "cover-letter.docx".to_string(),
            content_type: EXPORT_CONTENT_TYPE,
            bytes: b"Dear hiring manager".to_vec(),
        })]
    );
}

#[test]
fn presenter_actions_are_noops_without_settled_result() {
    let (idle, _) = update(
        AppState::new(),
        Msg::ResumeSelected(ResumeInput::new("cv.txt", b"resume".to_vec())),
    );
    let (idle, _) = update(idle, Msg::JobDescriptionChanged("Role".to_string()));
    let (pending, effects) = update(idle.clone(), Msg::DispatchClicked(OperationKind::TailorCv));
    let request_id = match effects.as_slice() {
        [Effect::DispatchGeneration { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (failed, _) = update(
        pending.clone(),
        Msg::GenerationFinished {
            request_id,
            outcome: Err("timeout".to_string()),
        },
    );

    for state in [idle, pending, failed] {
        let before = state.clone();
        let (state, copy) = update(state, Msg::CopyClicked);
        let (state, ack) = update(state, Msg::CopyFinished { succeeded: true });
        let (state, export) = update(state, Msg::ExportClicked(ExportExtension::Txt));
        assert!(copy.is_empty());
        assert!(ack.is_empty());
        assert!(export.is_empty());
        assert_eq!(state, before);
    }
}

#[test]
fn new_dispatch_hides_previous_result_and_acknowledgment() {
    let state = settled_state(OperationKind::TailorCv, "old");
    let (state, _) = update(state, Msg::CopyFinished { succeeded: true });
    assert!(state.view().copied);

    let (state, _) = update(state, Msg::DispatchClicked(OperationKind::GenerateCoverLetter));

    let view = state.view();
    assert!(view.result.is_none());
    assert!(!view.copied);
    assert_eq!(view.busy, Some(OperationKind::GenerateCoverLetter));
}
