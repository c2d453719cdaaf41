use jobcraft_core::{AppViewModel, ProgressStage};

/// Renders the view model as terminal lines.
///
/// The artifact body is only printed when it differs from `previous`, so
/// status changes such as the copy acknowledgment do not reprint it.
pub fn render(view: &AppViewModel, previous: Option<&AppViewModel>) -> Vec<String> {
    let mut lines = vec![progress_line(&view.progress)];

    let resume = match &view.resume_name {
        Some(name) => format!("✓ {name} ({} bytes)", view.resume_bytes),
        None => "none".to_string(),
    };
    lines.push(format!(
        "CV: {resume} | job description: {} chars",
        view.job_description_chars
    ));

    if let Some(kind) = view.busy {
        lines.push(format!("Generating {}...", kind.label()));
    } else if let Some(failure) = &view.failure {
        lines.push(format!("Error: {}", failure.message));
    } else if view.result.is_none() {
        let hint = if view.ready {
            "Ready: `tailor` or `cover`."
        } else {
            "Provide a CV (`resume <path>`) and a job description (`jd <text>`)."
        };
        lines.push(hint.to_string());
    }

    if let Some(result) = &view.result {
        let previous_result = previous.and_then(|prev| prev.result.as_ref());
        if previous_result != Some(result) {
            lines.push(format!("--- Your {} ---", result.label));
            lines.extend(result.text.lines().map(str::to_owned));
            lines.push("---".to_string());
        }
        let copied = if view.copied { " (copied!)" } else { "" };
        lines.push(format!("`copy` or `export <txt|docx>` the {}{copied}", result.label));
    }

    lines
}

fn progress_line(stages: &[ProgressStage]) -> String {
    stages
        .iter()
        .map(|stage| {
            let marker = if stage.completed {
                "✓".to_string()
            } else if stage.active {
                format!(">{}", stage.step)
            } else {
                stage.step.to_string()
            };
            format!("[{marker}] {}", stage.title)
        })
        .collect::<Vec<_>>()
        .join("  ")
}
