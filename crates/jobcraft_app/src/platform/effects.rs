use std::sync::mpsc::RecvTimeoutError;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobcraft_core::{Effect, ExportedFile, Msg, OperationKind};
use jobcraft_engine::{
    AtomicFileWriter, ClipboardSink, EngineEvent, EngineHandle, Endpoint, GenerationRequest,
};
use jobcraft_logging::{jobcraft_error, jobcraft_info, jobcraft_warn};

/// Executes effects returned by `update` and feeds completions back as messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    clipboard: Box<dyn ClipboardSink>,
    writer: AtomicFileWriter,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        clipboard: Box<dyn ClipboardSink>,
        writer: AtomicFileWriter,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
            clipboard,
            writer,
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    /// Runs `effects` in order and returns notices for the user.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::DispatchGeneration {
                    request_id,
                    kind,
                    resume,
                    job_description,
                } => {
                    jobcraft_info!(
                        "DispatchGeneration request_id={} kind={:?} resume={}",
                        request_id,
                        kind,
                        resume.file_name
                    );
                    let request = GenerationRequest {
                        endpoint: map_operation(kind),
                        resume_name: resume.file_name,
                        resume_bytes: resume.bytes,
                        job_description,
                    };
                    if let Err(err) = self.engine.dispatch(request_id, request) {
                        jobcraft_error!("request {} not dispatched: {}", request_id, err);
                        let _ = self.msg_tx.send(Msg::GenerationFinished {
                            request_id,
                            outcome: Err(err.to_string()),
                        });
                    }
                }
                Effect::RejectDispatch(err) => {
                    jobcraft_info!("dispatch rejected: {:?}", err);
                    notices.push(err.to_string());
                }
                Effect::CopyToClipboard { text } => {
                    let succeeded = match self.clipboard.set_text(&text) {
                        Ok(()) => true,
                        Err(err) => {
                            jobcraft_warn!("Failed to copy text: {}", err);
                            false
                        }
                    };
                    let _ = self.msg_tx.send(Msg::CopyFinished { succeeded });
                }
                Effect::ScheduleCopiedReset { token, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::CopiedExpired { token });
                    });
                }
                Effect::ExportArtifact(file) => notices.push(self.export(file)),
            }
        }
        notices
    }

    fn export(&self, file: ExportedFile) -> String {
        match self.writer.write_new(&file.file_name, &file.bytes) {
            Ok(path) => {
                jobcraft_info!(
                    "exported {} bytes ({}) to {:?}",
                    file.bytes.len(),
                    file.content_type,
                    path
                );
                format!("Saved {}", path.display())
            }
            Err(err) => {
                jobcraft_error!("Failed to export {}: {}", file.file_name, err);
                format!("Could not save {}: {}", file.file_name, err)
            }
        }
    }

    /// Stops the engine; requests already in flight get a short grace period.
    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn spawn_event_loop(&self) {
        let engine = Arc::downgrade(&self.engine);
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            // Only upgraded per poll, so dropping the runner releases the engine.
            let Some(handle) = engine.upgrade() else {
                break;
            };
            let event = match handle.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };
            match event {
                EngineEvent::GenerationCompleted { request_id, result } => {
                    let msg = Msg::GenerationFinished {
                        request_id,
                        outcome: result.map_err(|err| err.to_string()),
                    };
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
            }
        });
    }
}

fn map_operation(kind: OperationKind) -> Endpoint {
    match kind {
        OperationKind::TailorCv => Endpoint::TailorCv,
        OperationKind::GenerateCoverLetter => Endpoint::CoverLetter,
    }
}
