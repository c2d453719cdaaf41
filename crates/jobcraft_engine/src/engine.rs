use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use jobcraft_logging::{jobcraft_info, jobcraft_warn};

use crate::client::GenerationService;
use crate::{EngineEvent, FailureKind, GenerationRequest, RequestId, ServiceError};

enum EngineCommand {
    Generate {
        request_id: RequestId,
        request: GenerationRequest,
    },
}

/// Runs generation requests on a background tokio runtime.
///
/// Requests are never cancelled: each one runs until the service answers or
/// fails, and its completion is reported through [`EngineHandle::recv_timeout`].
/// Dropping the handle or calling [`EngineHandle::shutdown`] stops the engine
/// after a short grace period for in-flight requests.
pub struct EngineHandle {
    cmd_tx: Mutex<Option<mpsc::Sender<EngineCommand>>>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn GenerationService>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("jobcraft-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
            jobcraft_info!("engine stopping");
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Ok(Self {
            cmd_tx: Mutex::new(Some(cmd_tx)),
            event_rx: Mutex::new(event_rx),
        })
    }

    /// Queues a request. Fails with [`FailureKind::EngineStopped`] when the
    /// engine was shut down or its thread is gone.
    pub fn dispatch(
        &self,
        request_id: RequestId,
        request: GenerationRequest,
    ) -> Result<(), ServiceError> {
        let guard = self.cmd_tx.lock().map_err(|_| engine_stopped())?;
        let cmd_tx = guard.as_ref().ok_or_else(engine_stopped)?;
        cmd_tx
            .send(EngineCommand::Generate {
                request_id,
                request,
            })
            .map_err(|_| {
                jobcraft_warn!("engine thread gone; request {} dropped", request_id);
                engine_stopped()
            })
    }

    /// Stops accepting requests. Completions of requests already queued are
    /// still delivered, after which the event channel disconnects.
    pub fn shutdown(&self) {
        if let Ok(mut cmd_tx) = self.cmd_tx.lock() {
            cmd_tx.take();
        }
    }

    /// Waits up to `timeout` for the next completion.
    ///
    /// `Disconnected` means the engine has stopped and no more events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?
            .recv_timeout(timeout)
    }
}

fn engine_stopped() -> ServiceError {
    ServiceError::new(FailureKind::EngineStopped, "")
}

async fn handle_command(
    service: &dyn GenerationService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate {
            request_id,
            request,
        } => {
            let result = service.generate(&request).await;
            match &result {
                Ok(artifact) => jobcraft_info!(
                    "request {} settled: {} chars",
                    request_id,
                    artifact.chars().count()
                ),
                Err(err) => jobcraft_warn!("request {} failed: {}", request_id, err),
            }
            let _ = event_tx.send(EngineEvent::GenerationCompleted { request_id, result });
        }
    }
}
