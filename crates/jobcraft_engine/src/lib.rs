//! JobCraft engine: generation service client and effect execution.
mod client;
mod clipboard;
mod engine;
mod filename;
mod persist;
mod types;

pub use client::{
    endpoint_url, parse_artifact, GenerationService, ReqwestGenerationService, ServiceSettings,
    DEFAULT_BASE_URL, JOB_DESCRIPTION_FIELD, NO_RESULT_PLACEHOLDER, RESUME_FIELD,
};
pub use clipboard::{ClipboardError, ClipboardSink, Osc52Clipboard};
pub use engine::EngineHandle;
pub use filename::numbered_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, Endpoint, FailureKind, GenerationRequest, RequestId, ServiceError,
};
