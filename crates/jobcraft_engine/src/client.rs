use std::time::Duration;

use futures_util::StreamExt;
use jobcraft_logging::{jobcraft_debug, jobcraft_info};
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use url::Url;

use crate::{Endpoint, FailureKind, GenerationRequest, ServiceError};

/// Address used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Multipart field carrying the résumé file.
pub const RESUME_FIELD: &str = "cv_file";
/// Multipart field carrying the job description text.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
/// Artifact used when a successful response names neither known field.
pub const NO_RESULT_PLACEHOLDER: &str = "No result";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Generation runs a language model server-side and is slow.
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ServiceSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Resolves the route for `endpoint` below `base`, keeping any path prefix of `base`.
pub fn endpoint_url(base: &str, endpoint: Endpoint) -> Result<Url, ServiceError> {
    let mut url = Url::parse(base.trim())
        .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ServiceError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    url.path_segments_mut()
        .map_err(|()| ServiceError::new(FailureKind::InvalidUrl, "url cannot be a base"))?
        .pop_if_empty()
        .extend(endpoint.path().split('/'));
    Ok(url)
}

/// Response fields that may carry the artifact, in lookup order.
const ARTIFACT_FIELDS: [&str; 2] = ["tailored_cv", "cover_letter"];

/// Extracts the artifact from a successful response body.
///
/// Either field name is accepted on either route. Non-string values are
/// shown as their JSON text. A body naming neither field (or only empty,
/// `null`, `false` or zero values) still succeeds, with
/// [`NO_RESULT_PLACEHOLDER`] as the artifact. A body that is not a JSON
/// object is an [`FailureKind::InvalidBody`] failure.
pub fn parse_artifact(body: &[u8]) -> Result<String, ServiceError> {
    let response: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|err| ServiceError::new(FailureKind::InvalidBody, err.to_string()))?;
    let artifact = ARTIFACT_FIELDS
        .into_iter()
        .filter_map(|field| response.get(field))
        .find_map(artifact_text)
        .unwrap_or_else(|| NO_RESULT_PLACEHOLDER.to_string());
    Ok(artifact)
}

fn artifact_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerationService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestGenerationService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ServiceError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ServiceError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ServiceError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl GenerationService for ReqwestGenerationService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ServiceError> {
        let url = endpoint_url(&self.settings.base_url, request.endpoint)?;
        let resume = Part::bytes(request.resume_bytes.to_vec()).file_name(request.resume_name.clone());
        let form = Form::new()
            .part(RESUME_FIELD, resume)
            .text(JOB_DESCRIPTION_FIELD, request.job_description.clone());

        jobcraft_info!(
            "POST {} resume={} resume_bytes={} description_chars={}",
            url,
            request.resume_name,
            request.resume_bytes.len(),
            request.job_description.chars().count()
        );

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The error body is only a hint; an oversized one is dropped.
            let detail = match self.read_body(response).await {
                Ok(body) => summarize_body(&String::from_utf8_lossy(&body)),
                Err(err) => {
                    jobcraft_debug!("error body for status {} skipped: {}", status, err);
                    String::new()
                }
            };
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                detail,
            ));
        }

        let body = self.read_body(response).await?;
        jobcraft_debug!("response body {} bytes", body.len());
        parse_artifact(&body)
    }
}

fn summarize_body(body: &str) -> String {
    const LIMIT: usize = 200;
    let trimmed = body.trim();
    match trimmed.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
