use std::path::PathBuf;
use std::time::Duration;

use jobcraft_engine::{endpoint_url, Endpoint, ServiceSettings, DEFAULT_BASE_URL};
use log::LevelFilter;
use thiserror::Error;

use super::logging::LogDestination;

pub const API_URL_VAR: &str = "JOBCRAFT_API_URL";
pub const OUTPUT_DIR_VAR: &str = "JOBCRAFT_OUTPUT_DIR";
pub const LOG_LEVEL_VAR: &str = "JOBCRAFT_LOG_LEVEL";
pub const LOG_DEST_VAR: &str = "JOBCRAFT_LOG_DEST";
pub const TIMEOUT_VAR: &str = "JOBCRAFT_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid service url {value:?} ({reason})")]
    ServiceUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("{var}: unknown value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub output_dir: PathBuf,
    pub log_level: LevelFilter,
    pub log_destination: LogDestination,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Both routes share the base, so checking one is enough.
        endpoint_url(&base_url, Endpoint::TailorCv).map_err(|err| ConfigError::ServiceUrl {
            var: API_URL_VAR,
            value: base_url.clone(),
            reason: err.message,
        })?;

        let mut service = ServiceSettings::with_base_url(base_url);
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            service.request_timeout = Duration::from_secs(secs);
        }

        let output_dir = lookup(OUTPUT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("output"));

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(raw) => jobcraft_logging::parse_level(&raw).ok_or(ConfigError::Invalid {
                var: LOG_LEVEL_VAR,
                value: raw.clone(),
            })?,
            None => LevelFilter::Info,
        };

        let log_destination = match lookup(LOG_DEST_VAR) {
            Some(raw) => LogDestination::parse(&raw).ok_or(ConfigError::Invalid {
                var: LOG_DEST_VAR,
                value: raw.clone(),
            })?,
            None => LogDestination::default(),
        };

        Ok(Self {
            service,
            output_dir,
            log_level,
            log_destination,
        })
    }
}
