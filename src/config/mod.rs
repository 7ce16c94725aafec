use std::path::PathBuf;
use std::time::Duration;

use crate::classifier::{RegistryError, SourceRegistry};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ANALYSIS_API_BASE_URL must not be empty")]
    EmptyBaseUrl,
    #[error("ANALYSIS_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub source_registry_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            source_registry_path: None,
        }
    }
}

impl ClientConfig {
    /// Reads `ANALYSIS_API_BASE_URL`, `ANALYSIS_TIMEOUT_SECS` and
    /// `SOURCE_REGISTRY_PATH`. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup("ANALYSIS_API_BASE_URL") {
            Some(raw) => {
                let trimmed = raw.trim().trim_end_matches('/');
                if trimmed.is_empty() {
                    return Err(ConfigError::EmptyBaseUrl);
                }
                trimmed.to_string()
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let request_timeout = match lookup("ANALYSIS_TIMEOUT_SECS") {
            Some(raw) => {
                let parsed = raw.trim().parse::<u64>();
                match parsed {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    _ => return Err(ConfigError::InvalidTimeout(raw)),
                }
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let source_registry_path = lookup("SOURCE_REGISTRY_PATH")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            base_url,
            request_timeout,
            source_registry_path,
        })
    }

    /// Built-in table unless `SOURCE_REGISTRY_PATH` points at a replacement.
    pub fn load_registry(&self) -> Result<SourceRegistry, RegistryError> {
        match &self.source_registry_path {
            Some(path) => SourceRegistry::from_path(path),
            None => Ok(SourceRegistry::builtin().clone()),
        }
    }
}
