//! Configuration
//!
//! Loads the candidate identity and run settings from `config.json` once at
//! startup. The resulting [`MegaverseConfig`] is immutable and threaded by
//! reference into everything that talks to the API.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use super::pacing::{Pacing, RetryPolicy, DEFAULT_CELL_DELAY, DEFAULT_RETRY_DELAY};
use crate::api::DEFAULT_BASE_URL;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const CONFIG_PATH_ENV: &str = "MEGAVERSE_CONFIG";

/// Opaque candidate identifier attached to every request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::MissingCandidateId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// On-disk shape of `config.json`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawConfig {
    candidate_id: Option<String>,
    api_base_url: Option<String>,
    cell_delay_ms: Option<u64>,
    retry_delay_ms: Option<u64>,
    max_retries: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MegaverseConfig {
    pub candidate_id: CandidateId,
    pub api_base_url: String,
    pub pacing: Pacing,
}

impl MegaverseConfig {
    /// Config with default settings for `candidate_id`
    pub fn new(candidate_id: CandidateId) -> Self {
        Self {
            candidate_id,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            pacing: Pacing::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let candidate_id = CandidateId::new(raw.candidate_id.unwrap_or_default())?;

        let api_base_url = raw.api_base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(api_base_url));
        }

        let retry_delay = raw
            .retry_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RETRY_DELAY);
        let pacing = Pacing {
            cell_delay: raw
                .cell_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CELL_DELAY),
            retry: RetryPolicy {
                delay: retry_delay,
                max_retries: raw.max_retries,
            },
        };

        Ok(Self {
            candidate_id,
            api_base_url,
            pacing,
        })
    }
}

pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from `MEGAVERSE_CONFIG`, falling back to `config.json`
    pub fn from_env() -> Self {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<MegaverseConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(self.path.clone()));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let raw: RawConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::InvalidJson {
                path: self.path.clone(),
                source,
            })?;

        MegaverseConfig::from_raw(raw)
    }
}
