//! Error taxonomy
//!
//! Configuration failures abort the process before any network traffic.
//! Goal-map failures abort the run. Per-placement failures never surface
//! here; the submitter records them as a `PlacementOutcome` instead.

use reqwest::StatusCode;
use std::path::PathBuf;

/// Failures while loading `config.json`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The configuration file {} does not exist.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error decoding {}. Ensure it is valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CANDIDATE_ID is not set in the config file.")]
    MissingCandidateId,

    #[error("Invalid API_BASE_URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Failures that end a run against the remote service
#[derive(Debug, thiserror::Error)]
pub enum MegaverseError {
    #[error("Failed to fetch goal map - Status Code: {}", .0.as_u16())]
    GoalFetch(StatusCode),

    #[error("Failed to decode goal map: {0}")]
    GoalDecode(String),

    #[error("Goal map is empty or not available.")]
    EmptyGoalMap,

    #[error("Request to the megaverse API failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type MegaverseResult<T> = std::result::Result<T, MegaverseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_fetch_message_carries_status() {
        let err = MegaverseError::GoalFetch(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Failed to fetch goal map - Status Code: 404");
    }

    #[test]
    fn test_not_found_names_path() {
        let err = ConfigError::NotFound(PathBuf::from("missing.json"));
        assert!(err.to_string().contains("missing.json"));
    }
}
