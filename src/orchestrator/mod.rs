//! Orchestrator Module
//!
//! Configuration, pacing, and the sequential submit loop that turns a goal
//! map into API calls.

mod config;
mod driver;
mod pacing;
mod submitter;

pub use config::{CandidateId, ConfigLoader, MegaverseConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
pub use driver::{Driver, RunReport};
pub use pacing::{Pacing, RetryPolicy, DEFAULT_CELL_DELAY, DEFAULT_RETRY_DELAY};
pub use submitter::{PlacementOutcome, Submitter};
