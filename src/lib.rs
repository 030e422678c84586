//! Megaverse builder
//!
//! Reads a goal map from the megaverse API and recreates it cell by cell:
//! - Exact-match classification of goal labels into typed commands
//! - One creation request per non-empty cell, sent sequentially
//! - Fixed-delay retry on rate limiting

pub mod api;
pub mod error;
pub mod megaverse;
pub mod orchestrator;

// Re-exports for convenience
pub use api::{HttpMegaverseClient, MegaverseApi};
pub use error::{ConfigError, MegaverseError};
pub use megaverse::{GoalCell, GoalMap, PlacementCommand};
pub use orchestrator::{ConfigLoader, Driver, MegaverseConfig, RunReport};
