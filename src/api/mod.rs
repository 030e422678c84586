//! Megaverse API
//!
//! The remote service sits behind [`MegaverseApi`] so the submitter and the
//! driver can be exercised against scripted responses.

mod client;

pub use client::{HttpMegaverseClient, DEFAULT_BASE_URL};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::MegaverseResult;
use crate::megaverse::{EntityKind, GoalMap, PlacementRequest};
use crate::orchestrator::CandidateId;

#[async_trait]
pub trait MegaverseApi: Send + Sync {
    /// Fetch the goal map for `candidate_id`.
    ///
    /// A non-success status, an undecodable body or a transport failure is
    /// an error. A response without a `goal` field yields an empty map.
    async fn goal_map(&self, candidate_id: &CandidateId) -> MegaverseResult<GoalMap>;

    /// Send one creation request and report the status the service answered
    /// with. Only transport failures are errors; status interpretation
    /// belongs to the caller.
    async fn place(
        &self,
        kind: EntityKind,
        request: &PlacementRequest<'_>,
    ) -> MegaverseResult<StatusCode>;
}
