//! HTTP implementation of the megaverse API using reqwest.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::MegaverseApi;
use crate::error::{MegaverseError, MegaverseResult};
use crate::megaverse::{EntityKind, GoalMap, PlacementRequest};
use crate::orchestrator::CandidateId;

pub const DEFAULT_BASE_URL: &str = "https://challenge.crossmint.io/api";

#[derive(Debug, Deserialize)]
struct GoalEnvelope {
    #[serde(default)]
    goal: Option<GoalMap>,
}

pub struct HttpMegaverseClient {
    client: Client,
    base_url: String,
}

impl HttpMegaverseClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("megaverse/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl MegaverseApi for HttpMegaverseClient {
    async fn goal_map(&self, candidate_id: &CandidateId) -> MegaverseResult<GoalMap> {
        let url = self.url(&format!("map/{}/goal", candidate_id.as_str()));
        debug!("Fetching goal map: {}", url);

        let res = self.client.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(MegaverseError::GoalFetch(status));
        }

        let body = res.text().await?;
        let envelope: GoalEnvelope =
            serde_json::from_str(&body).map_err(|e| MegaverseError::GoalDecode(e.to_string()))?;

        Ok(envelope.goal.unwrap_or_default())
    }

    async fn place(
        &self,
        kind: EntityKind,
        request: &PlacementRequest<'_>,
    ) -> MegaverseResult<StatusCode> {
        let url = self.url(kind.endpoint());
        debug!("POST {} row={} column={}", url, request.row, request.column);

        let res = self.client.post(&url).json(request).send().await?;
        Ok(res.status())
    }
}
