//! Driver
//!
//! One pass over the goal map: fetch it, classify every cell in row-major
//! order and submit the non-empty ones, strictly one at a time.

use std::sync::Arc;
use tracing::{debug, info};

use super::config::MegaverseConfig;
use super::pacing::pause;
use super::submitter::{PlacementOutcome, Submitter};
use crate::api::MegaverseApi;
use crate::error::{MegaverseError, MegaverseResult};
use crate::megaverse::GoalCell;

/// Tally of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub placed: usize,
    pub rejected: usize,
    pub failed: usize,
    pub retry_exhausted: usize,
    /// Empty cells
    pub skipped: usize,
    /// Labels outside the known set
    pub unrecognized: usize,
}

impl RunReport {
    pub fn submitted(&self) -> usize {
        self.placed + self.rejected + self.failed + self.retry_exhausted
    }

    pub fn is_clean(&self) -> bool {
        self.submitted() == self.placed && self.unrecognized == 0
    }

    fn record(&mut self, outcome: &PlacementOutcome) {
        match outcome {
            PlacementOutcome::Placed { .. } => self.placed += 1,
            PlacementOutcome::Rejected { .. } => self.rejected += 1,
            PlacementOutcome::Failed { .. } => self.failed += 1,
            PlacementOutcome::RetryExhausted { .. } => self.retry_exhausted += 1,
        }
    }
}

pub struct Driver {
    api: Arc<dyn MegaverseApi>,
    submitter: Submitter,
    config: MegaverseConfig,
}

impl Driver {
    pub fn new(api: Arc<dyn MegaverseApi>, config: MegaverseConfig) -> Self {
        let submitter = Submitter::new(api.clone(), config.pacing.retry);
        Self { api, submitter, config }
    }

    /// Build the megaverse described by the goal map.
    ///
    /// Fails only when the goal map cannot be obtained; individual placement
    /// failures are counted in the report.
    pub async fn run(&self) -> MegaverseResult<RunReport> {
        let candidate_id = &self.config.candidate_id;

        let goal = self.api.goal_map(candidate_id).await?;
        if goal.is_empty() {
            return Err(MegaverseError::EmptyGoalMap);
        }

        info!(
            "Goal map loaded: {} rows, {} cells",
            goal.row_count(),
            goal.cell_count()
        );

        let mut report = RunReport::default();

        for (row, column, cell) in goal.cells() {
            let Some(command) = cell.command(row, column) else {
                match cell {
                    GoalCell::Unrecognized(_) => report.unrecognized += 1,
                    _ => report.skipped += 1,
                }
                continue;
            };

            let outcome = self.submitter.submit(&command, candidate_id).await;
            report.record(&outcome);

            pause(self.config.pacing.cell_delay).await;
        }

        debug!("Run finished: {:?}", report);
        info!(
            "Placed {} of {} entities ({} rejected, {} failed, {} rate limited, {} unrecognized)",
            report.placed,
            report.submitted(),
            report.rejected,
            report.failed,
            report.retry_exhausted,
            report.unrecognized
        );

        Ok(report)
    }
}
