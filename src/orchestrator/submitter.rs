//! Submitter
//!
//! Sends one placement command and interprets the answer. Rate-limited
//! requests are re-sent unchanged after a fixed delay; every other outcome
//! is terminal for the command and is only logged.

use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::config::CandidateId;
use super::pacing::{pause, RetryPolicy};
use crate::api::MegaverseApi;
use crate::megaverse::PlacementCommand;

/// What happened to a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed { attempts: u32 },
    /// The service answered with a non-success, non-429 status
    Rejected { status: StatusCode },
    /// No HTTP response at all
    Failed { reason: String },
    /// Still rate limited when the retry ceiling was reached
    RetryExhausted { attempts: u32 },
}

/// Attempt counter step; an unbounded retry loop must not overflow
fn next_attempt(attempts: u32) -> u32 {
    attempts.saturating_add(1)
}

pub struct Submitter {
    api: Arc<dyn MegaverseApi>,
    retry: RetryPolicy,
}

impl Submitter {
    pub fn new(api: Arc<dyn MegaverseApi>, retry: RetryPolicy) -> Self {
        Self { api, retry }
    }

    pub async fn submit(
        &self,
        command: &PlacementCommand,
        candidate_id: &CandidateId,
    ) -> PlacementOutcome {
        let request = command.request(candidate_id);
        let entity = command.entity;
        let (row, column) = (command.row, command.column);
        let mut attempts = 0u32;

        loop {
            attempts = next_attempt(attempts);

            let status = match self.api.place(command.kind(), &request).await {
                Ok(status) => status,
                Err(e) => {
                    error!("Failed to add {} at row: {}, column: {} - {}", entity, row, column, e);
                    return PlacementOutcome::Failed { reason: e.to_string() };
                }
            };

            if status.is_success() {
                info!("Successfully added {} at row: {}, column: {}", entity, row, column);
                return PlacementOutcome::Placed { attempts };
            }

            if status != StatusCode::TOO_MANY_REQUESTS {
                error!(
                    "Failed to add {} at row: {}, column: {} - Status Code: {}",
                    entity,
                    row,
                    column,
                    status.as_u16()
                );
                return PlacementOutcome::Rejected { status };
            }

            if !self.retry.allows_retry(attempts - 1) {
                error!(
                    "Rate limit exceeded for {} at row: {}, column: {} - giving up after {} tries",
                    entity,
                    row,
                    column,
                    attempts
                );
                return PlacementOutcome::RetryExhausted { attempts };
            }

            warn!(
                "Rate limit exceeded for {} at row: {}, column: {} - Retrying after {:?}",
                entity, row, column, self.retry.delay
            );
            pause(self.retry.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MegaverseError, MegaverseResult};
    use crate::megaverse::{Color, Entity, EntityKind, GoalMap, PlacementRequest};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::Mutex;

    /// Answers placements from a scripted status queue, then 200 forever
    struct ScriptedApi {
        statuses: Mutex<VecDeque<StatusCode>>,
        calls: Mutex<Vec<(EntityKind, Value)>>,
    }

    impl ScriptedApi {
        fn new(statuses: Vec<StatusCode>) -> Arc<Self> {
            Arc::new(Self {
                statuses: Mutex::new(VecDeque::from(statuses)),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl MegaverseApi for ScriptedApi {
        async fn goal_map(&self, _candidate_id: &CandidateId) -> MegaverseResult<GoalMap> {
            Err(MegaverseError::EmptyGoalMap)
        }

        async fn place(
            &self,
            kind: EntityKind,
            request: &PlacementRequest<'_>,
        ) -> MegaverseResult<StatusCode> {
            self.calls.lock().await.push((kind, serde_json::to_value(request).unwrap()));
            Ok(self.statuses.lock().await.pop_front().unwrap_or(StatusCode::OK))
        }
    }

    /// Collects formatted log lines written by the subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Route this thread's logs into a buffer until the guard drops
    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    fn soloon() -> PlacementCommand {
        PlacementCommand::new(6, 6, Entity::Soloon(Color::Red))
    }

    fn candidate() -> CandidateId {
        CandidateId::new("cand").unwrap()
    }

    #[tokio::test]
    async fn test_success_makes_one_call() {
        let api = ScriptedApi::new(vec![StatusCode::OK]);
        let submitter = Submitter::new(api.clone(), RetryPolicy::unbounded(Duration::ZERO));

        let outcome = submitter.submit(&soloon(), &candidate()).await;

        assert_eq!(outcome, PlacementOutcome::Placed { attempts: 1 });
        assert_eq!(api.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_then_success_resends_same_payload() {
        let api = ScriptedApi::new(vec![StatusCode::TOO_MANY_REQUESTS, StatusCode::OK]);
        let submitter = Submitter::new(api.clone(), RetryPolicy::unbounded(Duration::ZERO));

        let outcome = submitter.submit(&soloon(), &candidate()).await;

        assert_eq!(outcome, PlacementOutcome::Placed { attempts: 2 });
        let calls = api.calls.lock().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].0, EntityKind::Soloon);
    }

    #[tokio::test]
    async fn test_other_failure_is_not_retried() {
        let api = ScriptedApi::new(vec![StatusCode::INTERNAL_SERVER_ERROR]);
        let submitter = Submitter::new(api.clone(), RetryPolicy::unbounded(Duration::ZERO));

        let outcome = submitter.submit(&soloon(), &candidate()).await;

        assert_eq!(
            outcome,
            PlacementOutcome::Rejected { status: StatusCode::INTERNAL_SERVER_ERROR }
        );
        assert_eq!(api.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_many_rate_limits_without_ceiling() {
        let api = ScriptedApi::new(vec![StatusCode::TOO_MANY_REQUESTS; 50]);
        let submitter = Submitter::new(api.clone(), RetryPolicy::unbounded(Duration::ZERO));

        let outcome = submitter.submit(&soloon(), &candidate()).await;

        assert_eq!(outcome, PlacementOutcome::Placed { attempts: 51 });
    }

    #[tokio::test]
    async fn test_retry_ceiling() {
        let api = ScriptedApi::new(vec![StatusCode::TOO_MANY_REQUESTS; 10]);
        let submitter = Submitter::new(api.clone(), RetryPolicy::bounded(Duration::ZERO, 2));

        let outcome = submitter.submit(&soloon(), &candidate()).await;

        assert_eq!(outcome, PlacementOutcome::RetryExhausted { attempts: 3 });
        assert_eq!(api.calls.lock().await.len(), 3);
    }

    #[test]
    fn test_attempt_counter_saturates() {
        assert_eq!(next_attempt(0), 1);
        assert_eq!(next_attempt(u32::MAX), u32::MAX);
        assert!(RetryPolicy::unbounded(Duration::ZERO).allows_retry(next_attempt(u32::MAX) - 1));
    }

    #[tokio::test]
    async fn test_success_is_logged() {
        let (logs, _guard) = capture_logs();
        let api = ScriptedApi::new(vec![StatusCode::OK]);
        let submitter = Submitter::new(api, RetryPolicy::unbounded(Duration::ZERO));

        submitter.submit(&soloon(), &candidate()).await;

        let logs = logs.contents();
        assert!(logs.contains("INFO"));
        assert!(logs.contains("Successfully added red soloon at row: 6, column: 6"));
        assert!(!logs.contains("ERROR"));
    }

    #[tokio::test]
    async fn test_rejection_is_logged_with_status() {
        let (logs, _guard) = capture_logs();
        let api = ScriptedApi::new(vec![StatusCode::BAD_REQUEST]);
        let submitter = Submitter::new(api, RetryPolicy::unbounded(Duration::ZERO));

        submitter.submit(&soloon(), &candidate()).await;

        let logs = logs.contents();
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("Failed to add red soloon at row: 6, column: 6 - Status Code: 400"));
        assert!(!logs.contains("Successfully added"));
    }
}
