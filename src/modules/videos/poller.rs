use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::providers::{JobPhase, StatusReport, StatusSource};

/// Tuning knobs for the status poll loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    /// Overall ceiling on status checks. 120 polls at 5 s is the
    /// 10-minute cap on how long a job may stay "generating".
    pub max_polls: u32,
    /// Consecutive transient fetch failures tolerated before giving up.
    pub max_transient_errors: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_polls: 120,
            max_transient_errors: 5,
        }
    }
}

/// Terminal result of a poll loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Completed {
        result_url: String,
        thumbnail_url: Option<String>,
    },
    Failed {
        message: String,
    },
    TimedOut,
}

/// Poll `source` for `job_id` until a terminal state or a ceiling is hit.
///
/// Transient fetch errors do not stop the loop but are bounded; interim
/// reports (processing, with or without a preview thumbnail) are handed
/// to `on_progress`. Once this function returns, no further polls are
/// issued for the job.
pub async fn poll_until_terminal<S, F, Fut>(
    source: &S,
    job_id: &str,
    config: &PollConfig,
    mut on_progress: F,
) -> PollOutcome
where
    S: StatusSource,
    F: FnMut(StatusReport) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut polls = 0u32;
    let mut consecutive_errors = 0u32;
    let mut last_thumbnail: Option<String> = None;

    loop {
        if polls >= config.max_polls {
            warn!(job_id, polls, "job exceeded poll ceiling");
            return PollOutcome::TimedOut;
        }

        tokio::time::sleep(config.interval).await;
        polls += 1;

        let report = match source.fetch_status(job_id).await {
            Ok(report) => {
                consecutive_errors = 0;
                report
            }
            Err(e) => {
                consecutive_errors += 1;
                warn!(job_id, consecutive_errors, error = %e, "status poll failed");
                if consecutive_errors >= config.max_transient_errors {
                    return PollOutcome::TimedOut;
                }
                continue;
            }
        };

        match report.phase {
            JobPhase::Completed => {
                let thumbnail_url = report.thumbnail_url.clone().or(last_thumbnail);
                return match report.result_url.clone() {
                    Some(result_url) => PollOutcome::Completed {
                        result_url,
                        thumbnail_url,
                    },
                    // Completed without a URL is a provider contract break.
                    None => PollOutcome::Failed {
                        message: "renderer reported completion without a video URL".to_string(),
                    },
                };
            }
            JobPhase::Failed => {
                let message = report
                    .error
                    .clone()
                    .unwrap_or_else(|| "renderer reported failure".to_string());
                return PollOutcome::Failed { message };
            }
            JobPhase::Pending | JobPhase::Processing => {
                if report.thumbnail_url.is_some() {
                    last_thumbnail = report.thumbnail_url.clone();
                }
                on_progress(report).await;
            }
        }
    }
}

/// In-flight job registry keyed by owning record id.
///
/// A second generation request for the same script is refused while one
/// is still being tracked, so concurrent triggers cannot start
/// overlapping pollers.
#[derive(Clone, Default)]
pub struct JobTracker {
    inflight: Arc<Mutex<HashSet<Uuid>>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the owner record. Returns `None` when a job is already
    /// active. The claim is held by the returned guard and released when
    /// it drops, so early returns and panics cannot strand an owner in
    /// the registry.
    pub fn claim(&self, owner: Uuid) -> Option<ClaimGuard> {
        if self.inflight.lock().unwrap().insert(owner) {
            Some(ClaimGuard {
                inflight: self.inflight.clone(),
                owner,
            })
        } else {
            None
        }
    }
}

/// Live claim on an owner record. Dropping it frees the owner for the
/// next generation request.
pub struct ClaimGuard {
    inflight: Arc<Mutex<HashSet<Uuid>>>,
    owner: Uuid,
}

impl ClaimGuard {
    pub fn owner(&self) -> Uuid {
        self.owner
    }
}

impl Drop for ClaimGuard {
    fn drop(&mut self) {
        self.inflight.lock().unwrap().remove(&self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Replays a fixed list of canned answers, then panics: a panic here
    /// means the loop kept polling after it should have stopped.
    struct ScriptedSource {
        responses: Mutex<Vec<Result<StatusReport, ProviderError>>>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<StatusReport, ProviderError>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: AtomicU32::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StatusSource for ScriptedSource {
        async fn fetch_status(&self, _job_id: &str) -> Result<StatusReport, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .expect("poller queried status after reaching a terminal state")
        }
    }

    fn processing(thumbnail: Option<&str>) -> Result<StatusReport, ProviderError> {
        Ok(StatusReport {
            phase: JobPhase::Processing,
            result_url: None,
            thumbnail_url: thumbnail.map(str::to_string),
            error: None,
        })
    }

    fn completed(url: &str) -> Result<StatusReport, ProviderError> {
        Ok(StatusReport {
            phase: JobPhase::Completed,
            result_url: Some(url.to_string()),
            thumbnail_url: None,
            error: None,
        })
    }

    fn failed(message: &str) -> Result<StatusReport, ProviderError> {
        Ok(StatusReport {
            phase: JobPhase::Failed,
            result_url: None,
            thumbnail_url: None,
            error: Some(message.to_string()),
        })
    }

    fn transient() -> Result<StatusReport, ProviderError> {
        Err(ProviderError::Malformed {
            provider: "test",
            detail: "flaky".to_string(),
        })
    }

    fn fast_config() -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(1),
            max_polls: 10,
            max_transient_errors: 3,
        }
    }

    #[tokio::test]
    async fn stops_polling_after_completion() {
        let source = ScriptedSource::new(vec![
            processing(None),
            processing(None),
            completed("https://cdn.test/v.mp4"),
        ]);

        let outcome =
            poll_until_terminal(&source, "job-1", &fast_config(), |_| async {}).await;

        assert_eq!(
            outcome,
            PollOutcome::Completed {
                result_url: "https://cdn.test/v.mp4".to_string(),
                thumbnail_url: None,
            }
        );
        // Exactly three polls: two interim, one terminal, none after.
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn failure_report_captures_message() {
        let source = ScriptedSource::new(vec![processing(None), failed("avatar not found")]);

        let outcome =
            poll_until_terminal(&source, "job-2", &fast_config(), |_| async {}).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                message: "avatar not found".to_string(),
            }
        );
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn transient_errors_are_tolerated_then_bounded() {
        // Two flaky polls recover; the job still completes.
        let source = ScriptedSource::new(vec![
            transient(),
            transient(),
            completed("https://cdn.test/v.mp4"),
        ]);
        let outcome =
            poll_until_terminal(&source, "job-3", &fast_config(), |_| async {}).await;
        assert!(matches!(outcome, PollOutcome::Completed { .. }));

        // All-flaky gives up after the consecutive-error ceiling.
        let source = ScriptedSource::new(vec![transient(), transient(), transient(), transient()]);
        let outcome =
            poll_until_terminal(&source, "job-4", &fast_config(), |_| async {}).await;
        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn poll_ceiling_times_out() {
        let config = PollConfig {
            interval: Duration::from_millis(1),
            max_polls: 4,
            max_transient_errors: 3,
        };
        let source = ScriptedSource::new(vec![
            processing(None),
            processing(None),
            processing(None),
            processing(None),
            // Never reached.
            completed("https://cdn.test/v.mp4"),
        ]);

        let outcome = poll_until_terminal(&source, "job-5", &config, |_| async {}).await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(source.call_count(), 4);
    }

    #[tokio::test]
    async fn interim_thumbnail_is_carried_to_completion() {
        let source = ScriptedSource::new(vec![
            processing(Some("https://cdn.test/thumb.jpg")),
            completed("https://cdn.test/v.mp4"),
        ]);

        let progress_thumbs = Arc::new(Mutex::new(Vec::new()));
        let sink = progress_thumbs.clone();
        let outcome = poll_until_terminal(&source, "job-6", &fast_config(), move |report| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(report.thumbnail_url);
            }
        })
        .await;

        assert_eq!(
            outcome,
            PollOutcome::Completed {
                result_url: "https://cdn.test/v.mp4".to_string(),
                thumbnail_url: Some("https://cdn.test/thumb.jpg".to_string()),
            }
        );
        assert_eq!(
            progress_thumbs.lock().unwrap().as_slice(),
            &[Some("https://cdn.test/thumb.jpg".to_string())]
        );
    }

    #[test]
    fn tracker_refuses_duplicate_claims() {
        let tracker = JobTracker::new();
        let owner = Uuid::new_v4();

        let guard = tracker.claim(owner).unwrap();
        assert!(tracker.claim(owner).is_none());

        drop(guard);
        assert!(tracker.claim(owner).is_some());
    }

    #[test]
    fn claim_survives_until_the_guard_drops() {
        // A database failure between submit and tracking exits the
        // generation flow early; the owner must come free again rather
        // than 409 forever.
        let tracker = JobTracker::new();
        let owner = Uuid::new_v4();

        fn failing_flow(tracker: &JobTracker, owner: Uuid) -> Result<(), &'static str> {
            let _claim = tracker.claim(owner).ok_or("already generating")?;
            Err("db write failed")
        }

        assert!(failing_flow(&tracker, owner).is_err());
        assert!(
            tracker.claim(owner).is_some(),
            "owner still blocked after the flow bailed out"
        );
    }

    #[tokio::test]
    async fn claim_held_across_a_spawned_task() {
        let tracker = JobTracker::new();
        let owner = Uuid::new_v4();

        let guard = tracker.claim(owner).unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _claim = guard;
            let _ = rx.await;
        });

        assert!(tracker.claim(owner).is_none());
        tx.send(()).unwrap();
        handle.await.unwrap();
        assert!(tracker.claim(owner).is_some());
    }

    #[test]
    fn tracker_claims_are_per_owner() {
        let tracker = JobTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let _guard_a = tracker.claim(a).unwrap();
        assert!(tracker.claim(b).is_some());
    }
}
