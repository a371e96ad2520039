use super::dto::{
    AvatarCatalog, GenerateHeygenRequest, GenerateN8nRequest, JobStartedResponse,
    StatusProbeResponse,
};
use super::model::{JobState, VideoJob};
use super::poller::{ClaimGuard, PollConfig, PollOutcome, poll_until_terminal};
use super::repository::VideoJobRepository;
use crate::common::error::{AppError, AppResult};
use crate::modules::scripts::repository::ScriptRepository;
use crate::providers::{JobPhase, StatusSource};
use crate::state::AppState;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;

const CATALOG_CACHE_KEY: &str = "heygen_catalog";
const CATALOG_TTL: Duration = Duration::from_secs(60 * 60);

pub struct VideoService;

impl VideoService {
    pub async fn generate_heygen(
        state: AppState,
        user_id: Uuid,
        req: GenerateHeygenRequest,
    ) -> AppResult<JobStartedResponse> {
        if !is_safe_provider_id(&req.avatar_id) || !is_safe_provider_id(&req.voice_id) {
            return Err(AppError::BadRequest(
                "Avatar and voice ids must be catalog identifiers".to_string(),
            ));
        }

        let script = ScriptRepository::find_by_id(&state.db, req.script_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Script not found".to_string()))?;
        if script.content.trim().is_empty() {
            return Err(AppError::BadRequest("Script has no content".to_string()));
        }

        // The claim rides in this guard for the whole flow; any early
        // return drops it and frees the script for the next request.
        let Some(claim) = state.jobs.claim(script.id) else {
            return Err(AppError::Conflict(
                "A video is already generating for this script".to_string(),
            ));
        };

        let row = VideoJobRepository::insert(
            &state.db,
            user_id,
            Some(script.id),
            "heygen",
            Some(&script.title),
        )
        .await?;

        let submitted = state
            .heygen
            .generate_video(
                &script.content,
                &req.avatar_id,
                &req.voice_id,
                req.width.unwrap_or(DEFAULT_WIDTH),
                req.height.unwrap_or(DEFAULT_HEIGHT),
            )
            .await;

        let job_id = match submitted {
            Ok(job_id) => job_id,
            Err(e) => {
                let _ = VideoJobRepository::persist_terminal(
                    &state.db,
                    row.id,
                    row.version,
                    JobState::Failed,
                    None,
                    None,
                    Some(&e.to_string()),
                )
                .await;
                return Err(e.into());
            }
        };

        let row = match VideoJobRepository::mark_processing(&state.db, row.id, &job_id).await {
            Ok(row) => row,
            Err(e) => {
                // The renderer accepted the job but we lost the record of
                // its id; fail the row so nothing stays stuck in submitted.
                let _ = VideoJobRepository::persist_terminal(
                    &state.db,
                    row.id,
                    row.version,
                    JobState::Failed,
                    None,
                    None,
                    Some("failed to record renderer job id"),
                )
                .await;
                return Err(e.into());
            }
        };
        info!(job_id = %job_id, record = %row.id, "heygen video submitted");

        spawn_tracker(state.clone(), state.heygen.clone(), row.clone(), claim);

        Ok(JobStartedResponse {
            id: row.id,
            job_id,
            state: row.state,
        })
    }

    pub async fn generate_n8n(
        state: AppState,
        user_id: Uuid,
        req: GenerateN8nRequest,
    ) -> AppResult<JobStartedResponse> {
        let n8n = state
            .n8n
            .clone()
            .ok_or_else(|| AppError::BadRequest("n8n pipeline is not configured".to_string()))?;

        let script = ScriptRepository::find_by_id(&state.db, req.script_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Script not found".to_string()))?;

        let Some(claim) = state.jobs.claim(script.id) else {
            return Err(AppError::Conflict(
                "A video is already generating for this script".to_string(),
            ));
        };

        let row = VideoJobRepository::insert(
            &state.db,
            user_id,
            Some(script.id),
            "n8n",
            Some(&req.title),
        )
        .await?;

        let job_id = match n8n.trigger(&req.title, &req.description).await {
            Ok(job_id) => job_id,
            Err(e) => {
                let _ = VideoJobRepository::persist_terminal(
                    &state.db,
                    row.id,
                    row.version,
                    JobState::Failed,
                    None,
                    None,
                    Some(&e.to_string()),
                )
                .await;
                return Err(e.into());
            }
        };

        let row = match VideoJobRepository::mark_processing(&state.db, row.id, &job_id).await {
            Ok(row) => row,
            Err(e) => {
                let _ = VideoJobRepository::persist_terminal(
                    &state.db,
                    row.id,
                    row.version,
                    JobState::Failed,
                    None,
                    None,
                    Some("failed to record renderer job id"),
                )
                .await;
                return Err(e.into());
            }
        };
        info!(job_id = %job_id, record = %row.id, "n8n video triggered");

        spawn_tracker(state.clone(), n8n, row.clone(), claim);

        Ok(JobStartedResponse {
            id: row.id,
            job_id,
            state: row.state,
        })
    }

    /// One-shot status probe, pass-through to the renderer. The tracked
    /// poller is the only writer of job rows, so the probe never
    /// persists anything.
    pub async fn probe_heygen(state: AppState, job_id: &str) -> AppResult<StatusProbeResponse> {
        let report = state.heygen.video_status(job_id).await?;
        Ok(StatusProbeResponse {
            status: match report.phase {
                JobPhase::Pending => "pending",
                JobPhase::Processing => "processing",
                JobPhase::Completed => "completed",
                JobPhase::Failed => "failed",
            }
            .to_string(),
            video_url: report.result_url,
            thumbnail_url: report.thumbnail_url,
            error: report.error,
        })
    }

    pub async fn history(state: AppState, user_id: Uuid) -> AppResult<Vec<VideoJob>> {
        Ok(VideoJobRepository::list_for_user(&state.db, user_id).await?)
    }

    pub async fn get(state: AppState, user_id: Uuid, id: Uuid) -> AppResult<VideoJob> {
        VideoJobRepository::find_for_user(&state.db, id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    /// Avatar and voice catalog, fetched concurrently and cached.
    pub async fn catalog(state: AppState) -> AppResult<AvatarCatalog> {
        let heygen = state.heygen.clone();
        let catalog = state
            .catalog_cache
            .get_or_refresh(CATALOG_CACHE_KEY, CATALOG_TTL, || async move {
                let (avatars, voices) =
                    tokio::try_join!(heygen.list_avatars(), heygen.list_voices())
                        .map_err(anyhow::Error::from)?;
                Ok(AvatarCatalog { avatars, voices })
            })
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;
        Ok(catalog)
    }
}

/// Pre-validated catalog identifiers only: no free text reaches the renderer.
fn is_safe_provider_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Spawn the tracking task for a submitted job. The task owns the poll
/// loop, the terminal write-back, and the tracker claim for the script.
fn spawn_tracker<S>(state: AppState, source: S, row: VideoJob, claim: ClaimGuard)
where
    S: StatusSource + Clone + Send + Sync + 'static,
{
    // Dropping the guard here, or at the end of the task, frees the script.
    let Some(job_id) = row.job_id.clone() else {
        return;
    };

    tokio::spawn(async move {
        let script_id = claim.owner();
        let config = PollConfig::default();
        let db = state.db.clone();
        let record_id = row.id;

        let outcome = poll_until_terminal(&source, &job_id, &config, |report| {
            let db = db.clone();
            async move {
                if let Some(thumbnail) = report.thumbnail_url {
                    if let Err(e) =
                        VideoJobRepository::set_thumbnail(&db, record_id, &thumbnail).await
                    {
                        warn!(record = %record_id, error = %e, "failed to store preview thumbnail");
                    }
                }
            }
        })
        .await;

        reconcile(&state, record_id, script_id, outcome).await;
    });
}

/// Write the terminal outcome back to the owning records, guarded by the
/// version column. A conflict means another writer got there first; the
/// row is re-read and the write retried once against the fresh version.
async fn reconcile(state: &AppState, record_id: Uuid, script_id: Uuid, outcome: PollOutcome) {
    let (job_state, result_url, thumbnail_url, error_message) = match &outcome {
        PollOutcome::Completed {
            result_url,
            thumbnail_url,
        } => (
            JobState::Completed,
            Some(result_url.as_str()),
            thumbnail_url.as_deref(),
            None,
        ),
        PollOutcome::Failed { message } => {
            (JobState::Failed, None, None, Some(message.as_str()))
        }
        PollOutcome::TimedOut => (
            JobState::TimedOut,
            None,
            None,
            Some("timed out waiting for the renderer"),
        ),
    };

    for attempt in 0..2 {
        let current = match VideoJobRepository::find_by_id(&state.db, record_id).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                warn!(record = %record_id, "job row vanished before reconciliation");
                return;
            }
            Err(e) => {
                error!(record = %record_id, error = %e, "failed to read job row for reconciliation");
                return;
            }
        };

        if let Some(current_state) = JobState::parse(&current.state) {
            if !super::model::can_transition(current_state, job_state) {
                info!(record = %record_id, state = %current.state, "job already reconciled elsewhere");
                return;
            }
        }

        match VideoJobRepository::persist_terminal(
            &state.db,
            record_id,
            current.version,
            job_state,
            result_url,
            thumbnail_url,
            error_message,
        )
        .await
        {
            Ok(true) => {
                info!(record = %record_id, state = job_state.as_str(), "job reconciled");
                if job_state == JobState::Completed {
                    if let Some(url) = result_url {
                        if let Err(e) =
                            ScriptRepository::set_video_url(&state.db, script_id, Some(url)).await
                        {
                            error!(script = %script_id, error = %e, "failed to attach video url to script");
                        }
                    }
                }
                return;
            }
            Ok(false) => {
                warn!(record = %record_id, attempt, "version conflict during reconciliation");
            }
            Err(e) => {
                error!(record = %record_id, error = %e, "terminal write failed");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_ids_must_be_catalog_shaped() {
        assert!(is_safe_provider_id("Angela-inblackskirt-20220820"));
        assert!(is_safe_provider_id("en_us_male_2"));
        assert!(!is_safe_provider_id(""));
        assert!(!is_safe_provider_id("tell the avatar to say"));
        assert!(!is_safe_provider_id("id;DROP TABLE scripts"));
    }
}
