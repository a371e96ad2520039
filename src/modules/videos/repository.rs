use super::model::{JobState, VideoJob};
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, script_id, provider, job_id, state, result_url, \
     thumbnail_url, error_message, title, version, created_at, updated_at";

pub struct VideoJobRepository;

impl VideoJobRepository {
    pub async fn insert(
        pool: &PgPool,
        user_id: Uuid,
        script_id: Option<Uuid>,
        provider: &str,
        title: Option<&str>,
    ) -> Result<VideoJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_jobs (user_id, script_id, provider, title, state) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(user_id)
            .bind(script_id)
            .bind(provider)
            .bind(title)
            .bind(JobState::Submitted.as_str())
            .fetch_one(pool)
            .await
    }

    /// Record the renderer-assigned id and move the row to `processing`.
    pub async fn mark_processing(
        pool: &PgPool,
        id: Uuid,
        job_id: &str,
    ) -> Result<VideoJob, sqlx::Error> {
        let query = format!(
            "UPDATE video_jobs \
             SET job_id = $1, state = $2, version = version + 1, updated_at = NOW() \
             WHERE id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(job_id)
            .bind(JobState::Processing.as_str())
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Interim preview update. Does not bump the version: previews never
    /// decide a conflict.
    pub async fn set_thumbnail(
        pool: &PgPool,
        id: Uuid,
        thumbnail_url: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE video_jobs SET thumbnail_url = $1, updated_at = NOW() WHERE id = $2")
            .bind(thumbnail_url)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Guarded terminal write. Succeeds only when `expected_version`
    /// still matches and the row is not already terminal; returns false
    /// on a version conflict so the caller can re-read instead of
    /// overwriting a concurrent result.
    pub async fn persist_terminal(
        pool: &PgPool,
        id: Uuid,
        expected_version: i32,
        state: JobState,
        result_url: Option<&str>,
        thumbnail_url: Option<&str>,
        error_message: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        debug_assert!(state.is_terminal());
        let result = sqlx::query(
            "UPDATE video_jobs \
             SET state = $1, result_url = $2, \
                 thumbnail_url = COALESCE($3, thumbnail_url), \
                 error_message = $4, version = version + 1, updated_at = NOW() \
             WHERE id = $5 AND version = $6 \
               AND state NOT IN ('completed', 'failed', 'timed_out')",
        )
        .bind(state.as_str())
        .bind(result_url)
        .bind(thumbnail_url)
        .bind(error_message)
        .bind(id)
        .bind(expected_version)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<VideoJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM video_jobs WHERE id = $1");
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<VideoJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM video_jobs WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<VideoJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_jobs WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
