use super::model::Script;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str =
    "id, user_id, project_id, title, content, style, video_url, created_at, updated_at";

pub struct ScriptRepository;

impl ScriptRepository {
    pub async fn insert(
        pool: &PgPool,
        user_id: Uuid,
        project_id: Option<Uuid>,
        title: &str,
        content: &str,
        style: Option<&str>,
    ) -> Result<Script, sqlx::Error> {
        let query = format!(
            "INSERT INTO scripts (user_id, project_id, title, content, style) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(title)
            .bind(content)
            .bind(style)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        title: &str,
        content: &str,
        style: Option<&str>,
    ) -> Result<Option<Script>, sqlx::Error> {
        let query = format!(
            "UPDATE scripts \
             SET title = $1, content = $2, style = COALESCE($3, style), updated_at = NOW() \
             WHERE id = $4 AND user_id = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(title)
            .bind(content)
            .bind(style)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_video_url(
        pool: &PgPool,
        id: Uuid,
        video_url: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE scripts SET video_url = $1, updated_at = NOW() WHERE id = $2")
            .bind(video_url)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Script>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scripts WHERE user_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete one script. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scripts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
