use super::model::Project;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str =
    "id, user_id, name, description, source_url, transcript, status, created_at, updated_at";

pub struct ProjectRepository;

impl ProjectRepository {
    pub async fn insert(
        pool: &PgPool,
        user_id: Uuid,
        name: &str,
        description: Option<&str>,
        source_url: Option<&str>,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, name, description, source_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(name)
            .bind(description)
            .bind(source_url)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        name: &str,
        description: Option<&str>,
        source_url: Option<&str>,
        transcript: Option<&str>,
        status: Option<&str>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects \
             SET name = $1, description = $2, source_url = $3, \
                 transcript = COALESCE($4, transcript), \
                 status = COALESCE($5, status), \
                 updated_at = NOW() \
             WHERE id = $6 AND user_id = $7 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .bind(description)
            .bind(source_url)
            .bind(transcript)
            .bind(status)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
