use crate::modules::auth::model::User;
use anyhow::Result;
use redis::AsyncCommands;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, username, password_hash, full_name, created_at, updated_at";

pub struct AuthRepository;

impl AuthRepository {
    pub async fn create_user(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, full_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(full_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_user_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_user_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn store_refresh_token(
        redis: &mut redis::aio::MultiplexedConnection,
        user_id: Uuid,
        refresh_token: &str,
        ttl_seconds: u64,
    ) -> Result<()> {
        let key = format!("refresh_token:{user_id}");
        redis.set_ex::<_, _, ()>(key, refresh_token, ttl_seconds).await?;
        Ok(())
    }

    pub async fn get_refresh_token(
        redis: &mut redis::aio::MultiplexedConnection,
        user_id: Uuid,
    ) -> Result<Option<String>> {
        let key = format!("refresh_token:{user_id}");
        let token: Option<String> = redis.get(key).await?;
        Ok(token)
    }

    pub async fn delete_refresh_token(
        redis: &mut redis::aio::MultiplexedConnection,
        user_id: Uuid,
    ) -> Result<()> {
        let key = format!("refresh_token:{user_id}");
        redis.del::<_, ()>(key).await?;
        Ok(())
    }
}
