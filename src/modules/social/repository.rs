use super::model::SocialAccount;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, provider, access_token, refresh_token, expires_at, \
     created_at, updated_at";

pub struct SocialAccountRepository;

impl SocialAccountRepository {
    /// One row per (user, provider); reconnecting replaces the tokens.
    /// A reconnect without a new refresh token keeps the stored one,
    /// since Google only issues it on the first consent.
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        provider: &str,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_at: Option<OffsetDateTime>,
    ) -> Result<SocialAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO social_accounts (user_id, provider, access_token, refresh_token, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, provider) DO UPDATE \
             SET access_token = EXCLUDED.access_token, \
                 refresh_token = COALESCE(EXCLUDED.refresh_token, social_accounts.refresh_token), \
                 expires_at = EXCLUDED.expires_at, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SocialAccount>(&query)
            .bind(user_id)
            .bind(provider)
            .bind(access_token)
            .bind(refresh_token)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: Uuid,
        provider: &str,
    ) -> Result<Option<SocialAccount>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM social_accounts WHERE user_id = $1 AND provider = $2");
        sqlx::query_as::<_, SocialAccount>(&query)
            .bind(user_id)
            .bind(provider)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<SocialAccount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM social_accounts WHERE user_id = $1 ORDER BY provider"
        );
        sqlx::query_as::<_, SocialAccount>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update_access_token(
        pool: &PgPool,
        id: Uuid,
        access_token: &str,
        expires_at: Option<OffsetDateTime>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE social_accounts \
             SET access_token = $1, expires_at = $2, updated_at = NOW() \
             WHERE id = $3",
        )
        .bind(access_token)
        .bind(expires_at)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
