use super::dto::{ConnectedAccount, PublishYoutubeRequest, PublishYoutubeResponse};
use super::repository::SocialAccountRepository;
use crate::common::error::{AppError, AppResult};
use crate::config::settings::OauthProviderConfig;
use crate::providers::oauth::{self, SocialProvider};
use crate::providers::youtube;
use crate::state::AppState;
use redis::AsyncCommands;
use time::{Duration, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

/// How long an OAuth `state` nonce stays valid in redis.
const STATE_NONCE_TTL_SECS: u64 = 10 * 60;

pub struct SocialService;

impl SocialService {
    /// Start the OAuth flow: mint a CSRF nonce bound to the caller and
    /// hand back the provider's consent-screen URL.
    pub async fn connect(
        state: AppState,
        user_id: Uuid,
        provider: SocialProvider,
    ) -> AppResult<String> {
        let nonce = Uuid::new_v4().to_string();
        let mut conn = state.redis.get_conn().await?;
        conn.set_ex::<_, _, ()>(
            nonce_key(&nonce),
            user_id.to_string(),
            STATE_NONCE_TTL_SECS,
        )
        .await?;

        let url = oauth::authorize_url(
            provider,
            oauth_config(&state, provider),
            &redirect_uri(&state, provider),
            &nonce,
        )?;
        Ok(url)
    }

    /// Finish the OAuth flow. The nonce is consumed on first use; a
    /// replayed or expired callback gets a 401.
    pub async fn callback(
        state: AppState,
        provider: SocialProvider,
        code: &str,
        nonce: &str,
    ) -> AppResult<ConnectedAccount> {
        let mut conn = state.redis.get_conn().await?;
        let owner: Option<String> = conn.get_del(nonce_key(nonce)).await?;
        let user_id = owner
            .and_then(|raw| Uuid::parse_str(&raw).ok())
            .ok_or(AppError::Unauthorized)?;

        let tokens = oauth::exchange_code(
            &state.http,
            provider,
            oauth_config(&state, provider),
            &redirect_uri(&state, provider),
            code,
        )
        .await?;

        let expires_at = tokens
            .expires_in
            .map(|secs| OffsetDateTime::now_utc() + Duration::seconds(secs));
        SocialAccountRepository::upsert(
            &state.db,
            user_id,
            provider.as_str(),
            &tokens.access_token,
            tokens.refresh_token.as_deref(),
            expires_at,
        )
        .await?;
        info!(user = %user_id, provider = %provider, "social account connected");

        Ok(ConnectedAccount {
            provider: provider.as_str().to_string(),
            connected: true,
        })
    }

    pub async fn connections(state: AppState, user_id: Uuid) -> AppResult<Vec<ConnectedAccount>> {
        let accounts = SocialAccountRepository::list_for_user(&state.db, user_id).await?;
        Ok(accounts
            .into_iter()
            .map(|a| ConnectedAccount {
                provider: a.provider,
                connected: true,
            })
            .collect())
    }

    /// Publish a finished video from blob storage to the caller's
    /// YouTube channel.
    pub async fn publish_youtube(
        state: AppState,
        user_id: Uuid,
        req: PublishYoutubeRequest,
    ) -> AppResult<PublishYoutubeResponse> {
        let account =
            SocialAccountRepository::find(&state.db, user_id, SocialProvider::Youtube.as_str())
                .await?
                .ok_or_else(|| {
                    AppError::BadRequest("YouTube account is not connected".to_string())
                })?;
        let refresh_token = account
            .refresh_token
            .as_deref()
            .ok_or(AppError::YoutubeTokenInvalid)?;

        let config = oauth_config(&state, SocialProvider::Youtube);
        let refreshed = youtube::refresh_access_token(
            &state.http,
            &config.client_id,
            &config.client_secret,
            refresh_token,
        )
        .await?;

        let expires_at = refreshed
            .expires_in
            .map(|secs| OffsetDateTime::now_utc() + Duration::seconds(secs));
        SocialAccountRepository::update_access_token(
            &state.db,
            account.id,
            &refreshed.access_token,
            expires_at,
        )
        .await?;

        let data = state.storage.get_object(&req.s3_key).await?;
        let video_id = youtube::upload_video(
            &state.http,
            &refreshed.access_token,
            &req.title,
            &req.description,
            data,
        )
        .await?;
        info!(user = %user_id, video = %video_id, "video published to YouTube");

        Ok(PublishYoutubeResponse { video_id })
    }
}

fn nonce_key(nonce: &str) -> String {
    format!("oauth_state:{nonce}")
}

fn redirect_uri(state: &AppState, provider: SocialProvider) -> String {
    format!(
        "{}/api/v1/social/{}/callback",
        state.config.oauth_redirect_base, provider
    )
}

fn oauth_config(state: &AppState, provider: SocialProvider) -> &OauthProviderConfig {
    match provider {
        SocialProvider::Youtube => &state.config.youtube_oauth,
        SocialProvider::Tiktok => &state.config.tiktok_oauth,
        SocialProvider::Instagram => &state.config.instagram_oauth,
    }
}
