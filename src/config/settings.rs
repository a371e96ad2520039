use crate::config::env::{self, EnvKey};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct OauthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    pub llm_base_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub heygen_base_url: String,
    pub heygen_api_key: String,
    pub n8n_webhook_url: Option<String>,
    pub youtube_oauth: OauthProviderConfig,
    pub tiktok_oauth: OauthProviderConfig,
    pub instagram_oauth: OauthProviderConfig,
    /// Base URL the OAuth providers redirect back to, e.g. `https://app.example.com`.
    pub oauth_redirect_base: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            redis_url: env::get(EnvKey::RedisUrl)?,
            jwt_secret: env::get(EnvKey::JwtSecret)?,
            s3_endpoint: env::get(EnvKey::S3Endpoint)?,
            s3_bucket: env::get(EnvKey::S3Bucket)?,
            s3_access_key: env::get(EnvKey::S3AccessKey)?,
            s3_secret_key: env::get(EnvKey::S3SecretKey)?,
            llm_base_url: env::get_or(EnvKey::LlmBaseUrl, "https://api.openai.com/v1"),
            llm_api_key: env::get(EnvKey::LlmApiKey)?,
            llm_model: env::get_or(EnvKey::LlmModel, "gpt-4o-mini"),
            heygen_base_url: env::get_or(EnvKey::HeygenBaseUrl, "https://api.heygen.com"),
            heygen_api_key: env::get(EnvKey::HeygenApiKey)?,
            n8n_webhook_url: env::get(EnvKey::N8nWebhookUrl).ok(),
            youtube_oauth: OauthProviderConfig {
                client_id: env::get_or(EnvKey::GoogleClientId, ""),
                client_secret: env::get_or(EnvKey::GoogleClientSecret, ""),
            },
            tiktok_oauth: OauthProviderConfig {
                client_id: env::get_or(EnvKey::TiktokClientKey, ""),
                client_secret: env::get_or(EnvKey::TiktokClientSecret, ""),
            },
            instagram_oauth: OauthProviderConfig {
                client_id: env::get_or(EnvKey::InstagramClientId, ""),
                client_secret: env::get_or(EnvKey::InstagramClientSecret, ""),
            },
            oauth_redirect_base: env::get_or(EnvKey::OauthRedirectBase, "http://localhost:3000"),
        })
    }
}
