use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    RedisUrl,
    JwtSecret,
    S3Endpoint,
    S3Bucket,
    S3AccessKey,
    S3SecretKey,
    LlmBaseUrl,
    LlmApiKey,
    LlmModel,
    HeygenBaseUrl,
    HeygenApiKey,
    N8nWebhookUrl,
    GoogleClientId,
    GoogleClientSecret,
    TiktokClientKey,
    TiktokClientSecret,
    InstagramClientId,
    InstagramClientSecret,
    OauthRedirectBase,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::RedisUrl => "REDIS_URL",
            EnvKey::JwtSecret => "JWT_SECRET",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::S3Bucket => "S3_BUCKET",
            EnvKey::S3AccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::S3SecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::LlmBaseUrl => "LLM_BASE_URL",
            EnvKey::LlmApiKey => "LLM_API_KEY",
            EnvKey::LlmModel => "LLM_MODEL",
            EnvKey::HeygenBaseUrl => "HEYGEN_BASE_URL",
            EnvKey::HeygenApiKey => "HEYGEN_API_KEY",
            EnvKey::N8nWebhookUrl => "N8N_WEBHOOK_URL",
            EnvKey::GoogleClientId => "GOOGLE_CLIENT_ID",
            EnvKey::GoogleClientSecret => "GOOGLE_CLIENT_SECRET",
            EnvKey::TiktokClientKey => "TIKTOK_CLIENT_KEY",
            EnvKey::TiktokClientSecret => "TIKTOK_CLIENT_SECRET",
            EnvKey::InstagramClientId => "INSTAGRAM_CLIENT_ID",
            EnvKey::InstagramClientSecret => "INSTAGRAM_CLIENT_SECRET",
            EnvKey::OauthRedirectBase => "OAUTH_REDIRECT_BASE",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
