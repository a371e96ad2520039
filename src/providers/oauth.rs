use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

use super::ProviderError;
use crate::config::settings::OauthProviderConfig;

/// Social platforms a user can connect for publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Youtube,
    Tiktok,
    Instagram,
}

impl SocialProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Youtube => "youtube",
            SocialProvider::Tiktok => "tiktok",
            SocialProvider::Instagram => "instagram",
        }
    }

    fn authorize_endpoint(&self) -> &'static str {
        match self {
            SocialProvider::Youtube => "https://accounts.google.com/o/oauth2/v2/auth",
            SocialProvider::Tiktok => "https://www.tiktok.com/v2/auth/authorize/",
            SocialProvider::Instagram => "https://api.instagram.com/oauth/authorize",
        }
    }

    fn token_endpoint(&self) -> &'static str {
        match self {
            SocialProvider::Youtube => "https://oauth2.googleapis.com/token",
            SocialProvider::Tiktok => "https://open.tiktokapis.com/v2/oauth/token/",
            SocialProvider::Instagram => "https://api.instagram.com/oauth/access_token",
        }
    }

    fn scope(&self) -> &'static str {
        match self {
            SocialProvider::Youtube => "https://www.googleapis.com/auth/youtube.upload",
            SocialProvider::Tiktok => "video.upload,user.info.basic",
            SocialProvider::Instagram => "instagram_basic,instagram_content_publish",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youtube" => Ok(SocialProvider::Youtube),
            "tiktok" => Ok(SocialProvider::Tiktok),
            "instagram" => Ok(SocialProvider::Instagram),
            _ => Err(()),
        }
    }
}

/// Tokens handed back by a provider's code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// Build the provider's consent-screen URL with our CSRF `state` nonce.
pub fn authorize_url(
    provider: SocialProvider,
    config: &OauthProviderConfig,
    redirect_uri: &str,
    state: &str,
) -> Result<String, ProviderError> {
    if config.client_id.is_empty() {
        return Err(ProviderError::Credentials("oauth client id"));
    }

    let mut url = Url::parse(provider.authorize_endpoint()).map_err(|e| {
        ProviderError::Malformed {
            provider: provider.as_str(),
            detail: format!("bad authorize endpoint: {e}"),
        }
    })?;

    {
        let mut pairs = url.query_pairs_mut();
        // TikTok names the parameter client_key, everyone else client_id.
        match provider {
            SocialProvider::Tiktok => pairs.append_pair("client_key", &config.client_id),
            _ => pairs.append_pair("client_id", &config.client_id),
        };
        pairs
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", provider.scope())
            .append_pair("state", state);
        if provider == SocialProvider::Youtube {
            // Offline access so Google issues a refresh token.
            pairs
                .append_pair("access_type", "offline")
                .append_pair("prompt", "consent");
        }
    }

    Ok(url.to_string())
}

/// Exchange the callback `code` for tokens.
pub async fn exchange_code(
    client: &reqwest::Client,
    provider: SocialProvider,
    config: &OauthProviderConfig,
    redirect_uri: &str,
    code: &str,
) -> Result<TokenSet, ProviderError> {
    if config.client_id.is_empty() || config.client_secret.is_empty() {
        return Err(ProviderError::Credentials("oauth client credentials"));
    }

    let id_param = match provider {
        SocialProvider::Tiktok => "client_key",
        _ => "client_id",
    };

    let response = client
        .post(provider.token_endpoint())
        .form(&[
            (id_param, config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            provider: provider.as_str(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OauthProviderConfig {
        OauthProviderConfig {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
        }
    }

    #[test]
    fn youtube_url_carries_offline_access() {
        let url = authorize_url(
            SocialProvider::Youtube,
            &config(),
            "https://app.test/cb",
            "nonce",
        )
        .unwrap();
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("state=nonce"));
    }

    #[test]
    fn tiktok_uses_client_key_param() {
        let url = authorize_url(
            SocialProvider::Tiktok,
            &config(),
            "https://app.test/cb",
            "nonce",
        )
        .unwrap();
        assert!(url.contains("client_key=cid"));
        assert!(!url.contains("client_id=cid"));
    }

    #[test]
    fn provider_round_trips_through_str() {
        for provider in [
            SocialProvider::Youtube,
            SocialProvider::Tiktok,
            SocialProvider::Instagram,
        ] {
            assert_eq!(provider.as_str().parse(), Ok(provider));
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!("myspace".parse::<SocialProvider>().is_err());
    }
}
