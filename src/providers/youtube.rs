use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::ProviderError;

const PROVIDER: &str = "youtube";

const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

/// Overall ceiling on the upload call, matching the route-level
/// abort-after-120-seconds policy.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// One caption segment as served by the timedtext endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    /// Start offset in seconds.
    pub offset: f64,
    /// Duration in seconds.
    pub duration: f64,
}

/// Extract the 11-character video id from any of the usual YouTube URL shapes.
pub fn parse_video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").to_string();

    if host == "youtu.be" {
        return url
            .path_segments()
            .and_then(|mut segments| segments.next().map(str::to_string))
            .filter(|id| !id.is_empty());
    }

    if host == "youtube.com" || host == "m.youtube.com" {
        if let Some(id) = url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.to_string())
        {
            return Some(id);
        }
        // /shorts/<id> and /embed/<id>
        let segments: Vec<_> = url.path_segments()?.collect();
        if segments.len() >= 2 && (segments[0] == "shorts" || segments[0] == "embed") {
            return Some(segments[1].to_string()).filter(|id| !id.is_empty());
        }
    }

    None
}

#[derive(Debug, Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs")]
    start_ms: Option<i64>,
    #[serde(rename = "dDurationMs")]
    duration_ms: Option<i64>,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    utf8: Option<String>,
}

/// Fetch English captions for a video via the timedtext endpoint.
pub async fn fetch_transcript(
    client: &reqwest::Client,
    video_id: &str,
) -> Result<Vec<TranscriptSegment>, ProviderError> {
    let response = client
        .get(TIMEDTEXT_URL)
        .query(&[("v", video_id), ("lang", "en"), ("fmt", "json3")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            provider: PROVIDER,
            status: status.as_u16(),
            body,
        });
    }

    // An empty body means no caption track exists for the video.
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Err(ProviderError::Malformed {
            provider: PROVIDER,
            detail: "no caption track".to_string(),
        });
    }

    let parsed: TimedTextResponse =
        serde_json::from_str(&text).map_err(|e| ProviderError::Malformed {
            provider: PROVIDER,
            detail: format!("timedtext parse failed: {e}"),
        })?;

    let segments = parsed
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event
                .segs
                .iter()
                .filter_map(|s| s.utf8.as_deref())
                .collect::<Vec<_>>()
                .join("");
            let text = text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                offset: event.start_ms.unwrap_or(0) as f64 / 1000.0,
                duration: event.duration_ms.unwrap_or(0) as f64 / 1000.0,
            })
        })
        .collect();

    Ok(segments)
}

#[derive(Debug, Deserialize)]
pub struct RefreshedToken {
    pub access_token: String,
    pub expires_in: Option<i64>,
}

/// Exchange a stored refresh token for a fresh access token.
///
/// Google answers `invalid_grant` when the user revoked access or the
/// token aged out; that maps to [`ProviderError::AuthExpired`] so the
/// route can emit the `youtube_token_invalid` sentinel instead of a
/// generic 401.
pub async fn refresh_access_token(
    client: &reqwest::Client,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<RefreshedToken, ProviderError> {
    let response = client
        .post(TOKEN_URL)
        .form(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if body.contains("invalid_grant") {
            return Err(ProviderError::AuthExpired { provider: PROVIDER });
        }
        return Err(ProviderError::Api {
            provider: PROVIDER,
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

/// Upload a finished video via the resumable upload protocol: one
/// initiation request carrying the metadata, then a single PUT with the
/// bytes to the session URL Google hands back.
pub async fn upload_video(
    client: &reqwest::Client,
    access_token: &str,
    title: &str,
    description: &str,
    data: bytes::Bytes,
) -> Result<String, ProviderError> {
    let metadata = json!({
        "snippet": { "title": title, "description": description },
        "status": { "privacyStatus": "private" },
    });

    let init = client
        .post(UPLOAD_URL)
        .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
        .bearer_auth(access_token)
        .json(&metadata)
        .send()
        .await?;

    let status = init.status();
    if status.as_u16() == 401 {
        return Err(ProviderError::AuthExpired { provider: PROVIDER });
    }
    if !status.is_success() {
        let body = init.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            provider: PROVIDER,
            status: status.as_u16(),
            body,
        });
    }

    let session_url = init
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or(ProviderError::Malformed {
            provider: PROVIDER,
            detail: "no resumable session url".to_string(),
        })?;

    let response = client
        .put(&session_url)
        .bearer_auth(access_token)
        .header("Content-Type", "video/mp4")
        .body(data)
        .timeout(UPLOAD_TIMEOUT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            provider: PROVIDER,
            status: status.as_u16(),
            body,
        });
    }

    #[derive(Deserialize)]
    struct Uploaded {
        id: String,
    }

    let uploaded: Uploaded = response.json().await?;
    Ok(uploaded.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_urls() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn parses_short_links() {
        assert_eq!(
            parse_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn parses_shorts_and_embed() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/shorts/abc123xyz00"),
            Some("abc123xyz00".to_string())
        );
        assert_eq!(
            parse_video_id("https://youtube.com/embed/abc123xyz00"),
            Some("abc123xyz00".to_string())
        );
    }

    #[test]
    fn rejects_non_youtube_urls() {
        assert_eq!(parse_video_id("https://vimeo.com/12345"), None);
        assert_eq!(parse_video_id("not a url"), None);
    }
}
