use serde::Deserialize;
use serde_json::json;

use super::{JobPhase, ProviderError, StatusReport, StatusSource};

const PROVIDER: &str = "heygen";

/// HTTP client for the HeyGen avatar-video API.
#[derive(Clone)]
pub struct HeygenClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    data: Option<GenerateData>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateData {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    data: Option<StatusData>,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    status: String,
    video_url: Option<String>,
    thumbnail_url: Option<String>,
    error: Option<StatusError>,
}

#[derive(Debug, Deserialize)]
struct StatusError {
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize, utoipa::ToSchema)]
pub struct Avatar {
    pub avatar_id: String,
    pub avatar_name: Option<String>,
    pub preview_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize, utoipa::ToSchema)]
pub struct Voice {
    pub voice_id: String,
    pub name: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvatarListResponse {
    data: AvatarListData,
}

#[derive(Debug, Deserialize)]
struct AvatarListData {
    avatars: Vec<Avatar>,
}

#[derive(Debug, Deserialize)]
struct VoiceListResponse {
    data: VoiceListData,
}

#[derive(Debug, Deserialize)]
struct VoiceListData {
    voices: Vec<Voice>,
}

impl HeygenClient {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Submit an avatar video for rendering. Returns the opaque video id
    /// HeyGen assigns to the job.
    pub async fn generate_video(
        &self,
        input_text: &str,
        avatar_id: &str,
        voice_id: &str,
        width: u32,
        height: u32,
    ) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Credentials("HEYGEN_API_KEY"));
        }

        let body = json!({
            "video_inputs": [{
                "character": {
                    "type": "avatar",
                    "avatar_id": avatar_id,
                    "avatar_style": "normal",
                },
                "voice": {
                    "type": "text",
                    "input_text": input_text,
                    "voice_id": voice_id,
                },
            }],
            "dimension": { "width": width, "height": height },
        });

        let response = self
            .client
            .post(format!("{}/v2/video/generate", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .json(&body)
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

        let parsed: GenerateResponse = response.json().await?;
        if let Some(error) = parsed.error {
            return Err(ProviderError::Malformed {
                provider: PROVIDER,
                detail: format!("submission rejected: {error}"),
            });
        }

        parsed
            .data
            .map(|d| d.video_id)
            .ok_or(ProviderError::Malformed {
                provider: PROVIDER,
                detail: "no video_id in response".to_string(),
            })
    }

    pub async fn video_status(&self, video_id: &str) -> Result<StatusReport, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v1/video_status.get", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&[("video_id", video_id)])
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

        let parsed: StatusResponse = response.json().await?;
        let data = parsed.data.ok_or(ProviderError::Malformed {
            provider: PROVIDER,
            detail: "no data in status response".to_string(),
        })?;

        let phase = match data.status.as_str() {
            "completed" => JobPhase::Completed,
            "failed" | "error" => JobPhase::Failed,
            "processing" => JobPhase::Processing,
            // "pending" / "waiting" and anything new HeyGen invents
            _ => JobPhase::Pending,
        };

        Ok(StatusReport {
            phase,
            result_url: data.video_url,
            thumbnail_url: data.thumbnail_url,
            error: data.error.and_then(|e| e.message),
        })
    }

    pub async fn list_avatars(&self) -> Result<Vec<Avatar>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v2/avatars", self.base_url))
            .header("X-Api-Key", &self.api_key)
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

        let parsed: AvatarListResponse = response.json().await?;
        Ok(parsed.data.avatars)
    }

    pub async fn list_voices(&self) -> Result<Vec<Voice>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v2/voices", self.base_url))
            .header("X-Api-Key", &self.api_key)
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

        let parsed: VoiceListResponse = response.json().await?;
        Ok(parsed.data.voices)
    }
}

impl StatusSource for HeygenClient {
    async fn fetch_status(&self, job_id: &str) -> Result<StatusReport, ProviderError> {
        self.video_status(job_id).await
    }
}
