use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::providers::heygen::{Avatar, Voice};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateHeygenRequest {
    pub script_id: Uuid,
    #[validate(length(min = 1, max = 128, message = "Avatar id is required"))]
    pub avatar_id: String,
    #[validate(length(min = 1, max = 128, message = "Voice id is required"))]
    pub voice_id: String,
    /// Output dimensions. Defaults to 1280x720.
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateN8nRequest {
    pub script_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobStartedResponse {
    /// Our durable record id.
    pub id: Uuid,
    /// The renderer-assigned job id.
    pub job_id: String,
    pub state: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusProbeResponse {
    pub status: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvatarCatalog {
    pub avatars: Vec<Avatar>,
    pub voices: Vec<Voice>,
}
