use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExtractTranscriptRequest {
    #[validate(url(message = "A valid YouTube URL is required"))]
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptMetadata {
    pub video_id: String,
    /// Total spoken duration in seconds (end of the last segment).
    pub duration: f64,
    pub segment_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExtractTranscriptResponse {
    pub transcript: String,
    pub paragraphs: Vec<String>,
    pub metadata: TranscriptMetadata,
}
