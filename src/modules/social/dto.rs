use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectResponse {
    /// Provider consent-screen URL the client must redirect the user to.
    pub authorize_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectedAccount {
    pub provider: String,
    pub connected: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PublishYoutubeRequest {
    /// Object key of the finished video in blob storage.
    #[validate(length(min = 1, message = "Storage key is required"))]
    pub s3_key: String,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PublishYoutubeResponse {
    /// YouTube's id for the published video.
    pub video_id: String,
}
