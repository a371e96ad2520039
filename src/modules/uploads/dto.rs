use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PresignUploadRequest {
    #[validate(length(min = 1, max = 255, message = "File name must be 1-255 characters"))]
    pub file_name: String,
    /// Defaults to video/mp4.
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PresignUploadResponse {
    /// Presigned PUT URL the client uploads the file to.
    pub upload_url: String,
    /// Object key under which the file will live.
    pub key: String,
}
