use super::dto::{ExtractTranscriptRequest, ExtractTranscriptResponse};
use super::service::TranscriptService;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

/// Extract the transcript of a YouTube video
#[utoipa::path(
    post,
    path = "/api/v1/transcript/extract",
    request_body = ExtractTranscriptRequest,
    responses(
        (status = 200, description = "Transcript extracted", body = ApiResponse<ExtractTranscriptResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "No transcript available")
    ),
    security(("bearer_auth" = [])),
    tag = "Transcript"
)]
pub async fn extract_transcript(
    State(state): State<AppState>,
    Json(payload): Json<ExtractTranscriptRequest>,
) -> AppResult<ApiSuccess<ApiResponse<ExtractTranscriptResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = TranscriptService::extract(state, &payload.url).await?;
    Ok(ApiSuccess(
        ApiResponse::success(response, "Transcript extracted"),
        StatusCode::OK,
    ))
}
