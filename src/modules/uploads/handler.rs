use super::dto::{PresignUploadRequest, PresignUploadResponse};
use super::service::UploadService;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::auth::dto::TokenClaims;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use validator::Validate;

/// Issue a presigned upload URL for blob storage
#[utoipa::path(
    post,
    path = "/api/v1/uploads/presign",
    request_body = PresignUploadRequest,
    responses(
        (status = 200, description = "Presigned PUT URL", body = ApiResponse<PresignUploadResponse>),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn presign_upload(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(payload): Json<PresignUploadRequest>,
) -> AppResult<ApiSuccess<ApiResponse<PresignUploadResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let presigned = UploadService::presign(state, claims.sub, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(presigned, "Upload URL issued"),
        StatusCode::OK,
    ))
}
