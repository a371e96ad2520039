use super::dto::{
    AvatarCatalog, GenerateHeygenRequest, GenerateN8nRequest, JobStartedResponse,
    StatusProbeResponse,
};
use super::model::VideoJob;
use super::service::VideoService;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::auth::dto::TokenClaims;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

/// Submit a script for avatar video rendering
#[utoipa::path(
    post,
    path = "/api/v1/videos/heygen",
    request_body = GenerateHeygenRequest,
    responses(
        (status = 202, description = "Rendering started", body = ApiResponse<JobStartedResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Script not found"),
        (status = 409, description = "A video is already generating for this script"),
        (status = 502, description = "Renderer failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn generate_heygen(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(payload): Json<GenerateHeygenRequest>,
) -> AppResult<ApiSuccess<ApiResponse<JobStartedResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let started = VideoService::generate_heygen(state, claims.sub, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(started, "Video generation started"),
        StatusCode::ACCEPTED,
    ))
}

/// One-shot renderer status probe for a HeyGen job
#[utoipa::path(
    get,
    path = "/api/v1/videos/heygen/{job_id}",
    params(("job_id" = String, Path, description = "Renderer-assigned job id")),
    responses(
        (status = 200, description = "Current renderer status", body = ApiResponse<StatusProbeResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Renderer failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn probe_heygen(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<ApiSuccess<ApiResponse<StatusProbeResponse>>> {
    let probe = VideoService::probe_heygen(state, &job_id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(probe, "Status retrieved"),
        StatusCode::OK,
    ))
}

/// Trigger the n8n rendering pipeline for a script
#[utoipa::path(
    post,
    path = "/api/v1/videos/n8n",
    request_body = GenerateN8nRequest,
    responses(
        (status = 202, description = "Pipeline triggered", body = ApiResponse<JobStartedResponse>),
        (status = 400, description = "Bad Request or pipeline not configured"),
        (status = 404, description = "Script not found"),
        (status = 409, description = "A video is already generating for this script"),
        (status = 502, description = "Pipeline failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn generate_n8n(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(payload): Json<GenerateN8nRequest>,
) -> AppResult<ApiSuccess<ApiResponse<JobStartedResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let started = VideoService::generate_n8n(state, claims.sub, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(started, "Video generation started"),
        StatusCode::ACCEPTED,
    ))
}

/// List the caller's video jobs, newest first
#[utoipa::path(
    get,
    path = "/api/v1/videos",
    responses(
        (status = 200, description = "Video history", body = ApiResponse<Vec<VideoJob>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn video_history(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> AppResult<ApiSuccess<ApiResponse<Vec<VideoJob>>>> {
    let jobs = VideoService::history(state, claims.sub).await?;
    Ok(ApiSuccess(
        ApiResponse::success(jobs, "Videos retrieved"),
        StatusCode::OK,
    ))
}

/// Fetch a single video job by record id
#[utoipa::path(
    get,
    path = "/api/v1/videos/{id}",
    params(("id" = uuid::Uuid, Path, description = "Video job record id")),
    responses(
        (status = 200, description = "Video job", body = ApiResponse<VideoJob>),
        (status = 404, description = "Video not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn get_video(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiSuccess<ApiResponse<VideoJob>>> {
    let job = VideoService::get(state, claims.sub, id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(job, "Video retrieved"),
        StatusCode::OK,
    ))
}

/// Available avatars and voices
#[utoipa::path(
    get,
    path = "/api/v1/videos/avatars",
    responses(
        (status = 200, description = "Avatar and voice catalog", body = ApiResponse<AvatarCatalog>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Renderer failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Videos"
)]
pub async fn avatar_catalog(
    State(state): State<AppState>,
) -> AppResult<ApiSuccess<ApiResponse<AvatarCatalog>>> {
    let catalog = VideoService::catalog(state).await?;
    Ok(ApiSuccess(
        ApiResponse::success(catalog, "Catalog retrieved"),
        StatusCode::OK,
    ))
}
