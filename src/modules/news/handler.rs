use super::dto::{NewsDigest, SelectionResponse, ToggleSelectionRequest};
use super::selection::toggle_selection;
use super::service::NewsService;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

/// Trending headlines for parody material, cached server-side
#[utoipa::path(
    get,
    path = "/api/v1/news",
    responses(
        (status = 200, description = "Current news digest", body = ApiResponse<NewsDigest>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Curation failure")
    ),
    security(("bearer_auth" = [])),
    tag = "News"
)]
pub async fn latest_news(
    State(state): State<AppState>,
) -> AppResult<ApiSuccess<ApiResponse<NewsDigest>>> {
    let digest = NewsService::latest(state).await?;
    Ok(ApiSuccess(
        ApiResponse::success(digest, "News retrieved"),
        StatusCode::OK,
    ))
}

/// Force a fresh news digest, bypassing the cache
#[utoipa::path(
    post,
    path = "/api/v1/news/refresh",
    responses(
        (status = 200, description = "Refreshed news digest", body = ApiResponse<NewsDigest>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Curation failure")
    ),
    security(("bearer_auth" = [])),
    tag = "News"
)]
pub async fn refresh_news(
    State(state): State<AppState>,
) -> AppResult<ApiSuccess<ApiResponse<NewsDigest>>> {
    let digest = NewsService::refresh(state).await?;
    Ok(ApiSuccess(
        ApiResponse::success(digest, "News refreshed"),
        StatusCode::OK,
    ))
}

/// Toggle a headline in the checked set used as rewrite context
#[utoipa::path(
    post,
    path = "/api/v1/news/selection",
    request_body = ToggleSelectionRequest,
    responses(
        (status = 200, description = "Updated selection", body = ApiResponse<SelectionResponse>),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "News"
)]
pub async fn toggle_news_selection(
    Json(payload): Json<ToggleSelectionRequest>,
) -> AppResult<ApiSuccess<ApiResponse<SelectionResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let selected = toggle_selection(payload.selected, &payload.headline);
    Ok(ApiSuccess(
        ApiResponse::success(SelectionResponse { selected }, "Selection updated"),
        StatusCode::OK,
    ))
}
