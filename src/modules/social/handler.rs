use super::dto::{
    CallbackQuery, ConnectResponse, ConnectedAccount, PublishYoutubeRequest,
    PublishYoutubeResponse,
};
use super::service::SocialService;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::auth::dto::TokenClaims;
use crate::providers::oauth::SocialProvider;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

fn parse_provider(raw: &str) -> AppResult<SocialProvider> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown provider: {raw}")))
}

/// Connected social accounts for the caller
#[utoipa::path(
    get,
    path = "/api/v1/social",
    responses(
        (status = 200, description = "Connected accounts", body = ApiResponse<Vec<ConnectedAccount>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Social"
)]
pub async fn list_connections(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> AppResult<ApiSuccess<ApiResponse<Vec<ConnectedAccount>>>> {
    let accounts = SocialService::connections(state, claims.sub).await?;
    Ok(ApiSuccess(
        ApiResponse::success(accounts, "Connections retrieved"),
        StatusCode::OK,
    ))
}

/// Start connecting a social account
#[utoipa::path(
    get,
    path = "/api/v1/social/{provider}/connect",
    params(("provider" = String, Path, description = "youtube | tiktok | instagram")),
    responses(
        (status = 200, description = "Consent-screen URL", body = ApiResponse<ConnectResponse>),
        (status = 400, description = "Unknown provider or missing credentials"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Social"
)]
pub async fn connect(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(provider): Path<String>,
) -> AppResult<ApiSuccess<ApiResponse<ConnectResponse>>> {
    let provider = parse_provider(&provider)?;
    let authorize_url = SocialService::connect(state, claims.sub, provider).await?;
    Ok(ApiSuccess(
        ApiResponse::success(ConnectResponse { authorize_url }, "Authorization started"),
        StatusCode::OK,
    ))
}

/// OAuth callback; the provider redirects here, not the client
#[utoipa::path(
    get,
    path = "/api/v1/social/{provider}/callback",
    params(
        ("provider" = String, Path, description = "youtube | tiktok | instagram"),
        ("code" = String, Query, description = "Authorization code"),
        ("state" = String, Query, description = "CSRF nonce issued by connect")
    ),
    responses(
        (status = 200, description = "Account connected", body = ApiResponse<ConnectedAccount>),
        (status = 400, description = "Unknown provider"),
        (status = 401, description = "Expired or replayed state nonce")
    ),
    tag = "Social"
)]
pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<ApiSuccess<ApiResponse<ConnectedAccount>>> {
    let provider = parse_provider(&provider)?;
    let account = SocialService::callback(state, provider, &query.code, &query.state).await?;
    Ok(ApiSuccess(
        ApiResponse::success(account, "Account connected"),
        StatusCode::OK,
    ))
}

/// Publish a finished video to the caller's YouTube channel
#[utoipa::path(
    post,
    path = "/api/v1/publish/youtube",
    request_body = PublishYoutubeRequest,
    responses(
        (status = 200, description = "Video published", body = ApiResponse<PublishYoutubeResponse>),
        (status = 400, description = "Bad Request or account not connected"),
        (status = 401, description = "Expired YouTube authorization (youtube_token_invalid)"),
        (status = 502, description = "Upload failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Social"
)]
pub async fn publish_youtube(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(payload): Json<PublishYoutubeRequest>,
) -> AppResult<ApiSuccess<ApiResponse<PublishYoutubeResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let published = SocialService::publish_youtube(state, claims.sub, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(published, "Video published"),
        StatusCode::OK,
    ))
}
