use super::dto::{
    DeleteScriptQuery, GenerateVariantsRequest, GenerateVariantsResponse,
    PersonalizeScriptRequest, PersonalizeScriptResponse, SaveScriptRequest,
};
use super::model::Script;
use super::service::ScriptService;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::auth::dto::TokenClaims;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Query, State},
    http::StatusCode,
};
use validator::Validate;

/// List the caller's scripts
#[utoipa::path(
    get,
    path = "/api/v1/scripts",
    responses(
        (status = 200, description = "Scripts for the current user", body = ApiResponse<Vec<Script>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Scripts"
)]
pub async fn list_scripts(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> AppResult<ApiSuccess<ApiResponse<Vec<Script>>>> {
    let scripts = ScriptService::list(state, claims.sub).await?;
    Ok(ApiSuccess(
        ApiResponse::success(scripts, "Scripts retrieved"),
        StatusCode::OK,
    ))
}

/// Save a script (upsert)
#[utoipa::path(
    post,
    path = "/api/v1/scripts",
    request_body = SaveScriptRequest,
    responses(
        (status = 200, description = "Script saved", body = ApiResponse<Script>),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Scripts"
)]
pub async fn save_script(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(payload): Json<SaveScriptRequest>,
) -> AppResult<ApiSuccess<ApiResponse<Script>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let script = ScriptService::save(state, claims.sub, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(script, "Script saved"),
        StatusCode::OK,
    ))
}

/// Delete a script by id (query parameter)
#[utoipa::path(
    delete,
    path = "/api/v1/scripts",
    params(("id" = uuid::Uuid, Query, description = "Script ID")),
    responses(
        (status = 200, description = "Script deleted", body = ApiResponse<String>),
        (status = 404, description = "Script not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Scripts"
)]
pub async fn delete_script(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(query): Query<DeleteScriptQuery>,
) -> AppResult<ApiSuccess<ApiResponse<String>>> {
    ScriptService::delete(state, claims.sub, query.id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(query.id.to_string(), "Script deleted"),
        StatusCode::OK,
    ))
}

/// Generate comedic rewrites of one paragraph
#[utoipa::path(
    post,
    path = "/api/v1/scripts/variants",
    request_body = GenerateVariantsRequest,
    responses(
        (status = 200, description = "Variants generated", body = ApiResponse<GenerateVariantsResponse>),
        (status = 400, description = "Bad Request"),
        (status = 502, description = "LLM failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Scripts"
)]
pub async fn generate_variants(
    State(state): State<AppState>,
    Json(payload): Json<GenerateVariantsRequest>,
) -> AppResult<ApiSuccess<ApiResponse<GenerateVariantsResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let variants = ScriptService::generate_variants(state, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(GenerateVariantsResponse { variants }, "Variants generated"),
        StatusCode::OK,
    ))
}

/// Rewrite a full script in a comedic style and persist it
#[utoipa::path(
    post,
    path = "/api/v1/scripts/personalize",
    request_body = PersonalizeScriptRequest,
    responses(
        (status = 200, description = "Script personalized", body = ApiResponse<PersonalizeScriptResponse>),
        (status = 400, description = "Bad Request"),
        (status = 502, description = "LLM failure")
    ),
    security(("bearer_auth" = [])),
    tag = "Scripts"
)]
pub async fn personalize_script(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(payload): Json<PersonalizeScriptRequest>,
) -> AppResult<ApiSuccess<ApiResponse<PersonalizeScriptResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = ScriptService::personalize(state, claims.sub, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(response, "Script personalized"),
        StatusCode::OK,
    ))
}
