use super::dto::{CreateProjectRequest, UpdateProjectRequest};
use super::model::Project;
use super::service::ProjectService;
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

/// List the caller's projects
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "Projects for the current user", body = ApiResponse<Vec<Project>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> AppResult<ApiSuccess<ApiResponse<Vec<Project>>>> {
    let projects = ProjectService::list(state, claims.sub).await?;
    Ok(ApiSuccess(
        ApiResponse::success(projects, "Projects retrieved"),
        StatusCode::OK,
    ))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ApiResponse<Project>),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<ApiSuccess<ApiResponse<Project>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let project = ProjectService::create(state, claims.sub, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(project, "Project created"),
        StatusCode::CREATED,
    ))
}

/// Fetch a project by id
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = uuid::Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = ApiResponse<Project>),
        (status = 404, description = "Project not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiSuccess<ApiResponse<Project>>> {
    let project = ProjectService::get(state, claims.sub, id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(project, "Project retrieved"),
        StatusCode::OK,
    ))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(("id" = uuid::Uuid, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<Project>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Project not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<ApiSuccess<ApiResponse<Project>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let project = ProjectService::update(state, claims.sub, id, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(project, "Project updated"),
        StatusCode::OK,
    ))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = uuid::Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project deleted", body = ApiResponse<String>),
        (status = 404, description = "Project not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiSuccess<ApiResponse<String>>> {
    ProjectService::delete(state, claims.sub, id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(id.to_string(), "Project deleted"),
        StatusCode::OK,
    ))
}
