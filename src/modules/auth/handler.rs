use super::dto::{AuthResponse, LoginRequest, RegisterRequest, TokenClaims, UserResponse};
use super::service::AuthService;
use crate::common::error::{AppError, AppResult};
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tower_cookies::{Cookie, Cookies};
use validator::Validate;

const REFRESH_COOKIE: &str = "refresh_token";
const REFRESH_COOKIE_PATH: &str = "/api/v1/auth";

fn refresh_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(REFRESH_COOKIE, value);
    cookie.set_http_only(true);
    cookie.set_path(REFRESH_COOKIE_PATH);
    cookie.set_max_age(Some(time::Duration::days(7)));
    cookie
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Bad Request")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<ApiSuccess<ApiResponse<UserResponse>>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = AuthService::register(state, payload).await?;
    Ok(ApiSuccess(
        ApiResponse::success(user, "User registered successfully"),
        StatusCode::CREATED,
    ))
}

/// Login user and get tokens
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> AppResult<ApiSuccess<ApiResponse<AuthResponse>>> {
    let (response, refresh_token) = AuthService::login(state, payload).await?;
    cookies.add(refresh_cookie(refresh_token));
    Ok(ApiSuccess(
        ApiResponse::success(response, "Login successful"),
        StatusCode::OK,
    ))
}

/// Logout user
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out successfully", body = ApiResponse<String>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(claims): Extension<TokenClaims>,
    headers: HeaderMap,
) -> AppResult<ApiSuccess<ApiResponse<String>>> {
    // Block the access token for its remaining lifetime.
    if let Some(token) = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        let ttl = claims
            .exp
            .saturating_sub(jsonwebtoken::get_current_timestamp() as usize);
        if ttl > 0 {
            let _ = AuthService::block_token(state.clone(), token.to_owned(), ttl as u64).await;
        }
    }

    let _ = AuthService::logout(state, claims.sub).await;

    let mut cookie = Cookie::new(REFRESH_COOKIE, "");
    cookie.set_path(REFRESH_COOKIE_PATH);
    cookies.remove(cookie);

    Ok(ApiSuccess(
        ApiResponse::success(claims.sub.to_string(), "Logged out successfully"),
        StatusCode::OK,
    ))
}

/// Refresh access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<ApiSuccess<ApiResponse<AuthResponse>>> {
    let refresh_token = cookies
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AppError::Unauthorized)?;

    // Token format is "user_id:uuid".
    let user_id = refresh_token
        .split(':')
        .next()
        .and_then(|part| uuid::Uuid::parse_str(part).ok())
        .ok_or(AppError::Unauthorized)?;

    let (response, new_refresh_token) =
        AuthService::refresh_access(state, refresh_token, user_id).await?;
    cookies.add(refresh_cookie(new_refresh_token));

    Ok(ApiSuccess(
        ApiResponse::success(response, "Token refreshed"),
        StatusCode::OK,
    ))
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> AppResult<ApiSuccess<ApiResponse<UserResponse>>> {
    let user = AuthService::me(state, claims.sub).await?;
    Ok(ApiSuccess(
        ApiResponse::success(user, "User retrieved"),
        StatusCode::OK,
    ))
}
