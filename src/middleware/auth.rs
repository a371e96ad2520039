use crate::common::error::AppError;
use crate::modules::auth::dto::TokenClaims;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use redis::AsyncCommands;

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        return Err(AppError::Unauthorized);
    };

    // Tokens revoked at logout live in a redis blocklist until expiry.
    let mut redis = state.redis.get_conn().await?;
    let is_blocked: bool = redis.exists(format!("blocked_token:{token}")).await?;
    if is_blocked {
        return Err(AppError::Unauthorized);
    }

    let claims = decode::<TokenClaims>(
        &token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?
    .claims;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
