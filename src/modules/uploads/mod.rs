use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::post;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/presign", post(handler::presign_upload))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
