use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

pub mod dto;
pub mod handler;
pub mod selection;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::latest_news))
        .route("/refresh", post(handler::refresh_news))
        .route("/selection", post(handler::toggle_news_selection))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
