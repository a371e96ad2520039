use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

/// The callback route stays public: the provider redirects the browser
/// there without our bearer token, and the redis-held state nonce is
/// what ties the request back to a user.
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(handler::list_connections))
        .route("/{provider}/connect", get(handler::connect))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/{provider}/callback", get(handler::callback))
        .merge(protected)
}

pub fn publish_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/youtube", post(handler::publish_youtube))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
