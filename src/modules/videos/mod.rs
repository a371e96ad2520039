use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

pub mod dto;
pub mod handler;
pub mod model;
pub mod poller;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::video_history))
        .route("/avatars", get(handler::avatar_catalog))
        .route("/heygen", post(handler::generate_heygen))
        .route("/heygen/{job_id}", get(handler::probe_heygen))
        .route("/n8n", post(handler::generate_n8n))
        .route("/{id}", get(handler::get_video))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
