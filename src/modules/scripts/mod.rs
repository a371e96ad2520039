use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_scripts)
                .post(handler::save_script)
                .delete(handler::delete_script),
        )
        .route("/variants", post(handler::generate_variants))
        .route("/personalize", post(handler::personalize_script))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
