use crate::docs::ApiDoc;
use crate::state::AppState;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower_http::cors::{Any, CorsLayer};

pub fn configure_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api_routes())
        .nest("/api/v1/auth", crate::modules::auth::router(state.clone()))
        .nest(
            "/api/v1/transcript",
            crate::modules::transcript::router(state.clone()),
        )
        .nest(
            "/api/v1/scripts",
            crate::modules::scripts::router(state.clone()),
        )
        .nest(
            "/api/v1/videos",
            crate::modules::videos::router(state.clone()),
        )
        .nest("/api/v1/news", crate::modules::news::router(state.clone()))
        .nest(
            "/api/v1/projects",
            crate::modules::projects::router(state.clone()),
        )
        .nest(
            "/api/v1/social",
            crate::modules::social::router(state.clone()),
        )
        .nest(
            "/api/v1/publish",
            crate::modules::social::publish_router(state.clone()),
        )
        .nest("/api/v1/uploads", crate::modules::uploads::router(state))
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new().route("/health", axum::routing::get(|| async { "ok" }))
}
