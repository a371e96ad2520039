use dotenvy::dotenv;
use tracing::info;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod middleware;
mod modules;
mod providers;
mod routes;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = config::settings::AppConfig::new()?;

    let db = infrastructure::db::pool::connect_to_db(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    info!("✅ Migrations applied");

    let redis = infrastructure::redis::client::RedisService::new(&config.redis_url).await?;
    let storage = infrastructure::storage::s3::StorageService::new(
        &config.s3_endpoint,
        &config.s3_bucket,
        &config.s3_access_key,
        &config.s3_secret_key,
    )
    .await;

    let port = config.server_port;
    let state = state::AppState::new(config, db, redis, storage);
    let app = app::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on http://0.0.0.0:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
