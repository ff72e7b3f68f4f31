use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod handlers;
mod models;

use config::Config;
use handlers::{get_rooms, post_rooms, AppState};

fn app(config: &Config) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/rooms", get(get_rooms).post(post_rooms))
        .with_state(AppState::new(config.random_occupancy))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .init();

    let app = app(&config)?;

    info!(listen_addr = %config.listen_addr, "hotel reservation API starting");
    info!("  GET  /api/rooms - list every room");
    info!("  POST /api/rooms - book, reset or randomize occupancy");

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
