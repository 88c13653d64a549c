//! Whatrobe API /v1: REST endpoints
//!
//! Inventory CRUD, outfit recommendation, favorites, health and Prometheus
//! metrics. Callers are scoped by the `X-User-ID` header.
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod state;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/clothing", post(handlers::add_item).get(handlers::list_items))
        .route("/v1/clothing/{id}", get(handlers::get_item).delete(handlers::delete_item))
        .route("/v1/outfits/recommend", post(handlers::recommend))
        .route(
            "/v1/outfits/favorites",
            get(handlers::list_favorites).post(handlers::save_favorite),
        )
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

/// Bind `config.addr` and serve until the process is stopped.
pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;

    tracing::info!("Whatrobe API listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
