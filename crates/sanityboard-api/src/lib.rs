//! HTTP surface for the SanityBoard leaderboard.
//!
//! Thin axum layer over [`sanityboard_lib`]: every request re-reads the run
//! directories, so responses always reflect on-disk state.

pub mod config;
pub mod handlers;
pub mod types;

use axum::{routing::get, Router};
use config::Config;
use sanityboard_lib::RunStore;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// API state shared by all handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<RunStore>,
    pub config: Arc<Config>,
}

impl ApiState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(RunStore::new(&config.data_dir)),
            config: Arc::new(config),
        }
    }
}

/// Create API router with all endpoints
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .route("/api/v1/runs", get(handlers::list_runs))
        .route("/api/v1/runs/{id}", get(handlers::get_run))
        .route("/api/v1/runs/{id}/download", get(handlers::download_run))
        .route("/sitemap.xml", get(handlers::sitemap))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
