//! Freight quote estimation service.

pub mod config;
pub mod error;
pub mod quoting;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::quoting::RateTables;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub tables: Arc<RateTables>,
    pub currency: Arc<str>,
}

impl AppState {
    pub fn new(tables: RateTables, currency: &str) -> Self {
        Self {
            tables: Arc::new(tables),
            currency: Arc::from(currency),
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/quoting", quoting::router())
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Load rate tables, bind and serve until the process stops
pub async fn serve(config: Config) -> error::Result<()> {
    let tables = config.load_rate_tables()?;
    let state = AppState::new(tables, &config.currency);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("Listening on {} (currency {})", addr, config.currency);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
