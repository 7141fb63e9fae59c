//! HTTP handlers for the quoting engine.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::AppState;

use super::requests::{DistanceRequest, QuoteRequest};
use super::responses::{CatalogResponse, DistanceResponse, QuoteSummaryResponse};
use super::services;

/// Routes mounted under `/api/quoting`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog))
        .route("/distance", post(distance))
        .route("/quotes", post(quotes))
}

/// Modes, carrier rosters and service levels in effect
async fn catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from_tables(&state.tables, &state.currency))
}

/// Lane distance for an origin/destination pair
async fn distance(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DistanceRequest>, JsonRejection>,
) -> Result<Json<DistanceResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let distance_km = super::calculators::estimate_distance_km(
        &state.tables.distance,
        &request.origin,
        &request.destination,
    );
    Ok(Json(DistanceResponse { distance_km }))
}

/// Generate, filter and rank quotes for a shipment
async fn quotes(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteSummaryResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (shipment, controls) = request.into_parts();

    let summary = services::quote_shipment(&state.tables, &shipment, &controls);
    tracing::info!(
        mode = shipment.mode.as_str(),
        service_level = shipment.service_level.as_str(),
        quotes = summary.quotes.len(),
        "Quoted shipment"
    );

    Ok(Json(QuoteSummaryResponse::from_summary(summary, &state.currency)))
}
