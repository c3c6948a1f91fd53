use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{info, warn};

use informa_common::{GeocodeRequest, InformaError};
use informa_wanted::filter_records;

use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct WantedPersonsQuery {
    station: Option<String>,
    alias: Option<String>,
}

// --- Handlers ---

/// Resolve location fields to `{lat, lng}`, or `null` when unknown.
pub async fn api_geocode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GeocodeRequest>,
) -> impl IntoResponse {
    Json(state.resolver.resolve(&request).await)
}

pub async fn api_wanted_persons(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WantedPersonsQuery>,
) -> impl IntoResponse {
    match state.store.load().await {
        Ok(mut payload) => {
            payload.items = filter_records(
                &payload.items,
                params.station.as_deref(),
                params.alias.as_deref(),
            );
            info!(
                count = payload.items.len(),
                station = ?params.station,
                alias = ?params.alias,
                "Returning wanted persons"
            );
            Json(payload).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to load wanted persons");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

pub async fn api_scrape_wanted_persons(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let Some(scraper) = &state.scraper else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "FIRECRAWL_API_KEY is not configured; cannot run scrape",
        );
    };

    let scraped = match scraper.scrape().await {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Failed to run scrape");
            return error_response(status_for(&e), &e.to_string());
        }
    };

    match state.store.upsert(scraped.items, scraped.scraped_at).await {
        Ok(payload) => (StatusCode::ACCEPTED, Json(payload)).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to store scraped wanted persons");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

// --- Helpers ---

fn status_for(error: &InformaError) -> StatusCode {
    match error {
        InformaError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        InformaError::Scraping(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, detail: &str) -> axum::response::Response {
    (status, Json(serde_json::json!({ "detail": detail }))).into_response()
}
