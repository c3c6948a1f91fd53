pub mod rest;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use informa_common::Config;
use informa_geocode::{CoordinateExtractor, ResolutionCache, Resolver, SerperGateway};
use informa_wanted::{WantedPersonsScraper, WantedPersonsStore};

pub struct AppState {
    pub resolver: Resolver,
    pub store: WantedPersonsStore,
    /// `None` when no Firecrawl key is configured.
    pub scraper: Option<WantedPersonsScraper>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let gateway = SerperGateway::new(config.serper_api_key.as_deref(), &config.serper_api_url);
        let resolver = Resolver::new(Arc::new(gateway), Arc::new(ResolutionCache::new()))
            .with_extractor(CoordinateExtractor::new(config.geocode_strict_bounds));

        let store = WantedPersonsStore::new(
            config.wanted_persons_data_path.clone(),
            config.wanted_persons_source_url.clone(),
        );

        let scraper = match WantedPersonsScraper::from_config(config) {
            Ok(scraper) => Some(scraper),
            Err(e) => {
                tracing::warn!(error = %e, "Scraping disabled");
                None
            }
        };

        Self {
            resolver,
            store,
            scraper,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/api/geocode", post(rest::api_geocode))
        .route("/api/wanted-persons", get(rest::api_wanted_persons))
        .route("/api/wanted-persons/scrape", post(rest::api_scrape_wanted_persons))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
