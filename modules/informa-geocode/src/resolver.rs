use std::sync::Arc;

use informa_common::{GeocodeRequest, GeocodeResult};
use tracing::debug;

use crate::cache::{cache_key, CacheEntry, ResolutionCache};
use crate::extract::CoordinateExtractor;
use crate::gateway::SearchGateway;
use crate::query::build_query;

/// Cache-first coordinate resolution.
///
/// Outcomes, including "no result", are cached for the lifetime of the
/// cache, so an unresolvable input costs one search per process.
pub struct Resolver {
    gateway: Arc<dyn SearchGateway>,
    cache: Arc<ResolutionCache>,
    extractor: CoordinateExtractor,
}

impl Resolver {
    pub fn new(gateway: Arc<dyn SearchGateway>, cache: Arc<ResolutionCache>) -> Self {
        Self {
            gateway,
            cache,
            extractor: CoordinateExtractor::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: CoordinateExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub async fn resolve(&self, request: &GeocodeRequest) -> Option<GeocodeResult> {
        let key = cache_key(request);

        if let Some(entry) = self.cache.get(&key) {
            debug!(key = %key, "Geocode cache hit");
            return entry.result();
        }

        debug!(key = %key, "Geocode cache miss");
        self.cache
            .get_or_resolve(&key, || self.lookup(request))
            .await
            .result()
    }

    async fn lookup(&self, request: &GeocodeRequest) -> CacheEntry {
        let query = build_query(request);
        let bundle = self.gateway.search(&query).await;
        let result = self
            .extractor
            .extract(bundle.as_ref())
            .and_then(|r| GeocodeResult::new(r.lat, r.lng));

        match result {
            Some(r) => debug!(query = %query, lat = r.lat, lng = r.lng, "Geocode resolved"),
            None => debug!(query = %query, "Geocode found no coordinates"),
        }
        result.into()
    }
}
