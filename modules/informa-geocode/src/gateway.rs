use async_trait::async_trait;
use serper_client::{SearchBundle, SearchRequest, SerperClient, SerperError};
use tracing::warn;

/// Country the search is scoped to.
pub const COUNTRY_CODE: &str = "jm";
pub const LANGUAGE: &str = "en";
pub const RESULT_COUNT: u32 = 5;

/// Web search as the resolver sees it: a bundle, or nothing.
///
/// Implementations never fail outward. Misconfiguration, transport errors
/// and bad statuses are logged and reported as `None`.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, query: &str) -> Option<SearchBundle>;
}

/// Serper-backed gateway. Without an API key every search yields `None`.
pub struct SerperGateway {
    client: Option<SerperClient>,
}

impl SerperGateway {
    pub fn new(api_key: Option<&str>, search_url: &str) -> Self {
        let client = api_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| SerperClient::new(key).with_search_url(search_url));
        if client.is_none() {
            warn!("SERPER_API_KEY not set; geocoding will return no results");
        }
        Self { client }
    }

    pub fn from_client(client: SerperClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl SearchGateway for SerperGateway {
    async fn search(&self, query: &str) -> Option<SearchBundle> {
        let Some(client) = &self.client else {
            warn!(query, "Geocode search skipped: SERPER_API_KEY not configured");
            return None;
        };

        let request = SearchRequest {
            q: query.to_string(),
            gl: COUNTRY_CODE.to_string(),
            hl: LANGUAGE.to_string(),
            num: RESULT_COUNT,
        };

        match client.search(&request).await {
            Ok(bundle) => Some(bundle),
            Err(SerperError::Api { status, message }) => {
                warn!(query, status, body = %message, "Geocode search rejected");
                None
            }
            Err(e) => {
                warn!(query, error = %e, "Geocode search failed");
                None
            }
        }
    }
}
