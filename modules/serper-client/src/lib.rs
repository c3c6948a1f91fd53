pub mod error;
pub mod types;

pub use error::{Result, SerperError};
pub use types::{AnswerBox, KnowledgeGraph, OrganicResult, SearchBundle, SearchRequest};

pub const DEFAULT_SEARCH_URL: &str = "https://google.serper.dev/search";

pub struct SerperClient {
    client: reqwest::Client,
    api_key: String,
    search_url: String,
}

impl SerperClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }

    /// Point the client at a different search endpoint (proxies, local stubs).
    pub fn with_search_url(mut self, url: &str) -> Self {
        self.search_url = url.to_string();
        self
    }

    /// Run a single search. One request, no retries.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchBundle> {
        tracing::debug!(query = %request.q, gl = %request.gl, num = request.num, "Serper search");

        let resp = self
            .client
            .post(&self.search_url)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SerperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let bundle: SearchBundle = serde_json::from_str(&body)?;
        tracing::debug!(
            query = %request.q,
            organic = bundle.organic.len(),
            has_answer_box = bundle.answer_box.is_some(),
            has_knowledge_graph = bundle.knowledge_graph.is_some(),
            "Serper search complete"
        );
        Ok(bundle)
    }
}
