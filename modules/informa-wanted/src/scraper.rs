use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use firecrawl_client::{AgentOptions, ExtractRequest, FirecrawlClient};
use informa_common::{Config, InformaError, WantedPersonsPayload};
use serde_json::{json, Value};
use tracing::info;
use url::Url;

use crate::normalize::{dedupe, extract_records};

const EXTRACT_PROMPT: &str = "Extract the full name, alias, crime(s), image URL, and police station \
location for each wanted person. Ensure that the full name is included.";

const EXTRACT_AGENT_MODEL: &str = "FIRE-1";

/// Structured, schema-guided extraction from web pages.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: &Value,
    ) -> anyhow::Result<Value>;
}

#[async_trait]
impl StructuredExtractor for FirecrawlClient {
    async fn extract(
        &self,
        urls: &[String],
        prompt: &str,
        schema: &Value,
    ) -> anyhow::Result<Value> {
        let request = ExtractRequest {
            urls: urls.to_vec(),
            prompt: prompt.to_string(),
            schema: schema.clone(),
            enable_web_search: true,
            agent: Some(AgentOptions {
                model: EXTRACT_AGENT_MODEL.to_string(),
            }),
        };
        Ok(FirecrawlClient::extract(self, &request).await?)
    }
}

/// JSON schema handed to the extractor.
pub fn extract_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "wanted_persons": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "full_name": {"type": "string"},
                        "alias": {"type": ["string", "null"]},
                        "crimes": {"type": ["string", "array"]},
                        "image_url": {"type": ["string", "null"]},
                        "police_station": {"type": ["string", "null"]},
                        "source_url": {"type": ["string", "null"]}
                    }
                }
            }
        },
        "required": ["wanted_persons"]
    })
}

/// Scrapes the wanted persons listing into a normalized, deduplicated payload.
pub struct WantedPersonsScraper {
    extractor: Arc<dyn StructuredExtractor>,
    source_url: Url,
}

impl WantedPersonsScraper {
    pub fn new(extractor: Arc<dyn StructuredExtractor>, source_url: Url) -> Self {
        Self {
            extractor,
            source_url,
        }
    }

    /// Firecrawl-backed scraper. Fails if no Firecrawl key is configured.
    pub fn from_config(config: &Config) -> Result<Self, InformaError> {
        let api_key = config.firecrawl_api_key.as_deref().ok_or_else(|| {
            InformaError::Config("FIRECRAWL_API_KEY is not configured; cannot run scrape".into())
        })?;
        let client = FirecrawlClient::new(api_key)
            .with_base_url(&config.firecrawl_api_url)
            .with_polling(Duration::from_secs(2), 150);
        Ok(Self::new(
            Arc::new(client),
            config.wanted_persons_source_url.clone(),
        ))
    }

    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    pub async fn scrape(&self) -> Result<WantedPersonsPayload, InformaError> {
        info!(source_url = %self.source_url, "Starting wanted persons scrape");

        let raw = self
            .extractor
            .extract(&[self.source_url.to_string()], EXTRACT_PROMPT, &extract_schema())
            .await
            .map_err(|e| InformaError::Scraping(format!("{e:#}")))?;

        let records = extract_records(&raw);
        info!(count = records.len(), "Extraction returned wanted person records");

        let items = dedupe(records);
        let scraped_at = Utc::now();
        info!(
            count = items.len(),
            scraped_at = %scraped_at.to_rfc3339(),
            "Wanted persons dataset updated"
        );

        Ok(WantedPersonsPayload {
            scraped_at,
            source_url: self.source_url.clone(),
            items,
        })
    }
}
