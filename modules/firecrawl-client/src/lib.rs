pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{AgentOptions, ExtractRequest};

use std::time::Duration;

use types::{ExtractStarted, ExtractStatus};

pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v1";

pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl FirecrawlClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(2),
            max_polls: 150,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    /// Start an extraction job. Returns the job id.
    pub async fn start_extract(&self, request: &ExtractRequest) -> Result<String> {
        let url = format!("{}/extract", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let started: ExtractStarted = resp.json().await?;
        match started.id {
            Some(id) if started.success => Ok(id),
            _ => Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: started
                    .error
                    .unwrap_or_else(|| "extract request was not accepted".to_string()),
            }),
        }
    }

    /// Poll a job until it completes and return its `data` payload.
    pub async fn wait_for_extract(&self, id: &str) -> Result<serde_json::Value> {
        let url = format!("{}/extract/{}", self.base_url, id);

        for attempt in 1..=self.max_polls {
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.api_key)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(FirecrawlError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let job: ExtractStatus = resp.json().await?;
            match job.status.as_str() {
                "completed" => return Ok(job.data.unwrap_or(serde_json::Value::Null)),
                "failed" | "cancelled" => {
                    if let Some(error) = &job.error {
                        tracing::warn!(id, error = %error, "Extraction job failed");
                    }
                    return Err(FirecrawlError::JobFailed {
                        id: id.to_string(),
                        status: job.status,
                    });
                }
                _ => {
                    tracing::debug!(id, attempt, status = %job.status, "Extraction still in progress");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }

        Err(FirecrawlError::Timeout {
            id: id.to_string(),
            attempts: self.max_polls,
        })
    }

    /// Run an extraction end-to-end: start job, poll, return data.
    pub async fn extract(&self, request: &ExtractRequest) -> Result<serde_json::Value> {
        tracing::info!(urls = ?request.urls, "Starting Firecrawl extraction");

        let id = self.start_extract(request).await?;
        tracing::info!(id = %id, "Extraction job started, polling for completion");

        let data = self.wait_for_extract(&id).await?;
        tracing::info!(id = %id, "Extraction job completed");
        Ok(data)
    }
}
