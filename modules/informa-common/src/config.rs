use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

const DEFAULT_SOURCE_URL: &str = "https://jcf.gov.jm/crime/wanted-persons/";
const DEFAULT_DATA_PATH: &str = "data/wanted_persons.json";
const DEFAULT_SERPER_URL: &str = "https://google.serper.dev/search";
const DEFAULT_FIRECRAWL_URL: &str = "https://api.firecrawl.dev/v1";

/// Application configuration loaded from environment variables.
/// Nothing is required: missing API keys disable the features that need them.
#[derive(Debug, Clone)]
pub struct Config {
    // Geocoding
    pub serper_api_key: Option<String>,
    pub serper_api_url: String,
    pub geocode_strict_bounds: bool,

    // Scraping
    pub firecrawl_api_key: Option<String>,
    pub firecrawl_api_url: String,
    pub wanted_persons_source_url: Url,

    // Storage
    pub wanted_persons_data_path: PathBuf,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source_url = non_empty("WANTED_PERSONS_SOURCE_URL")
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let wanted_persons_source_url = Url::parse(&source_url)
            .with_context(|| format!("WANTED_PERSONS_SOURCE_URL is not a valid URL: {source_url}"))?;

        let web_port = match non_empty("WEB_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("WEB_PORT must be a number, got {port}"))?,
            None => 8000,
        };

        let geocode_strict_bounds = match non_empty("GEOCODE_STRICT_BOUNDS") {
            Some(flag) => parse_flag(&flag)
                .with_context(|| format!("GEOCODE_STRICT_BOUNDS must be a boolean, got {flag}"))?,
            None => false,
        };

        Ok(Self {
            serper_api_key: non_empty("SERPER_API_KEY"),
            serper_api_url: non_empty("SERPER_API_URL")
                .unwrap_or_else(|| DEFAULT_SERPER_URL.to_string()),
            geocode_strict_bounds,
            firecrawl_api_key: non_empty("FIRECRAWL_API_KEY"),
            firecrawl_api_url: non_empty("FIRECRAWL_API_URL")
                .unwrap_or_else(|| DEFAULT_FIRECRAWL_URL.to_string()),
            wanted_persons_source_url,
            wanted_persons_data_path: non_empty("WANTED_PERSONS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            web_host: non_empty("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
        })
    }

    pub fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => {
                    let n = v.chars().take(5).collect::<String>();
                    format!("{}...({} chars)", n, v.len())
                }
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  SERPER_API_KEY: {}", preview_opt(&self.serper_api_key));
        tracing::info!("  FIRECRAWL_API_KEY: {}", preview_opt(&self.firecrawl_api_key));
        tracing::info!("  WANTED_PERSONS_SOURCE_URL: {}", self.wanted_persons_source_url);
        tracing::info!(
            "  WANTED_PERSONS_DATA_PATH: {}",
            self.wanted_persons_data_path.display()
        );
        tracing::info!("  GEOCODE_STRICT_BOUNDS: {}", self.geocode_strict_bounds);
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
