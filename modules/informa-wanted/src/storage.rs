use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use informa_common::{InformaError, WantedPerson, WantedPersonsPayload};
use tracing::{info, warn};
use url::Url;

use crate::normalize::dedupe;

/// Wanted persons dataset persisted as a single JSON file.
pub struct WantedPersonsStore {
    path: PathBuf,
    source_url: Url,
}

impl WantedPersonsStore {
    pub fn new(path: impl Into<PathBuf>, source_url: Url) -> Self {
        Self {
            path: path.into(),
            source_url,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored dataset. A missing file yields an empty payload.
    pub async fn load(&self) -> Result<WantedPersonsPayload, InformaError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| InformaError::Storage(format!("{}: {e}", self.path.display())))?;
        if !exists {
            info!(path = %self.path.display(), "Wanted persons dataset not found; returning empty payload");
            return Ok(WantedPersonsPayload {
                scraped_at: Utc::now(),
                source_url: self.source_url.clone(),
                items: Vec::new(),
            });
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| InformaError::Storage(format!("{}: {e}", self.path.display())))?;

        serde_json::from_str(&raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to validate stored wanted persons payload");
            InformaError::Validation(e.to_string())
        })
    }

    /// Write the dataset, creating parent directories as needed.
    pub async fn save(&self, payload: &WantedPersonsPayload) -> Result<PathBuf, InformaError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InformaError::Storage(format!("{}: {e}", parent.display())))?;
        }

        let body = serde_json::to_string_pretty(payload)
            .map_err(|e| InformaError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| InformaError::Storage(format!("{}: {e}", self.path.display())))?;

        info!(count = payload.items.len(), path = %self.path.display(), "Stored wanted persons records");
        Ok(self.path.clone())
    }

    /// Deduplicate `items`, stamp them with the configured source and save.
    pub async fn upsert(
        &self,
        items: Vec<WantedPerson>,
        scraped_at: DateTime<Utc>,
    ) -> Result<WantedPersonsPayload, InformaError> {
        let payload = WantedPersonsPayload {
            scraped_at,
            source_url: self.source_url.clone(),
            items: dedupe(items),
        };
        self.save(&payload).await?;
        Ok(payload)
    }
}
