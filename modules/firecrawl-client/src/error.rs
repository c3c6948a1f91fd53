use thiserror::Error;

pub type Result<T> = std::result::Result<T, FirecrawlError>;

#[derive(Debug, Error)]
pub enum FirecrawlError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Extraction job {id} ended with status: {status}")]
    JobFailed { id: String, status: String },

    #[error("Extraction job {id} did not finish after {attempts} polls")]
    Timeout { id: String, attempts: u32 },
}

impl From<reqwest::Error> for FirecrawlError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FirecrawlError::Parse(err.to_string())
        } else {
            FirecrawlError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FirecrawlError {
    fn from(err: serde_json::Error) -> Self {
        FirecrawlError::Parse(err.to_string())
    }
}
