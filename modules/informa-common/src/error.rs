use thiserror::Error;

#[derive(Error, Debug)]
pub enum InformaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
