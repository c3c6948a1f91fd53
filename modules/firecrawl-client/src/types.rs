use serde::{Deserialize, Serialize};

/// Input for `POST /extract`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    pub prompt: String,
    pub schema: serde_json::Value,
    #[serde(rename = "enableWebSearch")]
    pub enable_web_search: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentOptions>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentOptions {
    pub model: String,
}

/// Response from `POST /extract`: the job handle.
#[derive(Debug, Deserialize)]
pub(crate) struct ExtractStarted {
    #[serde(default)]
    pub success: bool,
    pub id: Option<String>,
    pub error: Option<String>,
}

/// Response from `GET /extract/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ExtractStatus {
    #[serde(default)]
    pub status: String,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
}
