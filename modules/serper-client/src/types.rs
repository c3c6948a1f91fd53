use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Request ---

/// Body of a `POST /search` call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub q: String,
    /// Country scope, e.g. `jm`.
    pub gl: String,
    /// Interface language, e.g. `en`.
    pub hl: String,
    pub num: u32,
}

// --- Response ---

/// Everything a search may return that we care about.
///
/// Each section is optional and decoded on its own: a malformed answer box
/// leaves the knowledge graph and organic results intact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchBundle {
    #[serde(rename = "answerBox", default, deserialize_with = "lenient")]
    pub answer_box: Option<AnswerBox>,
    #[serde(rename = "knowledgeGraph", default, deserialize_with = "lenient")]
    pub knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub organic: Vec<OrganicResult>,
}

/// Direct answer block. Coordinates arrive as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerBox {
    #[serde(default, alias = "lat", deserialize_with = "text_or_number")]
    pub latitude: Option<String>,
    #[serde(default, alias = "lng", deserialize_with = "text_or_number")]
    pub longitude: Option<String>,
}

/// Entity card. Coordinates arrive as numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default, deserialize_with = "text_or_number")]
    pub title: Option<String>,
    #[serde(default, alias = "lat", deserialize_with = "number_or_text")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", deserialize_with = "number_or_text")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    #[serde(default, deserialize_with = "text_or_number")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub snippet: Option<String>,
}

// --- Lenient decoding helpers ---

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn number_or_text<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_with_all_sections() {
        let raw = r#"{
            "answerBox": {"latitude": "18.0179", "longitude": "-76.8099"},
            "knowledgeGraph": {"title": "Kingston", "latitude": 18.0179, "longitude": -76.8099},
            "organic": [{"title": "Kingston", "link": "https://example.com", "snippet": "capital"}]
        }"#;
        let bundle: SearchBundle = serde_json::from_str(raw).unwrap();
        let answer = bundle.answer_box.unwrap();
        assert_eq!(answer.latitude.as_deref(), Some("18.0179"));
        assert_eq!(answer.longitude.as_deref(), Some("-76.8099"));
        let kg = bundle.knowledge_graph.unwrap();
        assert_eq!(kg.latitude, Some(18.0179));
        assert_eq!(kg.longitude, Some(-76.8099));
        assert_eq!(bundle.organic.len(), 1);
        assert_eq!(bundle.organic[0].snippet.as_deref(), Some("capital"));
    }

    #[test]
    fn test_empty_object_is_empty_bundle() {
        let bundle: SearchBundle = serde_json::from_str("{}").unwrap();
        assert!(bundle.answer_box.is_none());
        assert!(bundle.knowledge_graph.is_none());
        assert!(bundle.organic.is_empty());
    }

    #[test]
    fn test_malformed_sections_are_dropped_not_fatal() {
        let raw = r#"{
            "answerBox": "not an object",
            "knowledgeGraph": {"latitude": {"nested": true}, "longitude": -76.8},
            "organic": [42, {"snippet": "ok"}, null]
        }"#;
        let bundle: SearchBundle = serde_json::from_str(raw).unwrap();
        assert!(bundle.answer_box.is_none());
        let kg = bundle.knowledge_graph.unwrap();
        assert_eq!(kg.latitude, None);
        assert_eq!(kg.longitude, Some(-76.8));
        assert_eq!(bundle.organic.len(), 1);
        assert_eq!(bundle.organic[0].snippet.as_deref(), Some("ok"));
    }

    #[test]
    fn test_short_coordinate_keys_are_accepted() {
        let raw = r#"{"knowledgeGraph": {"lat": "18.5", "lng": -77.1}}"#;
        let bundle: SearchBundle = serde_json::from_str(raw).unwrap();
        let kg = bundle.knowledge_graph.unwrap();
        assert_eq!(kg.latitude, Some(18.5));
        assert_eq!(kg.longitude, Some(-77.1));
    }

    #[test]
    fn test_request_serializes_expected_keys() {
        let req = SearchRequest {
            q: "Half Way Tree".into(),
            gl: "jm".into(),
            hl: "en".into(),
            num: 5,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"q": "Half Way Tree", "gl": "jm", "hl": "en", "num": 5})
        );
    }
}
