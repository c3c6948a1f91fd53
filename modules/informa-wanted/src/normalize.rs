//! Turn loosely-shaped extraction output into `WantedPerson` records.

use std::collections::HashMap;

use informa_common::WantedPerson;
use serde_json::{Map, Value};
use url::Url;

/// Split a crimes value into a clean list.
///
/// Strings are split on commas and on the word "and"; lists are taken item by
/// item. Blank entries are dropped.
pub fn normalize_crimes(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .map(|item| scalar_text(item).trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        Value::String(text) => text
            .replace(" and ", ",")
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
        other => vec![scalar_text(other)],
    }
}

/// Build a record from one extracted object. Records without a name are
/// skipped.
pub fn normalize_record(data: &Map<String, Value>) -> Option<WantedPerson> {
    let full_name = text_field(data, &["full_name", "name"])?;

    Some(WantedPerson {
        full_name,
        alias: text_field(data, &["alias"]),
        crimes: data.get("crimes").map(normalize_crimes).unwrap_or_default(),
        image_url: url_field(data, &["image_url", "imageurl"]),
        police_station: text_field(data, &["police_station", "location"]),
        source_url: url_field(data, &["source_url"]),
    })
}

/// Find the record list in an extraction payload and normalize every entry.
pub fn extract_records(raw: &Value) -> Vec<WantedPerson> {
    let Some(Value::Array(entries)) = record_source(raw) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(normalize_record)
        .collect()
}

/// Drop duplicates by (name, alias), case-insensitive. A later duplicate
/// replaces the earlier record but keeps its position.
pub fn dedupe(items: Vec<WantedPerson>) -> Vec<WantedPerson> {
    let mut positions: HashMap<(String, Option<String>), usize> = HashMap::new();
    let mut unique: Vec<WantedPerson> = Vec::with_capacity(items.len());

    for person in items {
        let key = person.identity();
        if let Some(&index) = positions.get(&key) {
            unique[index] = person;
        } else {
            positions.insert(key, unique.len());
            unique.push(person);
        }
    }

    unique
}

// --- Helpers ---

fn record_source(raw: &Value) -> Option<&Value> {
    if let Some(list) = raw.get("wanted_persons") {
        return Some(list);
    }
    if let Some(data) = raw.get("data") {
        if let Some(list) = data.get("wanted_persons").or_else(|| data.get("criminals")) {
            return Some(list);
        }
    }
    ["criminals", "items"]
        .into_iter()
        .filter_map(|key| raw.get(key))
        .find(|list| list.as_array().is_some_and(|a| !a.is_empty()))
}

fn text_field(data: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        data.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(String::from)
    })
}

fn url_field(data: &Map<String, Value>, keys: &[&str]) -> Option<Url> {
    let text = text_field(data, keys)?;
    match Url::parse(&text) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!(url = %text, error = %e, "Dropping unparsable URL");
            None
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    // --- normalize_crimes ---

    #[test]
    fn test_crimes_single_string() {
        assert_eq!(normalize_crimes(&json!("Murder")), vec!["Murder"]);
    }

    #[test]
    fn test_crimes_comma_separated() {
        assert_eq!(
            normalize_crimes(&json!("Murder, Robbery")),
            vec!["Murder", "Robbery"]
        );
    }

    #[test]
    fn test_crimes_joined_with_and() {
        assert_eq!(
            normalize_crimes(&json!("Murder and Robbery")),
            vec!["Murder", "Robbery"]
        );
    }

    #[test]
    fn test_crimes_list() {
        assert_eq!(
            normalize_crimes(&json!(["Murder", " Robbery ", "", "  "])),
            vec!["Murder", "Robbery"]
        );
    }

    #[test]
    fn test_crimes_null() {
        assert!(normalize_crimes(&Value::Null).is_empty());
    }

    #[test]
    fn test_crimes_other_scalar() {
        assert_eq!(normalize_crimes(&json!(3)), vec!["3"]);
    }

    // --- normalize_record ---

    #[test]
    fn test_record_with_full_data() {
        let record = normalize_record(&object(json!({
            "full_name": "John Doe",
            "alias": "Johnny",
            "crimes": "Murder",
            "image_url": "https://example.com/image.jpg",
            "police_station": "Kingston Central Police",
            "source_url": "https://example.com/source"
        })))
        .unwrap();

        assert_eq!(record.full_name, "John Doe");
        assert_eq!(record.alias.as_deref(), Some("Johnny"));
        assert_eq!(record.crimes, vec!["Murder"]);
        assert_eq!(
            record.image_url.unwrap().as_str(),
            "https://example.com/image.jpg"
        );
        assert_eq!(
            record.police_station.as_deref(),
            Some("Kingston Central Police")
        );
        assert_eq!(
            record.source_url.unwrap().as_str(),
            "https://example.com/source"
        );
    }

    #[test]
    fn test_record_with_alternative_field_names() {
        let record = normalize_record(&object(json!({
            "name": "John Doe",
            "alias": "Johnny",
            "crimes": "Murder",
            "imageurl": "https://example.com/image.jpg",
            "location": "Kingston Central Police"
        })))
        .unwrap();

        assert_eq!(record.full_name, "John Doe");
        assert_eq!(
            record.image_url.unwrap().as_str(),
            "https://example.com/image.jpg"
        );
        assert_eq!(
            record.police_station.as_deref(),
            Some("Kingston Central Police")
        );
    }

    #[test]
    fn test_record_without_name_is_skipped() {
        assert!(normalize_record(&object(json!({"alias": "Johnny", "crimes": "Murder"}))).is_none());
        assert!(normalize_record(&object(json!({"full_name": "   "}))).is_none());
    }

    #[test]
    fn test_empty_full_name_falls_back_to_name() {
        let record = normalize_record(&object(json!({"full_name": "", "name": "Jane Roe"}))).unwrap();
        assert_eq!(record.full_name, "Jane Roe");
    }

    #[test]
    fn test_blank_alias_and_bad_url_become_none() {
        let record = normalize_record(&object(json!({
            "full_name": " Mark Smith ",
            "alias": "",
            "image_url": "not a url"
        })))
        .unwrap();
        assert_eq!(record.full_name, "Mark Smith");
        assert_eq!(record.alias, None);
        assert_eq!(record.image_url, None);
        assert!(record.crimes.is_empty());
    }

    // --- extract_records ---

    #[test]
    fn test_extract_from_top_level_key() {
        let records = extract_records(&json!({
            "wanted_persons": [{"full_name": "A"}, {"alias": "no name"}, {"full_name": "B"}]
        }));
        let names: Vec<_> = records.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_extract_from_nested_data() {
        let nested = extract_records(&json!({"data": {"wanted_persons": [{"full_name": "A"}]}}));
        assert_eq!(nested.len(), 1);

        let criminals = extract_records(&json!({"data": {"criminals": [{"name": "C"}]}}));
        assert_eq!(criminals[0].full_name, "C");
    }

    #[test]
    fn test_extract_from_fallback_keys() {
        let criminals = extract_records(&json!({"criminals": [{"name": "C"}]}));
        assert_eq!(criminals.len(), 1);

        let items = extract_records(&json!({"criminals": [], "items": [{"name": "I"}]}));
        assert_eq!(items[0].full_name, "I");
    }

    #[test]
    fn test_extract_from_unknown_shape_is_empty() {
        assert!(extract_records(&json!({"other": []})).is_empty());
        assert!(extract_records(&json!({"wanted_persons": null})).is_empty());
        assert!(extract_records(&Value::Null).is_empty());
        assert!(extract_records(&json!({"wanted_persons": ["just a string"]})).is_empty());
    }

    // --- dedupe ---

    #[test]
    fn test_dedupe_keeps_first_position_last_value() {
        let records = extract_records(&json!({"wanted_persons": [
            {"full_name": "John Brown", "alias": "Slim", "crimes": "Murder"},
            {"full_name": "Mary Green"},
            {"full_name": "JOHN BROWN", "alias": "slim", "crimes": "Robbery"},
            {"full_name": "John Brown"}
        ]}));

        let unique = dedupe(records);

        assert_eq!(unique.len(), 3);
        assert_eq!(unique[0].full_name, "JOHN BROWN");
        assert_eq!(unique[0].crimes, vec!["Robbery"]);
        assert_eq!(unique[1].full_name, "Mary Green");
        assert_eq!(unique[2].full_name, "John Brown");
        assert_eq!(unique[2].alias, None);
    }
}
