//! Lenient field decoders for `#[serde(deserialize_with = "...")]`.
//!
//! Block and bio records are loosely typed on the wire. None of these
//! functions fail on a wrongly-typed value: they decode it to `None` (or an
//! empty collection) and leave the fallback to the caller. Pair them with
//! `#[serde(default)]` on the containing struct so missing fields behave the
//! same way as malformed ones.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Non-empty string. Numbers are stringified.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Number, also accepting numeric strings such as `"12"` or `" 0.5 "`.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(as_number(&Value::deserialize(deserializer)?))
}

/// Boolean, also accepting `"true"` / `"false"`.
pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Any strongly-typed value (usually a unit enum). Values that do not decode
/// become `None`.
pub fn choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// Array of records. Entries that fail to decode are skipped.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Object of string values. Empty and non-string values are skipped.
pub fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) if !s.is_empty() => Some((key, s)),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Numeric view of a JSON value, shared by [`number`] and callers that
/// inspect raw fields directly.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "string")]
        label: Option<String>,
        #[serde(deserialize_with = "number")]
        size: Option<f64>,
        #[serde(deserialize_with = "boolean")]
        enabled: Option<bool>,
        #[serde(deserialize_with = "items")]
        tags: Vec<String>,
        #[serde(deserialize_with = "string_map")]
        links: BTreeMap<String, String>,
    }

    #[test]
    fn test_well_typed_values() {
        let probe: Probe = serde_json::from_value(json!({
            "label": "Hi",
            "size": 12,
            "enabled": true,
            "tags": ["a", "b"],
            "links": { "x": "https://x.com" }
        }))
        .unwrap();

        assert_eq!(probe.label.as_deref(), Some("Hi"));
        assert_eq!(probe.size, Some(12.0));
        assert_eq!(probe.enabled, Some(true));
        assert_eq!(probe.tags, vec!["a", "b"]);
        assert_eq!(probe.links.get("x").map(String::as_str), Some("https://x.com"));
    }

    #[test]
    fn test_wrongly_typed_values_become_absent() {
        let probe: Probe = serde_json::from_value(json!({
            "label": { "nested": true },
            "size": "large",
            "enabled": 1,
            "tags": "not-a-list",
            "links": ["x"]
        }))
        .unwrap();

        assert!(probe.label.is_none());
        assert!(probe.size.is_none());
        assert!(probe.enabled.is_none());
        assert!(probe.tags.is_empty());
        assert!(probe.links.is_empty());
    }

    #[test]
    fn test_coercions() {
        let probe: Probe = serde_json::from_value(json!({
            "label": 42,
            "size": " 16 ",
            "enabled": "false",
            "tags": ["ok", 3, "fine"],
            "links": { "a": "", "b": 5, "c": "https://c.dev" }
        }))
        .unwrap();

        assert_eq!(probe.label.as_deref(), Some("42"));
        assert_eq!(probe.size, Some(16.0));
        assert_eq!(probe.enabled, Some(false));
        assert_eq!(probe.tags, vec!["ok", "fine"]);
        assert_eq!(probe.links.len(), 1);
    }

    #[test]
    fn test_empty_string_is_absent() {
        let probe: Probe = serde_json::from_value(json!({ "label": "" })).unwrap();
        assert!(probe.label.is_none());
    }
}
