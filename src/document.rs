//! Parse JSON or TOML text into a [`PlainObject`].
//!
//! Only text the caller already holds; nothing here touches the filesystem.

use deep_combine_core::{Kind, PlainObject, Value};
use serde_json::Number;

/// Document parse errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("TOML parse error: {0}")]
    Toml(String),

    #[error("document root is not an object (found {0})")]
    NotAnObject(Kind),
}

/// Parse a JSON document whose root is an object.
pub fn from_json_str(text: &str) -> Result<PlainObject, DocumentError> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| DocumentError::Json(e.to_string()))?;

    match Value::from(json) {
        Value::Object(map) => Ok(map),
        other => Err(DocumentError::NotAnObject(other.kind())),
    }
}

/// Parse a TOML document. A TOML document is always a table.
pub fn from_toml_str(text: &str) -> Result<PlainObject, DocumentError> {
    let table: toml::Table = toml::from_str(text).map_err(|e| DocumentError::Toml(e.to_string()))?;
    Ok(table_to_object(table))
}

fn table_to_object(table: toml::Table) -> PlainObject {
    table
        .into_iter()
        .map(|(k, v)| (k, toml_to_value(v)))
        .collect()
}

/// Convert a TOML value. Datetimes become strings and non-finite floats become null.
fn toml_to_value(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Object(table_to_object(table)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_document() {
        let doc = from_json_str(r#"{"timeout": 100, "cache": {"mode": "off"}}"#).unwrap();

        assert_eq!(doc["timeout"].as_u64(), Some(100));
        assert_eq!(doc.get_path("cache.mode").and_then(Value::as_str), Some("off"));
    }

    #[test]
    fn test_json_root_must_be_object() {
        let err = from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DocumentError::NotAnObject(Kind::Array)));
    }

    #[test]
    fn test_invalid_json() {
        let err = from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn test_toml_document() {
        let text = "timeout = 900\nratio = 0.5\nwhen = 1979-05-27T07:32:00Z\nlist = [1, 2]\n\n[cache]\nderived_data = \"on\"\nenabled = true\n";
        let doc = from_toml_str(text).unwrap();

        assert_eq!(doc["timeout"].as_i64(), Some(900));
        assert_eq!(doc["ratio"].as_f64(), Some(0.5));
        assert_eq!(doc["when"].as_str(), Some("1979-05-27T07:32:00Z"));
        assert_eq!(doc["list"].as_array().map(<[Value]>::len), Some(2));
        assert_eq!(doc.get_path("cache.derived_data").and_then(Value::as_str), Some("on"));
        assert_eq!(doc.get_path("cache.enabled").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_toml_keeps_key_order() {
        let doc = from_toml_str("zeta = 1\nalpha = 2\n").unwrap();
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_invalid_toml() {
        let err = from_toml_str("= broken").unwrap_err();
        assert!(matches!(err, DocumentError::Toml(_)));
    }
}
