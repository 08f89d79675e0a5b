//! Conversions between [`Value`] and `serde_json::Value`, plus serde impls.
//!
//! JSON has no `undefined`. Going out to JSON, undefined object entries are
//! dropped and undefined array items or top-level values become `null`, the
//! same way `JSON.stringify` treats them.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CombineError;
use crate::value::{PlainObject, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(PlainObject::from(map)),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(map.into()),
        }
    }
}

impl From<PlainObject> for serde_json::Map<String, serde_json::Value> {
    fn from(map: PlainObject) -> Self {
        map.into_iter()
            .filter(|(_, v)| !v.is_undefined())
            .map(|(k, v)| (k, serde_json::Value::from(v)))
            .collect()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for PlainObject {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}

impl TryFrom<serde_json::Value> for PlainObject {
    type Error = CombineError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Object(map) => Ok(map),
            other => Err(CombineError::NotAnObject {
                position: 0,
                kind: other.kind(),
            }),
        }
    }
}

impl TryFrom<Value> for PlainObject {
    type Error = CombineError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(CombineError::NotAnObject {
                position: 0,
                kind: other.kind(),
            }),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for PlainObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let defined = self.values().filter(|v| !v.is_undefined()).count();
        let mut out = serializer.serialize_map(Some(defined))?;
        for (key, value) in self.iter().filter(|(_, v)| !v.is_undefined()) {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl<'de> Deserialize<'de> for PlainObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Map::<String, serde_json::Value>::deserialize(deserializer).map(PlainObject::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use serde_json::json;

    #[test]
    fn test_json_object_becomes_plain_object() {
        let map = PlainObject::try_from(json!({"a": 1, "b": {"c": [true, null]}})).unwrap();

        assert_eq!(map["a"].as_i64(), Some(1));
        assert_eq!(map.get_path("b.c").and_then(Value::as_array).map(<[Value]>::len), Some(2));
        assert!(map.get_path("b.c").unwrap().as_array().unwrap()[1].is_null());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = PlainObject::try_from(json!([1, 2])).unwrap_err();
        assert!(matches!(
            err,
            CombineError::NotAnObject {
                kind: Kind::Array,
                ..
            }
        ));
    }

    #[test]
    fn test_undefined_dropped_from_objects() {
        let mut map = PlainObject::new();
        map.insert("a", Value::Undefined);
        map.insert("b", 2);

        let json = serde_json::Value::from(Value::Object(map));
        assert_eq!(json, json!({"b": 2}));
    }

    #[test]
    fn test_undefined_in_array_becomes_null() {
        let value = Value::Array(vec![Value::Undefined, Value::from(1)]);
        assert_eq!(serde_json::Value::from(value), json!([null, 1]));
    }

    #[test]
    fn test_serialize_matches_conversion() {
        let mut map = PlainObject::new();
        map.insert("keep", "yes");
        map.insert("skip", Value::Undefined);
        map.insert("list", vec![Value::Undefined, Value::from(false)]);

        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(text, r#"{"keep":"yes","list":[null,false]}"#);
    }

    #[test]
    fn test_deserialize_keeps_key_order() {
        let map: PlainObject = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
