//! Layer stack with provenance

use deep_combine_core::{combine, CombineError, PlainObject};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::resolved::Resolved;
use crate::document::{self, DocumentError};

/// A contributing layer with provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSource {
    /// Layer name, unique names are not enforced
    pub name: String,

    /// SHA-256 digest of the raw text (None for layers pushed as objects)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl LayerSource {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            digest: None,
        }
    }

    fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Self {
            name: name.into(),
            digest: Some(hex::encode(hasher.finalize())),
        }
    }
}

/// Base object plus overlay layers in precedence order (last wins)
#[derive(Debug, Clone)]
pub struct LayerStack {
    base: (LayerSource, PlainObject),
    layers: Vec<(LayerSource, PlainObject)>,
}

impl LayerStack {
    /// Start a stack from a named base object.
    pub fn new(name: impl Into<String>, base: PlainObject) -> Self {
        Self {
            base: (LayerSource::named(name), base),
            layers: Vec::new(),
        }
    }

    /// Push an overlay object.
    pub fn push(&mut self, name: impl Into<String>, layer: PlainObject) -> &mut Self {
        self.layers.push((LayerSource::named(name), layer));
        self
    }

    /// Parse and push a JSON overlay.
    pub fn push_json(&mut self, name: impl Into<String>, text: &str) -> Result<&mut Self, LayerError> {
        let layer = document::from_json_str(text)?;
        self.layers.push((LayerSource::from_text(name, text), layer));
        Ok(self)
    }

    /// Parse and push a TOML overlay.
    pub fn push_toml(&mut self, name: impl Into<String>, text: &str) -> Result<&mut Self, LayerError> {
        let layer = document::from_toml_str(text)?;
        self.layers.push((LayerSource::from_text(name, text), layer));
        Ok(self)
    }

    /// Number of overlays, not counting the base.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Combine every layer onto the base.
    pub fn resolve(&self) -> Result<Resolved, LayerError> {
        let names: Vec<&str> = self.layers.iter().map(|(s, _)| s.name.as_str()).collect();
        debug!(base = %self.base.0.name, layers = ?names, "resolving layer stack");

        let value = combine(&self.base.1, self.layers.iter().map(|(_, layer)| layer))
            .map_err(|e| match e {
                CombineError::NoOverlays => LayerError::Empty,
                other => LayerError::Combine(other),
            })?;

        let sources = std::iter::once(&self.base)
            .chain(self.layers.iter())
            .map(|(source, _)| source.clone())
            .collect();

        Ok(Resolved::new(
            value,
            sources,
            self.layers.iter().map(|(_, layer)| layer.clone()).collect(),
        ))
    }
}

/// Layer stack errors
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("layer stack has no overlays to resolve")]
    Empty,

    #[error("invalid layer: {0}")]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Combine(CombineError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(json: serde_json::Value) -> PlainObject {
        PlainObject::try_from(json).unwrap()
    }

    fn builtin() -> PlainObject {
        obj(json!({
            "timeout": 100,
            "cache": {"mode": "off", "size": 10},
            "schemes": ["A", "B"]
        }))
    }

    #[test]
    fn test_resolve_in_precedence_order() {
        let mut stack = LayerStack::new("builtin", builtin());
        stack
            .push("host", obj(json!({"timeout": 200})))
            .push("repo", obj(json!({"cache": {"mode": "on"}, "schemes": ["X"]})))
            .push("cli", obj(json!({"timeout": 50})));

        let resolved = stack.resolve().unwrap();

        assert_eq!(resolved.get_u64("timeout"), Some(50));
        assert_eq!(resolved.get_str("cache.mode"), Some("on"));
        assert_eq!(resolved.get_u64("cache.size"), Some(10));
        assert_eq!(
            resolved.get("schemes").and_then(|v| v.as_array()).map(|a| a.len()),
            Some(1)
        );
    }

    #[test]
    fn test_empty_stack() {
        let stack = LayerStack::new("builtin", builtin());
        assert!(stack.is_empty());
        assert!(matches!(stack.resolve(), Err(LayerError::Empty)));
    }

    #[test]
    fn test_text_layers_record_digest() {
        let mut stack = LayerStack::new("builtin", builtin());
        stack
            .push_toml("repo", "timeout = 900\n[cache]\nmode = \"on\"\n")
            .unwrap()
            .push_json("cli", r#"{"timeout": 30}"#)
            .unwrap();

        let resolved = stack.resolve().unwrap();
        assert_eq!(resolved.get_u64("timeout"), Some(30));
        assert_eq!(resolved.get_str("cache.mode"), Some("on"));

        assert_eq!(resolved.sources.len(), 3);
        assert_eq!(resolved.sources[0].digest, None);
        let digest = resolved.sources[2].digest.as_deref().unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_text_same_digest() {
        let a = LayerSource::from_text("a", "x = 1");
        let b = LayerSource::from_text("b", "x = 1");
        let c = LayerSource::from_text("c", "x = 2");
        assert_eq!(a.digest, b.digest);
        assert_ne!(a.digest, c.digest);
    }

    #[test]
    fn test_invalid_layer_text() {
        let mut stack = LayerStack::new("builtin", builtin());
        let err = stack.push_json("cli", "[1]").unwrap_err();
        assert!(matches!(err, LayerError::Document(DocumentError::NotAnObject(_))));
        assert_eq!(stack.len(), 0);
    }
}
