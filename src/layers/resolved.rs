//! Resolved layer stack

use deep_combine_core::{PlainObject, Value};
use serde::Serialize;

use super::stack::LayerSource;

/// The combined object plus the layers that produced it
#[derive(Debug, Clone, Serialize)]
pub struct Resolved {
    /// The combined object
    pub value: PlainObject,

    /// Base first, then overlays in precedence order
    pub sources: Vec<LayerSource>,

    #[serde(skip)]
    layers: Vec<PlainObject>,
}

impl Resolved {
    pub(super) fn new(value: PlainObject, sources: Vec<LayerSource>, layers: Vec<PlainObject>) -> Self {
        Self {
            value,
            sources,
            layers,
        }
    }

    /// Get a value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.value.get_path(path)
    }

    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(Value::as_u64)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Name of the layer that last set `path`, or the base if no overlay did.
    ///
    /// None when the resolved object has nothing at `path`.
    pub fn origin_of(&self, path: &str) -> Option<&str> {
        self.get(path)?;

        // A later layer that carries the full path always decides its value.
        let overlay = self
            .layers
            .iter()
            .zip(self.sources.iter().skip(1))
            .rev()
            .find(|(layer, _)| layer.get_path(path).is_some())
            .map(|(_, source)| source.name.as_str());

        overlay.or_else(|| self.sources.first().map(|s| s.name.as_str()))
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
