//! Deep Combine - deep merge for plain data objects
//!
//! This crate combines a base object with one or more partial overlays.
//! Nested objects merge recursively; arrays, primitives and nulls in an
//! overlay replace what the base had. On top of the core merge it offers
//! typed entry points over serde types, JSON/TOML documents and layered
//! defaults with provenance.

pub mod document;
pub mod layers;
pub mod typed;

pub use deep_combine_core::{
    combine, combine_owned, combine_pair, combine_values, CombineError, Kind, PlainObject, Policy,
    Value,
};
pub use document::DocumentError;
pub use layers::{LayerError, LayerSource, LayerStack, Resolved};
pub use typed::{combine_into, combine_widening, CombineExt, TypedError};
