//! Layered defaults
//!
//! A base object (typically built-in defaults) is combined with named layers
//! in precedence order, lowest first. Each layer records where it came from,
//! and the resolved object can report which layer set a given key path.

mod resolved;
mod stack;

pub use resolved::Resolved;
pub use stack::{LayerError, LayerSource, LayerStack};
