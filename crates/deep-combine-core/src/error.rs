//! Errors raised by the combine entry points.

use crate::value::Kind;

/// Combine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CombineError {
    /// At least one overlay is required.
    #[error("combine requires at least one overlay")]
    NoOverlays,

    /// An input that must be an object was something else.
    /// Position 0 is the base, 1.. are overlays.
    #[error("input at position {position} is not an object (found {kind})")]
    NotAnObject { position: usize, kind: Kind },
}
