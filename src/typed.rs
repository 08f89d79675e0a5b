//! Typed entry points over serde types.
//!
//! Both forms run the same merge. They differ only in what they promise about
//! the result type:
//! - [`combine_into`] is strict: overlays are partial views of `T` and the
//!   result is read back as `T`.
//! - [`combine_widening`] lets overlays add keys `T` does not declare; the
//!   caller names the widened result type `R`.

use deep_combine_core::{combine, CombineError, Kind, PlainObject, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors from the typed entry points
#[derive(Debug, thiserror::Error)]
pub enum TypedError {
    #[error("failed to serialize input: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Position 0 is the base, 1.. are overlays.
    #[error("input at position {position} does not serialize to an object (found {kind})")]
    NotAnObject { position: usize, kind: Kind },

    #[error("combined object does not fit the result type: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error(transparent)]
    Combine(#[from] CombineError),
}

/// Combine partial overlays onto a typed base, producing the same type.
pub fn combine_into<T>(base: &T, overlays: &[PlainObject]) -> Result<T, TypedError>
where
    T: Serialize + DeserializeOwned,
{
    let base = to_object(base, 0)?;
    let combined = combine(&base, overlays)?;
    from_object(combined)
}

/// Combine overlays that may widen the base's key set into a caller-chosen result type.
pub fn combine_widening<T, O, R>(base: &T, overlays: &[O]) -> Result<R, TypedError>
where
    T: Serialize,
    O: Serialize,
    R: DeserializeOwned,
{
    let base = to_object(base, 0)?;
    let layers = overlays
        .iter()
        .enumerate()
        .map(|(i, overlay)| to_object(overlay, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let combined = combine(&base, &layers)?;
    from_object(combined)
}

/// Method form of [`combine_into`].
pub trait CombineExt: Serialize + DeserializeOwned {
    /// Combine partial overlays onto `self`.
    fn combined_with(&self, overlays: &[PlainObject]) -> Result<Self, TypedError> {
        combine_into(self, overlays)
    }
}

impl<T: Serialize + DeserializeOwned> CombineExt for T {}

fn to_object<T: Serialize + ?Sized>(value: &T, position: usize) -> Result<PlainObject, TypedError> {
    let json = serde_json::to_value(value).map_err(TypedError::Serialize)?;
    match Value::from(json) {
        Value::Object(map) => Ok(map),
        other => Err(TypedError::NotAnObject {
            position,
            kind: other.kind(),
        }),
    }
}

fn from_object<R: DeserializeOwned>(map: PlainObject) -> Result<R, TypedError> {
    let json = serde_json::Value::Object(map.into());
    serde_json::from_value(json).map_err(TypedError::Deserialize)
}
