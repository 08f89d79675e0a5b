//! Deep merge ("combine") for plain data objects.
//!
//! A base object is combined with one or more overlays. Overlay values
//! override base values; nested objects merge recursively, arrays and
//! primitives replace, and a missing or nullish base value always takes the
//! overlay value verbatim. Inputs are never modified.

mod convert;
mod error;
mod merge;
mod value;

pub use error::CombineError;
pub use merge::{combine, combine_owned, combine_pair, combine_values, Policy};
pub use value::{Kind, PlainObject, Value};
