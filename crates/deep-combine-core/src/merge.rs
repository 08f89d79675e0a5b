//! Deep merge of plain objects
//!
//! Merge semantics, per overlay key:
//! - Base value missing, null or undefined: overlay value is assigned verbatim
//! - Overlay value null, undefined, primitive or array: overlay wins
//! - Overlay value an object: descend and merge recursively
//!
//! Keys only present in the base are carried over untouched.

use tracing::{debug, trace};

use crate::error::CombineError;
use crate::value::{Kind, PlainObject, Value};

/// What happens to a single overlay key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Base value is missing or nullish; take the overlay value as-is.
    Assign,
    /// Overlay value is not an object; it replaces the base value.
    Replace,
    /// Both sides carry data and the overlay is an object; merge recursively.
    Descend,
}

impl Policy {
    /// Decide the policy for one key from the base value (if any) and the overlay value.
    pub fn decide(base: Option<&Value>, overlay: &Value) -> Self {
        match base {
            None => Policy::Assign,
            Some(b) if b.is_nullish() => Policy::Assign,
            Some(_) => match overlay.kind() {
                Kind::Object => Policy::Descend,
                Kind::Undefined | Kind::Null | Kind::Primitive | Kind::Array => Policy::Replace,
            },
        }
    }
}

/// Apply a single overlay onto a base.
///
/// Returns a new object; neither input is touched.
pub fn combine_pair(base: &PlainObject, overlay: &PlainObject) -> PlainObject {
    let mut result = base.clone();

    for (key, new_value) in overlay {
        let base_value = base.get(key);
        let policy = Policy::decide(base_value, new_value);
        trace!(key = %key, ?policy, "combine key");

        let merged = match (policy, base_value, new_value) {
            (Policy::Descend, Some(Value::Object(nested)), Value::Object(layer)) => {
                Value::Object(combine_pair(nested, layer))
            }
            // A non-object base has no keys to keep.
            (Policy::Descend, _, Value::Object(layer)) => {
                Value::Object(combine_pair(&PlainObject::new(), layer))
            }
            _ => new_value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    result
}

/// Fold overlays onto a base, left to right.
///
/// Later overlays win. An empty overlay sequence is rejected.
pub fn combine<'a, I>(base: &PlainObject, overlays: I) -> Result<PlainObject, CombineError>
where
    I: IntoIterator<Item = &'a PlainObject>,
{
    let mut overlays = overlays.into_iter();
    let first = overlays.next().ok_or(CombineError::NoOverlays)?;

    let mut count = 1usize;
    let mut acc = combine_pair(base, first);
    for overlay in overlays {
        acc = combine_pair(&acc, overlay);
        count += 1;
    }

    debug!(overlays = count, keys = acc.len(), "combined objects");
    Ok(acc)
}

/// Like [`combine`], but consumes its inputs and moves values instead of cloning them.
pub fn combine_owned<I>(base: PlainObject, overlays: I) -> Result<PlainObject, CombineError>
where
    I: IntoIterator<Item = PlainObject>,
{
    let mut overlays = overlays.into_iter().peekable();
    if overlays.peek().is_none() {
        return Err(CombineError::NoOverlays);
    }

    let mut count = 0usize;
    let acc = overlays.fold(base, |acc, overlay| {
        count += 1;
        absorb(acc, overlay)
    });

    debug!(overlays = count, keys = acc.len(), "combined objects");
    Ok(acc)
}

/// Owning single step: same policies as [`combine_pair`].
fn absorb(mut base: PlainObject, overlay: PlainObject) -> PlainObject {
    for (key, new_value) in overlay {
        let policy = Policy::decide(base.get(&key), &new_value);
        trace!(key = %key, ?policy, "combine key");

        let merged = match (policy, new_value) {
            // Take the nested base in place so the key keeps its position.
            (Policy::Descend, Value::Object(layer)) => {
                match base.get_mut(&key).map(std::mem::take) {
                    Some(Value::Object(nested)) => Value::Object(absorb(nested, layer)),
                    _ => Value::Object(absorb(PlainObject::new(), layer)),
                }
            }
            (_, new_value) => new_value,
        };
        base.insert(key, merged);
    }
    base
}

/// Combine dynamically typed values.
///
/// The base and every overlay must be objects; the first one that is not is
/// reported with its position (0 for the base).
pub fn combine_values(base: &Value, overlays: &[Value]) -> Result<Value, CombineError> {
    let base_map = expect_object(base, 0)?;
    let layers = overlays
        .iter()
        .enumerate()
        .map(|(i, overlay)| expect_object(overlay, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    combine(base_map, layers).map(Value::Object)
}

fn expect_object(value: &Value, position: usize) -> Result<&PlainObject, CombineError> {
    value.as_object().ok_or(CombineError::NotAnObject {
        position,
        kind: value.kind(),
    })
}

/// Combine a base with one or more overlays.
///
/// At least one overlay is required, so this form cannot fail.
///
/// ```
/// use deep_combine_core::{combine, PlainObject};
///
/// let base: PlainObject = [("a", 1)].into_iter().collect();
/// let first: PlainObject = [("b", 3), ("c", 3)].into_iter().collect();
/// let second: PlainObject = [("b", 2), ("d", 4)].into_iter().collect();
///
/// let result = combine!(&base, &first, &second);
/// assert_eq!(result["b"].as_i64(), Some(2));
/// assert_eq!(result.len(), 4);
/// ```
#[macro_export]
macro_rules! combine {
    ($base:expr, $first:expr $(, $rest:expr)* $(,)?) => {{
        let acc = $crate::combine_pair($base, $first);
        $( let acc = $crate::combine_pair(&acc, $rest); )*
        acc
    }};
}
