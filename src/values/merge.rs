//! Deep merge of normalized value trees.
//!
//! Later values win at the leaves; mappings present on both sides are merged
//! recursively. Sequences are replaced as a unit, never concatenated.

use std::path::Path;

use super::{Mapping, ValueTree};
use crate::core::TxtplateError;

/// Merge one parsed values document into the accumulator.
///
/// A `Null` document (an empty YAML file) merges as an empty mapping.
///
/// # Errors
///
/// Returns [`TxtplateError::TypeMismatch`] if the document's root is a
/// sequence or a scalar.
pub fn merge_document(
    accumulator: &mut Mapping,
    document: ValueTree,
    path: &Path,
) -> Result<(), TxtplateError> {
    match document {
        ValueTree::Mapping(incoming) => {
            deep_merge(accumulator, incoming);
            Ok(())
        }
        ValueTree::Null => {
            tracing::debug!("Values file {} is empty, nothing to merge", path.display());
            Ok(())
        }
        other => Err(TxtplateError::TypeMismatch {
            path: path.to_path_buf(),
            found: other.kind(),
        }),
    }
}

/// Merge `incoming` into `accumulator` in place.
///
/// For each incoming key:
/// - absent from the accumulator: inserted
/// - mapping on both sides: merged recursively
/// - anything else: the incoming value replaces the existing one
///
/// Replaced keys keep their original position; new keys are appended.
///
/// ```rust
/// use txtplate::values::{deep_merge, ValueTree};
/// use serde_json::json;
///
/// let ValueTree::Mapping(mut acc) = ValueTree::from(json!({"x": {"nested": 1}, "y": 1})) else {
///     unreachable!()
/// };
/// let ValueTree::Mapping(incoming) = ValueTree::from(json!({"x": "scalar"})) else {
///     unreachable!()
/// };
///
/// deep_merge(&mut acc, incoming);
/// assert_eq!(acc["x"], ValueTree::String("scalar".into()));
/// ```
pub fn deep_merge(accumulator: &mut Mapping, incoming: Mapping) {
    for (key, value) in incoming {
        match accumulator.get_mut(&key) {
            Some(slot) => merge_value(slot, value),
            None => {
                accumulator.insert(key, value);
            }
        }
    }
}

fn merge_value(slot: &mut ValueTree, incoming: ValueTree) {
    match (slot, incoming) {
        (ValueTree::Mapping(existing), ValueTree::Mapping(nested)) => deep_merge(existing, nested),
        (slot, replacement) => *slot = replacement,
    }
}
