//! Decoding values files into normalized [`ValueTree`]s.
//!
//! JSON decodes straight into string-keyed objects. YAML mappings may carry
//! keys of any type at any depth, so YAML goes through [`normalize_yaml`],
//! a pure recursive rewrite into string-keyed mappings.

use serde::Deserialize;
use std::path::Path;

use super::{Mapping, Number, ValueTree, ValuesFormat};
use crate::core::TxtplateError;

/// Parse the bytes of one values file.
///
/// `path` is only used to label errors; no I/O happens here.
///
/// # Errors
///
/// - [`TxtplateError::Decode`] if the bytes are not valid in `format`
/// - [`TxtplateError::KeyNotString`] if a YAML key cannot be normalized
pub fn parse_values(
    bytes: &[u8],
    format: ValuesFormat,
    path: &Path,
) -> Result<ValueTree, TxtplateError> {
    let decode_error = |reason: String| TxtplateError::Decode {
        path: path.to_path_buf(),
        format,
        reason,
    };

    match format {
        ValuesFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_slice(bytes).map_err(|e| decode_error(e.to_string()))?;
            Ok(ValueTree::from(value))
        }
        ValuesFormat::Yaml => {
            let mut documents = serde_yaml::Deserializer::from_slice(bytes);
            let Some(document) = documents.next() else {
                // Empty file or comments only
                return Ok(ValueTree::Null);
            };
            let mut value =
                serde_yaml::Value::deserialize(document).map_err(|e| decode_error(e.to_string()))?;
            if documents.next().is_some() {
                return Err(decode_error("more than one YAML document in a values file".to_string()));
            }
            // Resolve `<<: *anchor` merge keys; keys written locally win
            value.apply_merge().map_err(|e| decode_error(e.to_string()))?;
            normalize_yaml(value, path)
        }
    }
}

/// Rewrite a decoded YAML value so that every mapping is string-keyed.
///
/// Tags on values are dropped and the tagged value is normalized in its place.
///
/// # Errors
///
/// - [`TxtplateError::KeyNotString`] for the first key that is not a string
///   or a number
/// - [`TxtplateError::Decode`] if two keys of one mapping share a string form
pub fn normalize_yaml(value: serde_yaml::Value, path: &Path) -> Result<ValueTree, TxtplateError> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => ValueTree::Null,
        Value::Bool(b) => ValueTree::Bool(b),
        Value::Number(n) => ValueTree::Number(Number::from(&n)),
        Value::String(s) => ValueTree::String(s),
        Value::Sequence(items) => ValueTree::Sequence(
            items.into_iter().map(|item| normalize_yaml(item, path)).collect::<Result<_, _>>()?,
        ),
        Value::Mapping(map) => {
            let mut normalized = Mapping::with_capacity(map.len());
            for (key, value) in map {
                let key = normalize_key(key, path)?;
                if normalized.contains_key(&key) {
                    // e.g. `1:` and `"1":` in the same mapping
                    return Err(TxtplateError::Decode {
                        path: path.to_path_buf(),
                        format: ValuesFormat::Yaml,
                        reason: format!("duplicate key \"{key}\" after converting number keys to strings"),
                    });
                }
                let value = normalize_yaml(value, path)?;
                normalized.insert(key, value);
            }
            ValueTree::Mapping(normalized)
        }
        Value::Tagged(tagged) => {
            tracing::trace!("Dropping YAML tag {} in {}", tagged.tag, path.display());
            normalize_yaml(tagged.value, path)?
        }
    })
}

/// Convert a YAML key into its string form.
fn normalize_key(key: serde_yaml::Value, path: &Path) -> Result<String, TxtplateError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(TxtplateError::KeyNotString {
            path: path.to_path_buf(),
            key: describe_key(&other),
        }),
    }
}

fn describe_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => format!("boolean {b}"),
        serde_yaml::Value::Sequence(_) => "a sequence".to_string(),
        serde_yaml::Value::Mapping(_) => "a mapping".to_string(),
        serde_yaml::Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
        other => format!("{other:?}"),
    }
}
