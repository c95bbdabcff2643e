//! Values resolution: loading, normalizing and deep-merging values files.
//!
//! Values files are JSON or YAML documents whose top level is a mapping. They
//! are read in command-line order and folded into a single [`ValueTree`]:
//!
//! ```text
//! values-a.yaml ─┐
//! values-b.json ─┼─ parse + normalize ─▶ deep merge (left to right) ─▶ ValueTree
//! values-c.yml  ─┘
//! ```
//!
//! # Merge Semantics
//!
//! - Mappings present on both sides are merged key by key, recursively
//! - Everything else (scalars, sequences, mapping-vs-scalar clashes) is replaced
//!   by the later file's value
//! - Keys present only in earlier files survive
//!
//! ```rust
//! use txtplate::values::resolve_documents;
//! use std::path::Path;
//!
//! let a = br#"{"db": {"host": "a", "port": 5432}}"#;
//! let b = b"db:\n  host: b\n";
//! let tree = resolve_documents([
//!     (Path::new("a.json"), &a[..]),
//!     (Path::new("b.yaml"), &b[..]),
//! ])?;
//!
//! assert_eq!(tree.pointer("/db/host").and_then(|v| v.as_str()), Some("b"));
//! assert_eq!(tree.pointer("/db/port").and_then(|v| v.as_u64()), Some(5432));
//! # Ok::<(), txtplate::core::TxtplateError>(())
//! ```
//!
//! # Key Normalization
//!
//! YAML allows any value as a mapping key. String keys are kept, numeric keys
//! are converted to their decimal form, and every other key kind is rejected
//! with [`TxtplateError::KeyNotString`](crate::core::TxtplateError::KeyNotString).

pub mod merge;
pub mod parser;
pub mod resolve;

pub use merge::{deep_merge, merge_document};
pub use parser::{normalize_yaml, parse_values};
pub use resolve::{ValuesFile, ValuesResolver, resolve_documents, resolve_values};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// A string-keyed mapping that preserves insertion order.
pub type Mapping = IndexMap<String, ValueTree>;

/// Format of a values file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuesFormat {
    /// `.yaml` and `.yml` files
    Yaml,
    /// Everything else
    Json,
}

impl ValuesFormat {
    /// Infer the format from a path's extension.
    ///
    /// Only the exact extensions `yaml` and `yml` select YAML; any other
    /// extension, or none at all, selects JSON.
    ///
    /// ```rust
    /// use txtplate::values::ValuesFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ValuesFormat::from_path(Path::new("values.yml")), ValuesFormat::Yaml);
    /// assert_eq!(ValuesFormat::from_path(Path::new("values")), ValuesFormat::Json);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

impl fmt::Display for ValuesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A numeric scalar, keeping the integer/float distinction of the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Non-negative integer
    PosInt(u64),
    /// Negative integer
    NegInt(i64),
    /// Floating point, including non-finite YAML values like `.inf`
    Float(f64),
}

impl Number {
    /// The value as `u64`, if it is a non-negative integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::PosInt(n) => Some(n),
            Self::NegInt(_) | Self::Float(_) => None,
        }
    }

    /// The value as `i64`, if it is an integer in range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::PosInt(n) => i64::try_from(n).ok(),
            Self::NegInt(n) => Some(n),
            Self::Float(_) => None,
        }
    }

    /// The value as `f64`. Always succeeds, possibly losing precision.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::PosInt(n) => n as f64,
            Self::NegInt(n) => n as f64,
            Self::Float(n) => n,
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Self::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Self::NegInt(i)
        } else {
            // serde_json numbers are always representable as f64 without arbitrary_precision
            Self::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<&serde_yaml::Number> for Number {
    fn from(n: &serde_yaml::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Self::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Self::NegInt(i)
        } else {
            Self::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PosInt(n) => write!(f, "{n}"),
            Self::NegInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::PosInt(n) => serializer.serialize_u64(n),
            Self::NegInt(n) => serializer.serialize_i64(n),
            Self::Float(n) => serializer.serialize_f64(n),
        }
    }
}

/// The normalized in-memory representation of a values document.
///
/// Every [`Mapping`] is string-keyed by construction, so a tree that exists is
/// already normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValueTree {
    /// `null`, `~`, or an empty YAML document
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer or float
    Number(Number),
    /// A string scalar
    String(String),
    /// An ordered list, replaced as a unit when merged
    Sequence(Vec<ValueTree>),
    /// A string-keyed mapping, merged key by key
    Mapping(Mapping),
}

impl Default for ValueTree {
    fn default() -> Self {
        Self::Mapping(Mapping::new())
    }
}

impl ValueTree {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[ValueTree]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a nested value with a JSON-pointer-like path (`/db/host`,
    /// `/servers/0/name`). The empty string returns `self`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&ValueTree> {
        if pointer.is_empty() {
            return Some(self);
        }
        let rest = pointer.strip_prefix('/')?;
        rest.split('/').try_fold(self, |node, token| match node {
            Self::Mapping(map) => map.get(token),
            Self::Sequence(items) => token.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl From<serde_json::Value> for ValueTree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(Number::from(&n)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
