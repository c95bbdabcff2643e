//! Folding an ordered list of values files into one tree.
//!
//! Resolution is strictly sequential: each file is read, parsed and merged
//! before the next one is touched, and the first error aborts the fold.

use std::path::{Path, PathBuf};

use super::{Mapping, ValueTree, ValuesFormat, merge_document, parse_values};
use crate::core::TxtplateError;
use crate::utils::fs::read_bytes;

/// A values file on disk together with its inferred format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesFile {
    pub path: PathBuf,
    pub format: ValuesFormat,
}

impl ValuesFile {
    /// Create a values file, inferring the format from the extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = ValuesFormat::from_path(&path);
        Self {
            path,
            format,
        }
    }

    /// Read and parse the file.
    ///
    /// # Errors
    ///
    /// Returns [`TxtplateError::FileSystemError`] if the file cannot be read,
    /// or any error from [`parse_values`].
    pub fn load(&self) -> Result<ValueTree, TxtplateError> {
        let bytes = read_bytes(&self.path, "read values file")?;
        parse_values(&bytes, self.format, &self.path)
    }
}

/// The merge accumulator for one resolution run.
///
/// Starts as an empty mapping and absorbs documents in the order they are
/// given. [`finish`](Self::finish) yields the resolved tree.
#[derive(Debug, Default)]
pub struct ValuesResolver {
    accumulator: Mapping,
    merged: usize,
}

impl ValuesResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents merged so far.
    #[must_use]
    pub fn merged(&self) -> usize {
        self.merged
    }

    /// Parse `bytes` as a values document of `path` and merge it.
    ///
    /// # Errors
    ///
    /// Any parse error, or [`TxtplateError::TypeMismatch`] for a non-mapping root.
    pub fn merge_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<(), TxtplateError> {
        let format = ValuesFormat::from_path(path);
        let document = parse_values(bytes, format, path)?;
        self.merge_tree(path, document)
    }

    /// Read, parse and merge a values file.
    ///
    /// # Errors
    ///
    /// Any read or parse error, or [`TxtplateError::TypeMismatch`].
    pub fn merge_file(&mut self, file: &ValuesFile) -> Result<(), TxtplateError> {
        let document = file.load()?;
        self.merge_tree(&file.path, document)
    }

    fn merge_tree(&mut self, path: &Path, document: ValueTree) -> Result<(), TxtplateError> {
        let top_level_keys = document.as_mapping().map_or(0, Mapping::len);
        merge_document(&mut self.accumulator, document, path)?;
        self.merged += 1;
        tracing::debug!(
            "Merged values file {} ({} top-level keys, {} merged so far)",
            path.display(),
            top_level_keys,
            self.merged
        );
        Ok(())
    }

    /// Consume the resolver and return the resolved tree.
    #[must_use]
    pub fn finish(self) -> ValueTree {
        ValueTree::Mapping(self.accumulator)
    }
}

/// Resolve values files from disk, in order.
///
/// # Errors
///
/// - [`TxtplateError::NoValuesFiles`] if `paths` is empty
/// - the first read, parse or merge error encountered
pub fn resolve_values<P: AsRef<Path>>(paths: &[P]) -> Result<ValueTree, TxtplateError> {
    if paths.is_empty() {
        return Err(TxtplateError::NoValuesFiles);
    }

    let mut resolver = ValuesResolver::new();
    for path in paths {
        let file = ValuesFile::new(path.as_ref());
        tracing::debug!("Loading values file {} as {}", file.path.display(), file.format);
        resolver.merge_file(&file)?;
    }
    Ok(resolver.finish())
}

/// Resolve already-loaded documents, in order.
///
/// Each item is a `(path, bytes)` pair; the path selects the format and labels
/// errors.
///
/// # Errors
///
/// - [`TxtplateError::NoValuesFiles`] if `documents` is empty
/// - the first parse or merge error encountered
pub fn resolve_documents<'a, I>(documents: I) -> Result<ValueTree, TxtplateError>
where
    I: IntoIterator<Item = (&'a Path, &'a [u8])>,
{
    let mut resolver = ValuesResolver::new();
    for (path, bytes) in documents {
        resolver.merge_bytes(path, bytes)?;
    }
    if resolver.merged() == 0 {
        return Err(TxtplateError::NoValuesFiles);
    }
    Ok(resolver.finish())
}
