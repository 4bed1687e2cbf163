//! Traversal and cursor APIs for navigating the value tree

use tracing::trace;

use crate::path::{Path, PathSegment};
use crate::value::Value;
use crate::{Error, Result};

/// A cursor for navigating the value tree
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// Current value
    value: &'a Value,

    /// Path to current value (for error reporting)
    path: Path,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the given value
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            path: Path::root(),
        }
    }

    /// Get the current value
    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Get the current path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Navigate to an object member by key
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the current value is not an object or
    /// has no such key.
    pub fn child(&self, key: &str) -> Result<Cursor<'a>> {
        let path = self.path.child(key);
        match self.value.get(key) {
            Some(value) => Ok(Cursor { value, path }),
            None => Err(Error::not_found(path.pointer())),
        }
    }

    /// Navigate to an array element by index
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the current value is not an array or
    /// the index is out of bounds.
    pub fn child_at(&self, index: usize) -> Result<Cursor<'a>> {
        let path = self.path.child(index);
        match self.value.as_array().and_then(|a| a.get(index)) {
            Some(value) => Ok(Cursor { value, path }),
            None => Err(Error::not_found(path.pointer())),
        }
    }

    /// Navigate using a JSON pointer relative to the current value
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPointer`] for a malformed pointer and
    /// [`Error::NotFound`] when any step does not resolve.
    pub fn navigate(&self, pointer: &str) -> Result<Cursor<'a>> {
        let target = Path::parse_pointer(pointer)?;
        let mut cursor = self.clone();

        for segment in target.segments() {
            cursor = match (segment, cursor.value) {
                (PathSegment::Index(index), Value::Array(_)) => cursor.child_at(*index)?,
                (PathSegment::Index(index), _) => cursor.child(&index.to_string())?,
                (PathSegment::Key(key), _) => cursor.child(key)?,
            };
        }

        trace!(pointer = %cursor.path, kind = cursor.value.kind(), "navigated");
        Ok(cursor)
    }
}
