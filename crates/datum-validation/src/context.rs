//! Path-tracking validation context
//!
//! A [`ValidationContext`] is a cursor: it carries the path of the value being
//! checked, optional metadata, and a handle to an error/warning sink shared by
//! every context derived from it. Deriving a child or attaching metadata never
//! touches the parent; all derived cursors accumulate into the same sink in
//! traversal order.
//!
//! The sink is single-threaded. Give every top-level parse/validate/normalize
//! call its own root context and merge the resulting [`ValidationResult`]s
//! afterwards when working on batches.

use std::cell::RefCell;
use std::rc::Rc;

use datum_ir::{Path, PathSegment};
use tracing::trace;

use crate::error::ValidationError;
use crate::result::{ValidationErrors, ValidationResult};

/// Cursor into a record under validation
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    path: Path,
    meta: Option<Rc<serde_json::Value>>,
    sink: Rc<RefCell<ValidationResult>>,
}

impl ValidationContext {
    /// Create a root context with an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a cursor one segment deeper, sharing the sink
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        Self {
            path: self.path.child(segment),
            meta: self.meta.clone(),
            sink: Rc::clone(&self.sink),
        }
    }

    /// Derive a cursor carrying `meta`, sharing the sink
    #[must_use]
    pub fn with_meta(&self, meta: serde_json::Value) -> Self {
        Self {
            path: self.path.clone(),
            meta: Some(Rc::new(meta)),
            sink: Rc::clone(&self.sink),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn meta(&self) -> Option<&serde_json::Value> {
        self.meta.as_deref()
    }

    /// Record an error at this cursor's path; never halts the caller
    pub fn report_error(&self, error: ValidationError) {
        let error = self.locate(error);
        trace!(pointer = %error.path, code = %error.code, "validation error");
        self.sink.borrow_mut().add_error(error);
    }

    /// Record a warning at this cursor's path
    pub fn report_warning(&self, warning: ValidationError) {
        let warning = self.locate(warning);
        trace!(pointer = %warning.path, code = %warning.code, "validation warning");
        self.sink.borrow_mut().add_warning(warning);
    }

    /// Whether any error has been reported through this sink
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.sink.borrow().has_errors()
    }

    #[must_use]
    pub fn has_warning(&self) -> bool {
        self.sink.borrow().has_warnings()
    }

    /// Aggregated errors, or `None` when the sink is clean
    #[must_use]
    pub fn error(&self) -> Option<ValidationErrors> {
        let sink = self.sink.borrow();
        if sink.has_errors() {
            Some(ValidationErrors::new(sink.errors.clone()))
        } else {
            None
        }
    }

    /// Snapshot of everything reported so far
    #[must_use]
    pub fn result(&self) -> ValidationResult {
        self.sink.borrow().clone()
    }

    fn locate(&self, mut error: ValidationError) -> ValidationError {
        error.path = self.path.clone();
        error.meta = self.meta.as_deref().cloned();
        error
    }
}
