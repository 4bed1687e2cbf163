//! Normalize phase
//!
//! Normalization is the only phase allowed to mutate a record. It runs after a
//! clean validation and must be idempotent.

use datum_ir::PathSegment;
use datum_validation::{ValidationContext, ValidationError};

/// A record that can bring itself into canonical form
pub trait Normalizable {
    fn normalize(&mut self, normalizer: &Normalizer);
}

/// Path-tracking handle passed through normalization
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    context: ValidationContext,
}

impl Normalizer {
    #[must_use]
    pub fn new(context: ValidationContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    #[must_use]
    pub fn with_reference(&self, reference: impl Into<PathSegment>) -> Self {
        Self::new(self.context.child(reference))
    }

    #[must_use]
    pub fn with_meta(&self, meta: serde_json::Value) -> Self {
        Self::new(self.context.with_meta(meta))
    }

    pub fn report_error(&self, error: ValidationError) {
        self.context.report_error(error);
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.context.has_error()
    }
}
