#![allow(clippy::return_self_not_must_use)]

use crate::context::ValidationContext;
use crate::error::ValidationError;

/// Fluent checks over an optional `bool`
#[derive(Debug, Clone)]
pub struct BoolValidator {
    context: ValidationContext,
    value: Option<bool>,
}

impl BoolValidator {
    pub fn new(context: ValidationContext, value: Option<bool>) -> Self {
        Self { context, value }
    }

    pub fn exists(self) -> Self {
        if self.value.is_none() {
            self.context.report_error(ValidationError::not_exists());
        }
        self
    }

    pub fn not_exists(self) -> Self {
        if self.value.is_some() {
            self.context.report_error(ValidationError::exists());
        }
        self
    }

    pub fn is_true(self) -> Self {
        if self.value == Some(false) {
            self.context
                .report_error(ValidationError::not_one_of(false, "[true]"));
        }
        self
    }

    pub fn is_false(self) -> Self {
        if self.value == Some(true) {
            self.context
                .report_error(ValidationError::not_one_of(true, "[false]"));
        }
        self
    }

    pub fn using(self, check: impl FnOnce(bool, &ValidationContext)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.context);
        }
        self
    }
}
