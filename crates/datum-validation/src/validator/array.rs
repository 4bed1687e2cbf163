#![allow(clippy::return_self_not_must_use)]

use datum_ir::Value;

use crate::context::ValidationContext;
use crate::error::ValidationError;

/// Checks over an optional raw array
#[derive(Debug, Clone)]
pub struct ArrayValidator<'a> {
    context: ValidationContext,
    value: Option<&'a [Value]>,
}

impl<'a> ArrayValidator<'a> {
    pub fn new(context: ValidationContext, value: Option<&'a [Value]>) -> Self {
        Self { context, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[Value]>::len)
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

    length_checks!();

    pub fn using(self, check: impl FnOnce(&[Value], &ValidationContext)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.context);
        }
        self
    }
}
