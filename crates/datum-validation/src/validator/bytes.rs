#![allow(clippy::return_self_not_must_use)]

use crate::context::ValidationContext;
use crate::error::ValidationError;

#[derive(Debug, Clone)]
pub struct BytesValidator<'a> {
    context: ValidationContext,
    value: Option<&'a [u8]>,
}

impl<'a> BytesValidator<'a> {
    pub fn new(context: ValidationContext, value: Option<&'a [u8]>) -> Self {
        Self { context, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[u8]>::len)
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

    pub fn using(self, check: impl FnOnce(&[u8], &ValidationContext)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.context);
        }
        self
    }
}
