//! Builders for nested records
#![allow(clippy::return_self_not_must_use)]

use crate::context::ValidationContext;
use crate::error::ValidationError;
use crate::validator::{Validatable, Validator};

/// Presence checks plus descent into a nested record
pub struct ValidatableValidator<'a> {
    context: ValidationContext,
    value: Option<&'a dyn Validatable>,
}

impl<'a> ValidatableValidator<'a> {
    pub fn new(context: ValidationContext, value: Option<&'a dyn Validatable>) -> Self {
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

    /// Run the record's own validation under this builder's path
    pub fn validate(self) -> Self {
        if let Some(value) = self.value {
            value.validate(&Validator::new(self.context.clone()));
        }
        self
    }
}

/// Checks over an array of nested records; elements validate at their index
pub struct ValidatableArrayValidator<'a, T> {
    context: ValidationContext,
    value: Option<&'a [T]>,
}

impl<'a, T: Validatable> ValidatableArrayValidator<'a, T> {
    pub fn new(context: ValidationContext, value: Option<&'a [T]>) -> Self {
        Self { context, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[T]>::len)
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

    pub fn validate_each(self) -> Self {
        if let Some(values) = self.value {
            for (index, value) in values.iter().enumerate() {
                value.validate(&Validator::new(self.context.child(index)));
            }
        }
        self
    }
}
