//! Typed assertion builders
//!
//! A [`Validator`] hands out one builder per primitive shape. Each builder
//! holds an `Option` of the value plus a child context, and every predicate
//! is a no-op when the value is absent. Presence is only ever checked by
//! `exists()` / `not_exists()`, so `validator.int("duration", d).exists()
//! .in_range(0, 86_400_000)` reports exactly one error for a missing value.

/// Emptiness and length predicates shared by every sized builder.
///
/// The implementing type needs a `context` field and a
/// `fn length(&self) -> Option<usize>` method.
macro_rules! length_checks {
    () => {
        pub fn empty(self) -> Self {
            if matches!(self.length(), Some(length) if length > 0) {
                self.context.report_error(ValidationError::not_empty());
            }
            self
        }

        pub fn not_empty(self) -> Self {
            if self.length() == Some(0) {
                self.context.report_error(ValidationError::empty());
            }
            self
        }

        pub fn length_equal_to(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length != limit {
                    self.context
                        .report_error(ValidationError::length_not_equal_to(length, limit));
                }
            }
            self
        }

        pub fn length_less_than(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length >= limit {
                    self.context
                        .report_error(ValidationError::length_not_less_than(length, limit));
                }
            }
            self
        }

        pub fn length_less_than_or_equal_to(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length > limit {
                    self.context.report_error(
                        ValidationError::length_not_less_than_or_equal_to(length, limit),
                    );
                }
            }
            self
        }

        pub fn length_greater_than(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length <= limit {
                    self.context
                        .report_error(ValidationError::length_not_greater_than(length, limit));
                }
            }
            self
        }

        pub fn length_greater_than_or_equal_to(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length < limit {
                    self.context.report_error(
                        ValidationError::length_not_greater_than_or_equal_to(length, limit),
                    );
                }
            }
            self
        }

        pub fn length_in_range(self, lower: usize, upper: usize) -> Self {
            if let Some(length) = self.length() {
                if length < lower || length > upper {
                    self.context
                        .report_error(ValidationError::length_not_in_range(length, lower, upper));
                }
            }
            self
        }
    };
}

mod array;
mod boolean;
mod bytes;
mod duration;
mod float;
mod int;
mod object;
mod string;
mod string_array;
mod time;
mod validatable;

pub use self::array::ArrayValidator;
pub use self::boolean::BoolValidator;
pub use self::bytes::BytesValidator;
pub use self::duration::DurationValidator;
pub use self::float::FloatValidator;
pub use self::int::IntValidator;
pub use self::object::ObjectValidator;
pub use self::string::StringValidator;
pub use self::string_array::StringArrayValidator;
pub use self::time::TimeValidator;
pub use self::validatable::{ValidatableArrayValidator, ValidatableValidator};

use chrono::{DateTime, TimeDelta, Utc};
use datum_ir::{Object, PathSegment, Value};

use crate::context::ValidationContext;
use crate::error::ValidationError;

/// A record that can check itself without mutation
pub trait Validatable {
    fn validate(&self, validator: &Validator);
}

/// Entry point for validating a record's fields
#[derive(Debug, Clone, Default)]
pub struct Validator {
    context: ValidationContext,
}

impl Validator {
    #[must_use]
    pub fn new(context: ValidationContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Validator one segment deeper
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

    pub fn report_warning(&self, warning: ValidationError) {
        self.context.report_warning(warning);
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.context.has_error()
    }

    pub fn bool(&self, reference: impl Into<PathSegment>, value: Option<bool>) -> BoolValidator {
        BoolValidator::new(self.context.child(reference), value)
    }

    pub fn int(&self, reference: impl Into<PathSegment>, value: Option<i64>) -> IntValidator {
        IntValidator::new(self.context.child(reference), value)
    }

    pub fn float(&self, reference: impl Into<PathSegment>, value: Option<f64>) -> FloatValidator {
        FloatValidator::new(self.context.child(reference), value)
    }

    pub fn string<'a>(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<&'a str>,
    ) -> StringValidator<'a> {
        StringValidator::new(self.context.child(reference), value)
    }

    pub fn string_array<'a>(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<&'a [String]>,
    ) -> StringArrayValidator<'a> {
        StringArrayValidator::new(self.context.child(reference), value)
    }

    pub fn bytes<'a>(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<&'a [u8]>,
    ) -> BytesValidator<'a> {
        BytesValidator::new(self.context.child(reference), value)
    }

    pub fn duration(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<TimeDelta>,
    ) -> DurationValidator {
        DurationValidator::new(self.context.child(reference), value)
    }

    pub fn time(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<DateTime<Utc>>,
    ) -> TimeValidator {
        TimeValidator::new(self.context.child(reference), value)
    }

    pub fn object<'a>(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<&'a Object>,
    ) -> ObjectValidator<'a> {
        ObjectValidator::new(self.context.child(reference), value)
    }

    pub fn array<'a>(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<&'a [Value]>,
    ) -> ArrayValidator<'a> {
        ArrayValidator::new(self.context.child(reference), value)
    }

    /// Builder for a nested record
    pub fn validating<'a>(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<&'a dyn Validatable>,
    ) -> ValidatableValidator<'a> {
        ValidatableValidator::new(self.context.child(reference), value)
    }

    /// Builder for an array of nested records
    pub fn validating_array<'a, T: Validatable>(
        &self,
        reference: impl Into<PathSegment>,
        value: Option<&'a [T]>,
    ) -> ValidatableArrayValidator<'a, T> {
        ValidatableArrayValidator::new(self.context.child(reference), value)
    }
}
