#![allow(clippy::return_self_not_must_use)]

use crate::context::ValidationContext;
use crate::error::{ValidationError, format_list};

/// Fluent checks over an optional `f64`
#[derive(Debug, Clone)]
pub struct FloatValidator {
    context: ValidationContext,
    value: Option<f64>,
}

impl FloatValidator {
    pub fn new(context: ValidationContext, value: Option<f64>) -> Self {
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

    #[allow(clippy::float_cmp)]
    pub fn equal_to(self, limit: f64) -> Self {
        if let Some(value) = self.value {
            if value != limit {
                self.context
                    .report_error(ValidationError::not_equal_to(value, limit));
            }
        }
        self
    }

    #[allow(clippy::float_cmp)]
    pub fn not_equal_to(self, limit: f64) -> Self {
        if let Some(value) = self.value {
            if value == limit {
                self.context.report_error(ValidationError::equal_to(value, limit));
            }
        }
        self
    }

    pub fn less_than(self, limit: f64) -> Self {
        if let Some(value) = self.value {
            if value >= limit {
                self.context
                    .report_error(ValidationError::not_less_than(value, limit));
            }
        }
        self
    }

    pub fn less_than_or_equal_to(self, limit: f64) -> Self {
        if let Some(value) = self.value {
            if value > limit {
                self.context
                    .report_error(ValidationError::not_less_than_or_equal_to(value, limit));
            }
        }
        self
    }

    pub fn greater_than(self, limit: f64) -> Self {
        if let Some(value) = self.value {
            if value <= limit {
                self.context
                    .report_error(ValidationError::not_greater_than(value, limit));
            }
        }
        self
    }

    pub fn greater_than_or_equal_to(self, limit: f64) -> Self {
        if let Some(value) = self.value {
            if value < limit {
                self.context
                    .report_error(ValidationError::not_greater_than_or_equal_to(value, limit));
            }
        }
        self
    }

    /// Inclusive range; NaN is never in range
    pub fn in_range(self, lower: f64, upper: f64) -> Self {
        if let Some(value) = self.value {
            if !(lower..=upper).contains(&value) {
                self.context
                    .report_error(ValidationError::not_in_range(value, lower, upper));
            }
        }
        self
    }

    #[allow(clippy::float_cmp)]
    pub fn one_of(self, allowed: &[f64]) -> Self {
        if let Some(value) = self.value {
            if !allowed.iter().any(|a| *a == value) {
                self.context
                    .report_error(ValidationError::not_one_of(value, format_list(allowed)));
            }
        }
        self
    }

    #[allow(clippy::float_cmp)]
    pub fn not_one_of(self, disallowed: &[f64]) -> Self {
        if let Some(value) = self.value {
            if disallowed.iter().any(|d| *d == value) {
                self.context
                    .report_error(ValidationError::one_of(value, format_list(disallowed)));
            }
        }
        self
    }

    pub fn using(self, check: impl FnOnce(f64, &ValidationContext)) -> Self {
        if let Some(value) = self.value {
            check(value, &self.context);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::validator::test_support::{details, reported};

    #[test]
    fn test_in_range() {
        let context = ValidationContext::new();
        FloatValidator::new(context.child("normal"), Some(250.1)).exists().in_range(0.0, 100.0);
        FloatValidator::new(context.child("normal"), Some(100.0)).in_range(0.0, 100.0);

        assert_eq!(reported(&context), vec![("/normal".to_string(), ErrorCode::OutOfRange)]);
        assert_eq!(details(&context), vec!["value 250.1 is not between 0 and 100"]);
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let context = ValidationContext::new();
        FloatValidator::new(context.clone(), Some(f64::NAN)).in_range(0.0, 1.0);
        assert!(context.has_error());
    }

    #[test]
    fn test_absent_value() {
        let context = ValidationContext::new();
        FloatValidator::new(context.child("rate"), None)
            .in_range(0.0, 1.0)
            .one_of(&[1.0])
            .greater_than(3.0);
        assert!(!context.has_error());

        FloatValidator::new(context.child("rate"), None).exists();
        assert_eq!(reported(&context), vec![("/rate".to_string(), ErrorCode::NotExists)]);
    }

    #[test]
    fn test_comparisons_and_sets() {
        let context = ValidationContext::new();
        FloatValidator::new(context.clone(), Some(1.5))
            .less_than(1.5)
            .greater_than_or_equal_to(2.0)
            .one_of(&[0.5, 2.5])
            .not_one_of(&[1.5]);

        assert_eq!(
            details(&context),
            vec![
                "value 1.5 is not less than 1.5",
                "value 1.5 is not greater than or equal to 2",
                "value 1.5 is not one of [0.5, 2.5]",
                "value 1.5 is one of [1.5]",
            ]
        );
    }
}
