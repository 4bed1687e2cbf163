//! Integer assertions
#![allow(clippy::return_self_not_must_use)]

use crate::context::ValidationContext;
use crate::error::{ValidationError, format_list};

/// Fluent checks over an optional `i64`
#[derive(Debug, Clone)]
pub struct IntValidator {
    context: ValidationContext,
    value: Option<i64>,
}

impl IntValidator {
    pub fn new(context: ValidationContext, value: Option<i64>) -> Self {
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

    pub fn equal_to(self, limit: i64) -> Self {
        if let Some(value) = self.value {
            if value != limit {
                self.context
                    .report_error(ValidationError::not_equal_to(value, limit));
            }
        }
        self
    }

    pub fn not_equal_to(self, limit: i64) -> Self {
        if let Some(value) = self.value {
            if value == limit {
                self.context.report_error(ValidationError::equal_to(value, limit));
            }
        }
        self
    }

    pub fn less_than(self, limit: i64) -> Self {
        if let Some(value) = self.value {
            if value >= limit {
                self.context
                    .report_error(ValidationError::not_less_than(value, limit));
            }
        }
        self
    }

    pub fn less_than_or_equal_to(self, limit: i64) -> Self {
        if let Some(value) = self.value {
            if value > limit {
                self.context
                    .report_error(ValidationError::not_less_than_or_equal_to(value, limit));
            }
        }
        self
    }

    pub fn greater_than(self, limit: i64) -> Self {
        if let Some(value) = self.value {
            if value <= limit {
                self.context
                    .report_error(ValidationError::not_greater_than(value, limit));
            }
        }
        self
    }

    pub fn greater_than_or_equal_to(self, limit: i64) -> Self {
        if let Some(value) = self.value {
            if value < limit {
                self.context
                    .report_error(ValidationError::not_greater_than_or_equal_to(value, limit));
            }
        }
        self
    }

    pub fn in_range(self, lower: i64, upper: i64) -> Self {
        if let Some(value) = self.value {
            if value < lower || value > upper {
                self.context
                    .report_error(ValidationError::not_in_range(value, lower, upper));
            }
        }
        self
    }

    /// Same check as [`in_range`](Self::in_range), reported as a warning.
    ///
    /// Only integers have this variant; float and string range checks always
    /// report errors.
    pub fn warn_not_in_range(self, lower: i64, upper: i64) -> Self {
        if let Some(value) = self.value {
            if value < lower || value > upper {
                self.context
                    .report_warning(ValidationError::not_in_range(value, lower, upper));
            }
        }
        self
    }

    pub fn one_of(self, allowed: &[i64]) -> Self {
        if let Some(value) = self.value {
            if !allowed.contains(&value) {
                self.context
                    .report_error(ValidationError::not_one_of(value, format_list(allowed)));
            }
        }
        self
    }

    pub fn not_one_of(self, disallowed: &[i64]) -> Self {
        if let Some(value) = self.value {
            if disallowed.contains(&value) {
                self.context
                    .report_error(ValidationError::one_of(value, format_list(disallowed)));
            }
        }
        self
    }

    /// Custom check, run only when the value is present
    pub fn using(self, check: impl FnOnce(i64, &ValidationContext)) -> Self {
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

    fn int(context: &ValidationContext, value: Option<i64>) -> IntValidator {
        IntValidator::new(context.child("value"), value)
    }

    #[test]
    fn test_absent_value_skips_every_predicate() {
        let context = ValidationContext::new();
        int(&context, None)
            .not_exists()
            .equal_to(1)
            .not_equal_to(1)
            .less_than(0)
            .less_than_or_equal_to(0)
            .greater_than(0)
            .greater_than_or_equal_to(0)
            .in_range(1, 2)
            .warn_not_in_range(1, 2)
            .one_of(&[1])
            .not_one_of(&[1])
            .using(|_, c| c.report_error(ValidationError::not_valid()));

        assert!(!context.has_error());
        assert!(!context.has_warning());
    }

    #[test]
    fn test_exists() {
        let context = ValidationContext::new();
        int(&context, None).exists().in_range(0, 10);
        int(&context, Some(3)).exists();

        assert_eq!(reported(&context), vec![("/value".to_string(), ErrorCode::NotExists)]);
    }

    #[test]
    fn test_not_exists() {
        let context = ValidationContext::new();
        int(&context, Some(0)).not_exists();

        assert_eq!(reported(&context), vec![("/value".to_string(), ErrorCode::Exists)]);
    }

    #[test]
    fn test_comparisons() {
        let context = ValidationContext::new();
        int(&context, Some(5))
            .equal_to(5)
            .equal_to(4)
            .not_equal_to(5)
            .less_than(5)
            .less_than_or_equal_to(4)
            .greater_than(5)
            .greater_than_or_equal_to(6);

        assert_eq!(
            details(&context),
            vec![
                "value 5 is not equal to 4",
                "value 5 is equal to 5",
                "value 5 is not less than 5",
                "value 5 is not less than or equal to 4",
                "value 5 is not greater than 5",
                "value 5 is not greater than or equal to 6",
            ]
        );
    }

    #[test]
    fn test_in_range_bounds_inclusive() {
        let context = ValidationContext::new();
        int(&context, Some(0)).in_range(0, 60);
        int(&context, Some(60)).in_range(0, 60);
        assert!(!context.has_error());

        int(&context, Some(80)).in_range(0, 60);
        let result = context.result();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::OutOfRange);
        assert_eq!(result.errors[0].detail, "value 80 is not between 0 and 60");
        assert_eq!(result.errors[0].pointer(), "/value");
    }

    #[test]
    fn test_warn_not_in_range_reports_warning() {
        let context = ValidationContext::new();
        int(&context, Some(100)).warn_not_in_range(0, 10);

        assert!(!context.has_error());
        let result = context.result();
        assert_eq!(result.warnings[0].detail, "value 100 is not between 0 and 10");
    }

    #[test]
    fn test_one_of() {
        let context = ValidationContext::new();
        int(&context, Some(2)).one_of(&[1, 3]).not_one_of(&[2, 4]);

        assert_eq!(
            reported(&context),
            vec![
                ("/value".to_string(), ErrorCode::NotAllowed),
                ("/value".to_string(), ErrorCode::Disallowed),
            ]
        );
        assert_eq!(details(&context)[0], "value 2 is not one of [1, 3]");
    }
}
