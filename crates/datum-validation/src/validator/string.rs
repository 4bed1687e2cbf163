//! String assertions
//!
//! Lengths are counted in characters, not bytes.
#![allow(clippy::return_self_not_must_use)]

use regex::Regex;

use crate::context::ValidationContext;
use crate::error::{ValidationError, format_string_list, quote};

/// Fluent checks over an optional string slice
#[derive(Debug, Clone)]
pub struct StringValidator<'a> {
    context: ValidationContext,
    value: Option<&'a str>,
}

impl<'a> StringValidator<'a> {
    pub fn new(context: ValidationContext, value: Option<&'a str>) -> Self {
        Self { context, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(|v| v.chars().count())
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

    pub fn equal_to(self, limit: &str) -> Self {
        if let Some(value) = self.value {
            if value != limit {
                self.context
                    .report_error(ValidationError::not_equal_to(quote(value), quote(limit)));
            }
        }
        self
    }

    pub fn not_equal_to(self, limit: &str) -> Self {
        if let Some(value) = self.value {
            if value == limit {
                self.context
                    .report_error(ValidationError::equal_to(quote(value), quote(limit)));
            }
        }
        self
    }

    pub fn one_of<S: AsRef<str>>(self, allowed: &[S]) -> Self {
        if let Some(value) = self.value {
            if !allowed.iter().any(|a| a.as_ref() == value) {
                self.context.report_error(ValidationError::not_one_of(
                    quote(value),
                    format_string_list(allowed),
                ));
            }
        }
        self
    }

    pub fn not_one_of<S: AsRef<str>>(self, disallowed: &[S]) -> Self {
        if let Some(value) = self.value {
            if disallowed.iter().any(|d| d.as_ref() == value) {
                self.context.report_error(ValidationError::one_of(
                    quote(value),
                    format_string_list(disallowed),
                ));
            }
        }
        self
    }

    pub fn matches(self, expression: &Regex) -> Self {
        if let Some(value) = self.value {
            if !expression.is_match(value) {
                self.context
                    .report_error(ValidationError::not_matches(quote(value), expression.as_str()));
            }
        }
        self
    }

    pub fn not_matches(self, expression: &Regex) -> Self {
        if let Some(value) = self.value {
            if expression.is_match(value) {
                self.context
                    .report_error(ValidationError::matches(quote(value), expression.as_str()));
            }
        }
        self
    }

    /// Like [`matches`](Self::matches) with an uncompiled pattern.
    ///
    /// A pattern that fails to compile is reported as `not-valid`.
    pub fn matches_pattern(self, pattern: &str) -> Self {
        if self.value.is_none() {
            return self;
        }
        match Regex::new(pattern) {
            Ok(expression) => self.matches(&expression),
            Err(err) => {
                self.context
                    .report_error(ValidationError::not_valid_because(err));
                self
            }
        }
    }

    pub fn using(self, check: impl FnOnce(&str, &ValidationContext)) -> Self {
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

    fn string<'a>(context: &ValidationContext, value: Option<&'a str>) -> StringValidator<'a> {
        StringValidator::new(context.child("subType"), value)
    }

    #[test]
    fn test_absent_value_skips_every_predicate() {
        let context = ValidationContext::new();
        string(&context, None)
            .not_exists()
            .empty()
            .not_empty()
            .length_equal_to(1)
            .length_less_than(0)
            .length_less_than_or_equal_to(0)
            .length_greater_than(9)
            .length_greater_than_or_equal_to(9)
            .length_in_range(5, 9)
            .equal_to("normal")
            .not_equal_to("normal")
            .one_of(&["normal"])
            .not_one_of(&["normal"])
            .matches(&Regex::new("^x$").unwrap())
            .not_matches(&Regex::new(".*").unwrap())
            .matches_pattern("(")
            .using(|_, c| c.report_error(ValidationError::not_valid()));

        assert!(!context.has_error());
        assert!(!context.has_warning());
    }

    #[test]
    fn test_one_of_quotes_values() {
        let context = ValidationContext::new();
        string(&context, Some("bogus")).exists().one_of(&["normal", "square"]);
        string(&context, Some("normal")).one_of(&["normal", "square"]);

        assert_eq!(reported(&context), vec![("/subType".to_string(), ErrorCode::NotAllowed)]);
        assert_eq!(details(&context), vec![r#"value "bogus" is not one of ["normal", "square"]"#]);
    }

    #[test]
    fn test_not_one_of() {
        let context = ValidationContext::new();
        string(&context, Some("x")).not_one_of(&["x".to_string()]);
        assert_eq!(reported(&context), vec![("/subType".to_string(), ErrorCode::Disallowed)]);
    }

    #[test]
    fn test_empty_and_not_empty() {
        let context = ValidationContext::new();
        string(&context, Some("")).not_empty().empty();
        string(&context, Some("a")).empty().not_empty();

        let codes: Vec<ErrorCode> = reported(&context).into_iter().map(|(_, c)| c).collect();
        assert_eq!(codes, vec![ErrorCode::Empty, ErrorCode::NotEmpty]);
    }

    #[test]
    fn test_length_counts_characters() {
        let context = ValidationContext::new();
        string(&context, Some("héllo")).length_equal_to(5).length_less_than_or_equal_to(4);

        assert_eq!(details(&context), vec!["length 5 is not less than or equal to 4"]);
        assert_eq!(context.result().errors[0].code, ErrorCode::LengthOutOfRange);
    }

    #[test]
    fn test_length_in_range() {
        let context = ValidationContext::new();
        string(&context, Some("abc")).length_in_range(1, 2).length_greater_than(3);

        assert_eq!(
            details(&context),
            vec!["length 3 is not between 1 and 2", "length 3 is not greater than 3"]
        );
    }

    #[test]
    fn test_matches() {
        let expression = Regex::new("^[0-9]+$").unwrap();
        let context = ValidationContext::new();
        string(&context, Some("12")).matches(&expression).not_matches(&expression);
        string(&context, Some("ab")).matches(&expression);

        assert_eq!(
            reported(&context),
            vec![
                ("/subType".to_string(), ErrorCode::Matches),
                ("/subType".to_string(), ErrorCode::NotMatches),
            ]
        );
        assert_eq!(details(&context)[1], r#"value "ab" does not match expression "^[0-9]+$""#);
    }

    #[test]
    fn test_matches_pattern_with_bad_pattern() {
        let context = ValidationContext::new();
        string(&context, Some("a")).matches_pattern("(");
        string(&context, None).matches_pattern("(");

        assert_eq!(reported(&context), vec![("/subType".to_string(), ErrorCode::NotValid)]);
    }

    #[test]
    fn test_equality() {
        let context = ValidationContext::new();
        string(&context, Some("a")).equal_to("a").equal_to("b").not_equal_to("a");

        assert_eq!(
            details(&context),
            vec![r#"value "a" is not equal to "b""#, r#"value "a" is equal to "a""#]
        );
    }

    #[test]
    fn test_using_runs_only_when_present() {
        let context = ValidationContext::new();
        string(&context, Some("x")).using(|v, c| {
            if v == "x" {
                c.report_error(ValidationError::not_valid());
            }
        });
        string(&context, None).using(|_, c| c.report_error(ValidationError::not_valid()));

        assert_eq!(reported(&context), vec![("/subType".to_string(), ErrorCode::NotValid)]);
    }
}
