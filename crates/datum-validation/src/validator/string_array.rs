#![allow(clippy::return_self_not_must_use)]

use regex::Regex;

use crate::context::ValidationContext;
use crate::error::ValidationError;
use crate::validator::StringValidator;

/// Fluent checks over an optional string array.
///
/// The `each_*` predicates check every element at its own index.
#[derive(Debug, Clone)]
pub struct StringArrayValidator<'a> {
    context: ValidationContext,
    value: Option<&'a [String]>,
}

impl<'a> StringArrayValidator<'a> {
    pub fn new(context: ValidationContext, value: Option<&'a [String]>) -> Self {
        Self { context, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[String]>::len)
    }

    fn each(self, check: impl Fn(StringValidator<'_>)) -> Self {
        if let Some(values) = self.value {
            for (index, value) in values.iter().enumerate() {
                check(StringValidator::new(self.context.child(index), Some(value.as_str())));
            }
        }
        self
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

    pub fn each_not_empty(self) -> Self {
        self.each(|element| {
            element.not_empty();
        })
    }

    pub fn each_one_of<S: AsRef<str>>(self, allowed: &[S]) -> Self {
        self.each(|element| {
            element.one_of(allowed);
        })
    }

    pub fn each_not_one_of<S: AsRef<str>>(self, disallowed: &[S]) -> Self {
        self.each(|element| {
            element.not_one_of(disallowed);
        })
    }

    pub fn each_matches(self, expression: &Regex) -> Self {
        self.each(|element| {
            element.matches(expression);
        })
    }

    pub fn each_not_matches(self, expression: &Regex) -> Self {
        self.each(|element| {
            element.not_matches(expression);
        })
    }

    pub fn each_length_in_range(self, lower: usize, upper: usize) -> Self {
        self.each(|element| {
            element.length_in_range(lower, upper);
        })
    }

    pub fn each_length_less_than_or_equal_to(self, limit: usize) -> Self {
        self.each(|element| {
            element.length_less_than_or_equal_to(limit);
        })
    }

    pub fn using(self, check: impl FnOnce(&[String], &ValidationContext)) -> Self {
        if let Some(values) = self.value {
            check(values, &self.context);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::validator::test_support::reported;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_each_reports_at_index() {
        let values = strings(&["a", "", "c", ""]);
        let context = ValidationContext::new();
        StringArrayValidator::new(context.child("tags"), Some(values.as_slice()))
            .exists()
            .not_empty()
            .each_not_empty();

        assert_eq!(
            reported(&context),
            vec![
                ("/tags/1".to_string(), ErrorCode::Empty),
                ("/tags/3".to_string(), ErrorCode::Empty),
            ]
        );
    }

    #[test]
    fn test_each_one_of() {
        let values = strings(&["normal", "bogus"]);
        let context = ValidationContext::new();
        StringArrayValidator::new(context.child("kinds"), Some(values.as_slice()))
            .each_one_of(&["normal", "square"])
            .each_not_one_of(&["normal"]);

        assert_eq!(
            reported(&context),
            vec![
                ("/kinds/1".to_string(), ErrorCode::NotAllowed),
                ("/kinds/0".to_string(), ErrorCode::Disallowed),
            ]
        );
    }

    #[test]
    fn test_array_length() {
        let values = strings(&["a", "b", "c"]);
        let context = ValidationContext::new();
        StringArrayValidator::new(context.child("tags"), Some(values.as_slice()))
            .length_less_than_or_equal_to(2)
            .each_length_less_than_or_equal_to(1);

        assert_eq!(
            reported(&context),
            vec![("/tags".to_string(), ErrorCode::LengthOutOfRange)]
        );
    }

    #[test]
    fn test_each_matches() {
        let expression = Regex::new("^[a-z]+$").unwrap();
        let values = strings(&["ok", "NO"]);
        let context = ValidationContext::new();
        StringArrayValidator::new(context.child("tags"), Some(values.as_slice()))
            .each_matches(&expression)
            .each_length_in_range(3, 5);

        let pointers: Vec<String> = reported(&context).into_iter().map(|(p, _)| p).collect();
        assert_eq!(pointers, vec!["/tags/1", "/tags/0", "/tags/1"]);
    }

    #[test]
    fn test_absent_array() {
        let context = ValidationContext::new();
        StringArrayValidator::new(context.child("tags"), None)
            .not_empty()
            .each_not_empty()
            .not_exists();
        assert!(!context.has_error());
    }
}
