#![allow(clippy::return_self_not_must_use)]

use datum_ir::Object;

use crate::context::ValidationContext;
use crate::error::ValidationError;

/// Checks over an optional raw object
#[derive(Debug, Clone)]
pub struct ObjectValidator<'a> {
    context: ValidationContext,
    value: Option<&'a Object>,
}

impl<'a> ObjectValidator<'a> {
    pub fn new(context: ValidationContext, value: Option<&'a Object>) -> Self {
        Self { context, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(Object::len)
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

    pub fn using(self, check: impl FnOnce(&Object, &ValidationContext)) -> Self {
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
    use crate::validator::test_support::reported;
    use datum_ir::Value;

    #[test]
    fn test_absent_value_skips_every_predicate() {
        let context = ValidationContext::new();
        ObjectValidator::new(context.child("payload"), None)
            .not_exists()
            .empty()
            .not_empty()
            .using(|_, c| c.report_error(ValidationError::not_valid()));

        assert!(!context.has_error());
        assert!(!context.has_warning());
    }

    #[test]
    fn test_object_emptiness() {
        let empty = Object::new();
        let mut filled = Object::new();
        filled.insert("k".to_string(), Value::Int(1));

        let context = ValidationContext::new();
        ObjectValidator::new(context.child("payload"), Some(&empty)).exists().not_empty();
        ObjectValidator::new(context.child("payload"), Some(&filled)).empty();
        ObjectValidator::new(context.child("payload"), None).empty().not_empty();

        let codes: Vec<ErrorCode> = reported(&context).into_iter().map(|(_, c)| c).collect();
        assert_eq!(codes, vec![ErrorCode::Empty, ErrorCode::NotEmpty]);
    }
}
