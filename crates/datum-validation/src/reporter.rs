//! Validation reporter
//!
//! Renders a [`ValidationResult`] as the JSON:API error document used at the
//! HTTP boundary:
//!
//! ```json
//! {"errors": [{"code": "out-of-range", "title": "...", "detail": "...",
//!              "source": {"pointer": "/normal"}, "meta": {...}}]}
//! ```

use serde::Serialize;

use crate::error::ValidationError;
use crate::result::ValidationResult;

/// Error source locator
#[derive(Debug, Clone, Serialize)]
pub struct ErrorSource {
    pub pointer: String,
}

/// One entry of the JSON:API `errors` array
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub code: String,
    pub title: String,
    pub detail: String,
    pub source: ErrorSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl From<&ValidationError> for ValidationIssue {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.as_str().to_string(),
            title: error.title.clone(),
            detail: error.detail.clone(),
            source: ErrorSource {
                pointer: error.pointer(),
            },
            meta: error.meta.clone(),
        }
    }
}

/// JSON:API error document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
}

/// Reports validation results
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationReporter;

impl ValidationReporter {
    /// Create a new validation reporter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the error document for the result's errors
    #[must_use]
    pub fn report(&self, result: &ValidationResult) -> ValidationReport {
        Self::document(&result.errors)
    }

    /// Build an error document for the result's warnings
    #[must_use]
    pub fn report_warnings(&self, result: &ValidationResult) -> ValidationReport {
        Self::document(&result.warnings)
    }

    /// Build the error document as a JSON value
    #[must_use]
    pub fn to_json(&self, result: &ValidationResult) -> serde_json::Value {
        serde_json::to_value(self.report(result)).unwrap_or_default()
    }

    /// One line per error, `pointer: code: detail`
    #[must_use]
    pub fn to_text(&self, result: &ValidationResult) -> String {
        result
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn document(errors: &[ValidationError]) -> ValidationReport {
        ValidationReport {
            errors: errors.iter().map(ValidationIssue::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationContext;
    use serde_json::json;

    #[test]
    fn test_json_api_document() {
        let context = ValidationContext::new();
        context
            .with_meta(json!({"type": "bolus", "subType": "normal"}))
            .child("normal")
            .report_error(ValidationError::not_in_range(250.1, 0.0, 100.0));
        context.child("associations").child(0).child("url").report_error(ValidationError::not_exists());

        let body = ValidationReporter::new().to_json(&context.result());

        assert_eq!(
            body,
            json!({"errors": [
                {
                    "code": "out-of-range",
                    "title": "value is out of range",
                    "detail": "value 250.1 is not between 0 and 100",
                    "source": {"pointer": "/normal"},
                    "meta": {"type": "bolus", "subType": "normal"}
                },
                {
                    "code": "not-exists",
                    "title": "value does not exist",
                    "detail": "value does not exist",
                    "source": {"pointer": "/associations/0/url"}
                }
            ]})
        );
    }

    #[test]
    fn test_text_report() {
        let context = ValidationContext::new();
        context.child("duration").report_error(ValidationError::not_exists());

        let text = ValidationReporter::new().to_text(&context.result());
        assert_eq!(text, "/duration: not-exists: value does not exist");
    }

    #[test]
    fn test_warnings_document() {
        let context = ValidationContext::new();
        context.child("clockDriftOffset").report_warning(ValidationError::not_in_range(1, 2, 3));

        let reporter = ValidationReporter::new();
        let result = context.result();
        assert!(reporter.report(&result).errors.is_empty());
        assert_eq!(reporter.report_warnings(&result).errors[0].source.pointer, "/clockDriftOffset");
    }
}
