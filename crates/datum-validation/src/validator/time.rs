#![allow(clippy::return_self_not_must_use)]

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

use crate::context::ValidationContext;
use crate::error::ValidationError;

/// Fluent checks over an optional UTC timestamp.
///
/// The `*_now` variants compare against the clock at call time, shifted by a
/// threshold (`after_now(-1 day)` means "no more than a day in the past").
#[derive(Debug, Clone)]
pub struct TimeValidator {
    context: ValidationContext,
    value: Option<DateTime<Utc>>,
}

fn render(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl TimeValidator {
    pub fn new(context: ValidationContext, value: Option<DateTime<Utc>>) -> Self {
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

    pub fn after(self, limit: DateTime<Utc>) -> Self {
        if let Some(value) = self.value {
            if value <= limit {
                self.context
                    .report_error(ValidationError::not_after(render(value), render(limit)));
            }
        }
        self
    }

    pub fn after_now(self, threshold: TimeDelta) -> Self {
        let limit = Utc::now() + threshold;
        self.after(limit)
    }

    pub fn before(self, limit: DateTime<Utc>) -> Self {
        if let Some(value) = self.value {
            if value >= limit {
                self.context
                    .report_error(ValidationError::not_before(render(value), render(limit)));
            }
        }
        self
    }

    pub fn before_now(self, threshold: TimeDelta) -> Self {
        let limit = Utc::now() + threshold;
        self.before(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::validator::test_support::{details, reported};

    fn at(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_absent_value_skips_every_predicate() {
        let floor = at("2010-01-01T00:00:00Z");
        let context = ValidationContext::new();
        TimeValidator::new(context.child("time"), None)
            .not_exists()
            .after(floor)
            .after_now(TimeDelta::zero())
            .before(floor)
            .before_now(TimeDelta::zero());

        assert!(!context.has_error());
        assert!(!context.has_warning());
    }

    #[test]
    fn test_after_and_before() {
        let floor = at("2010-01-01T00:00:00Z");
        let context = ValidationContext::new();
        TimeValidator::new(context.child("time"), Some(at("2009-12-31T23:59:59Z")))
            .exists()
            .after(floor)
            .before(floor);

        assert_eq!(reported(&context), vec![("/time".to_string(), ErrorCode::NotAfter)]);
        assert_eq!(
            details(&context),
            vec!["value 2009-12-31T23:59:59Z is not after 2010-01-01T00:00:00Z"]
        );
    }

    #[test]
    fn test_now_thresholds() {
        let context = ValidationContext::new();
        let future = Utc::now() + TimeDelta::days(2);
        TimeValidator::new(context.child("time"), Some(future)).before_now(TimeDelta::days(1));
        TimeValidator::new(context.child("time"), Some(Utc::now())).after_now(-TimeDelta::days(1));

        assert_eq!(reported(&context), vec![("/time".to_string(), ErrorCode::NotBefore)]);
    }
}
