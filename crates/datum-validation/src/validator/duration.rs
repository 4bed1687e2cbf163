//! Duration assertions over [`TimeDelta`]
//!
//! Details render durations as milliseconds, the unit records carry them in.
#![allow(clippy::return_self_not_must_use)]

use chrono::TimeDelta;

use crate::context::ValidationContext;
use crate::error::ValidationError;

#[derive(Debug, Clone)]
pub struct DurationValidator {
    context: ValidationContext,
    value: Option<TimeDelta>,
}

fn millis(value: TimeDelta) -> String {
    format!("{}ms", value.num_milliseconds())
}

impl DurationValidator {
    pub fn new(context: ValidationContext, value: Option<TimeDelta>) -> Self {
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

    pub fn zero(self) -> Self {
        if let Some(value) = self.value {
            if value != TimeDelta::zero() {
                self.context.report_error(ValidationError::not_zero(millis(value)));
            }
        }
        self
    }

    pub fn not_zero(self) -> Self {
        if let Some(value) = self.value {
            if value == TimeDelta::zero() {
                self.context.report_error(ValidationError::zero(millis(value)));
            }
        }
        self
    }

    pub fn less_than(self, limit: TimeDelta) -> Self {
        if let Some(value) = self.value {
            if value >= limit {
                self.context
                    .report_error(ValidationError::not_less_than(millis(value), millis(limit)));
            }
        }
        self
    }

    pub fn less_than_or_equal_to(self, limit: TimeDelta) -> Self {
        if let Some(value) = self.value {
            if value > limit {
                self.context.report_error(ValidationError::not_less_than_or_equal_to(
                    millis(value),
                    millis(limit),
                ));
            }
        }
        self
    }

    pub fn greater_than(self, limit: TimeDelta) -> Self {
        if let Some(value) = self.value {
            if value <= limit {
                self.context
                    .report_error(ValidationError::not_greater_than(millis(value), millis(limit)));
            }
        }
        self
    }

    pub fn greater_than_or_equal_to(self, limit: TimeDelta) -> Self {
        if let Some(value) = self.value {
            if value < limit {
                self.context.report_error(ValidationError::not_greater_than_or_equal_to(
                    millis(value),
                    millis(limit),
                ));
            }
        }
        self
    }

    pub fn in_range(self, lower: TimeDelta, upper: TimeDelta) -> Self {
        if let Some(value) = self.value {
            if value < lower || value > upper {
                self.context.report_error(ValidationError::not_in_range(
                    millis(value),
                    millis(lower),
                    millis(upper),
                ));
            }
        }
        self
    }
}
