//! Linked-field checks
//!
//! A linked pair is a required primary quantity and an optional "expected"
//! companion sharing one `[lower, upper]` bound. When the companion is present
//! and itself in bounds it becomes the primary's upper bound. The companion is
//! always checked against the full bound.
//!
//! Records carrying two pairs additionally tie the companions' presence
//! together, see [`validate_expected_linkage`].

use std::fmt::Display;

use datum_validation::{ValidationError, Validator};

/// Numeric shape a linked pair can be built over
pub trait Quantity: Copy + PartialOrd + Display {
    /// Range check through the matching typed builder
    fn check(validator: &Validator, reference: &str, value: Option<Self>, required: bool, lower: Self, upper: Self);
}

impl Quantity for i64 {
    fn check(validator: &Validator, reference: &str, value: Option<Self>, required: bool, lower: Self, upper: Self) {
        let builder = validator.int(reference, value);
        let builder = if required { builder.exists() } else { builder };
        builder.in_range(lower, upper);
    }
}

impl Quantity for f64 {
    fn check(validator: &Validator, reference: &str, value: Option<Self>, required: bool, lower: Self, upper: Self) {
        let builder = validator.float(reference, value);
        let builder = if required { builder.exists() } else { builder };
        builder.in_range(lower, upper);
    }
}

/// Field names and bounds of one primary/expected pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkedPair<T> {
    pub primary: &'static str,
    pub expected: &'static str,
    pub lower: T,
    pub upper: T,
}

impl<T: Quantity> LinkedPair<T> {
    pub const fn new(primary: &'static str, expected: &'static str, lower: T, upper: T) -> Self {
        Self {
            primary,
            expected,
            lower,
            upper,
        }
    }

    fn contains(&self, value: T) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Upper bound the primary is checked against
    pub fn primary_upper(&self, expected: Option<T>) -> T {
        match expected {
            Some(expected) if self.contains(expected) => expected,
            _ => self.upper,
        }
    }

    /// Check both fields, primary first
    pub fn validate<V: Into<T>>(&self, validator: &Validator, primary: Option<V>, expected: Option<V>) {
        let primary = primary.map(Into::into);
        let expected = expected.map(Into::into);
        T::check(validator, self.primary, primary, true, self.lower, self.primary_upper(expected));
        T::check(validator, self.expected, expected, false, self.lower, self.upper);
    }
}

/// Require the second pair's companion exactly when the first pair's exists.
///
/// Reported on the first pair's companion: `not-exists` when only the second
/// is present, `exists` when only the first is.
pub fn validate_expected_linkage(validator: &Validator, first_expected: &str, first_present: bool, second_present: bool) {
    match (first_present, second_present) {
        (false, true) => validator.with_reference(first_expected).report_error(ValidationError::not_exists()),
        (true, false) => validator.with_reference(first_expected).report_error(ValidationError::exists()),
        _ => {}
    }
}
