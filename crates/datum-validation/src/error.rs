//! Validation error taxonomy
//!
//! Every finding raised while parsing, validating or normalizing a record is a
//! [`ValidationError`]: a fixed `code` and `title` per kind, plus a `detail`
//! carrying the offending values. The location (`path`) and the context
//! metadata (`meta`) are stamped by the [`ValidationContext`] that reports it.
//!
//! [`ValidationContext`]: crate::ValidationContext

use std::fmt::{self, Display};

use datum_ir::Path;
use serde::Serialize;

/// Closed set of error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    NotExists,
    Exists,
    Empty,
    NotEmpty,
    OutOfRange,
    Disallowed,
    NotAllowed,
    Matches,
    NotMatches,
    Zero,
    NotZero,
    NotAfter,
    NotBefore,
    NotValid,
    LengthOutOfRange,
    NotSerializable,

    // Parse-phase kinds
    TypeNotBool,
    TypeNotInt,
    TypeNotFloat,
    TypeNotString,
    TypeNotArray,
    TypeNotObject,
    TypeNotTime,
    TypeNotBytes,
    TimeNotParsable,
    NotParsed,
}

impl ErrorCode {
    /// Wire form of the code, e.g. `out-of-range`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotExists => "not-exists",
            Self::Exists => "exists",
            Self::Empty => "empty",
            Self::NotEmpty => "not-empty",
            Self::OutOfRange => "out-of-range",
            Self::Disallowed => "disallowed",
            Self::NotAllowed => "not-allowed",
            Self::Matches => "matches",
            Self::NotMatches => "not-matches",
            Self::Zero => "zero",
            Self::NotZero => "not-zero",
            Self::NotAfter => "not-after",
            Self::NotBefore => "not-before",
            Self::NotValid => "not-valid",
            Self::LengthOutOfRange => "length-out-of-range",
            Self::NotSerializable => "not-serializable",
            Self::TypeNotBool => "type-not-bool",
            Self::TypeNotInt => "type-not-int",
            Self::TypeNotFloat => "type-not-float",
            Self::TypeNotString => "type-not-string",
            Self::TypeNotArray => "type-not-array",
            Self::TypeNotObject => "type-not-object",
            Self::TypeNotTime => "type-not-time",
            Self::TypeNotBytes => "type-not-bytes",
            Self::TimeNotParsable => "time-not-parsable",
            Self::NotParsed => "not-parsed",
        }
    }

    /// Human title, fixed per code
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotExists => "value does not exist",
            Self::Exists => "value exists",
            Self::Empty => "value is empty",
            Self::NotEmpty => "value is not empty",
            Self::OutOfRange => "value is out of range",
            Self::Disallowed => "value is one of the disallowed values",
            Self::NotAllowed => "value is not one of the allowed values",
            Self::Matches => "value matches expression",
            Self::NotMatches => "value does not match expression",
            Self::Zero => "value is zero",
            Self::NotZero => "value is not zero",
            Self::NotAfter => "value is not after the specified time",
            Self::NotBefore => "value is not before the specified time",
            Self::NotValid => "value is not valid",
            Self::LengthOutOfRange => "length is out of range",
            Self::NotSerializable => "value is not serializable",
            Self::TypeNotBool => "type is not bool",
            Self::TypeNotInt => "type is not int",
            Self::TypeNotFloat => "type is not float",
            Self::TypeNotString => "type is not string",
            Self::TypeNotArray => "type is not array",
            Self::TypeNotObject => "type is not object",
            Self::TypeNotTime => "type is not time",
            Self::TypeNotBytes => "type is not bytes",
            Self::TimeNotParsable => "value is not a parsable time",
            Self::NotParsed => "not parsed",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, located by path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub title: String,
    pub detail: String,
    /// Location at time of report (root until reported through a context)
    pub path: Path,
    /// Snapshot of the reporting context's metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pointer = self.path.pointer();
        if pointer.is_empty() {
            write!(f, "(root): {}: {}", self.code, self.detail)
        } else {
            write!(f, "{pointer}: {}: {}", self.code, self.detail)
        }
    }
}

impl ValidationError {
    /// Create an unlocated error of the given kind
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            title: code.title().to_string(),
            detail: detail.into(),
            path: Path::root(),
            meta: None,
        }
    }

    /// Pointer form of the error location
    #[must_use]
    pub fn pointer(&self) -> String {
        self.path.pointer()
    }

    #[must_use]
    pub fn not_exists() -> Self {
        Self::new(ErrorCode::NotExists, "value does not exist")
    }

    #[must_use]
    pub fn exists() -> Self {
        Self::new(ErrorCode::Exists, "value exists")
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(ErrorCode::Empty, "value is empty")
    }

    #[must_use]
    pub fn not_empty() -> Self {
        Self::new(ErrorCode::NotEmpty, "value is not empty")
    }

    pub fn not_equal_to(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("value {value} is not equal to {limit}"),
        )
    }

    pub fn equal_to(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("value {value} is equal to {limit}"),
        )
    }

    pub fn not_less_than(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("value {value} is not less than {limit}"),
        )
    }

    pub fn not_less_than_or_equal_to(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("value {value} is not less than or equal to {limit}"),
        )
    }

    pub fn not_greater_than(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("value {value} is not greater than {limit}"),
        )
    }

    pub fn not_greater_than_or_equal_to(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("value {value} is not greater than or equal to {limit}"),
        )
    }

    pub fn not_in_range(value: impl Display, lower: impl Display, upper: impl Display) -> Self {
        Self::new(
            ErrorCode::OutOfRange,
            format!("value {value} is not between {lower} and {upper}"),
        )
    }

    /// Value is not in the allowed set (`allowed` is pre-rendered, see [`format_list`])
    pub fn not_one_of(value: impl Display, allowed: impl Display) -> Self {
        Self::new(
            ErrorCode::NotAllowed,
            format!("value {value} is not one of {allowed}"),
        )
    }

    /// Value is in the disallowed set
    pub fn one_of(value: impl Display, disallowed: impl Display) -> Self {
        Self::new(
            ErrorCode::Disallowed,
            format!("value {value} is one of {disallowed}"),
        )
    }

    pub fn matches(value: impl Display, expression: &str) -> Self {
        Self::new(
            ErrorCode::Matches,
            format!("value {value} matches expression {}", quote(expression)),
        )
    }

    pub fn not_matches(value: impl Display, expression: &str) -> Self {
        Self::new(
            ErrorCode::NotMatches,
            format!("value {value} does not match expression {}", quote(expression)),
        )
    }

    pub fn zero(value: impl Display) -> Self {
        Self::new(ErrorCode::Zero, format!("value {value} is zero"))
    }

    pub fn not_zero(value: impl Display) -> Self {
        Self::new(ErrorCode::NotZero, format!("value {value} is not zero"))
    }

    pub fn not_after(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::NotAfter,
            format!("value {value} is not after {limit}"),
        )
    }

    pub fn not_before(value: impl Display, limit: impl Display) -> Self {
        Self::new(
            ErrorCode::NotBefore,
            format!("value {value} is not before {limit}"),
        )
    }

    #[must_use]
    pub fn not_valid() -> Self {
        Self::new(ErrorCode::NotValid, "value is not valid")
    }

    pub fn not_valid_because(reason: impl Display) -> Self {
        Self::new(ErrorCode::NotValid, format!("value is not valid, {reason}"))
    }

    pub fn length_not_equal_to(length: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::LengthOutOfRange,
            format!("length {length} is not equal to {limit}"),
        )
    }

    pub fn length_not_less_than(length: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::LengthOutOfRange,
            format!("length {length} is not less than {limit}"),
        )
    }

    pub fn length_not_less_than_or_equal_to(length: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::LengthOutOfRange,
            format!("length {length} is not less than or equal to {limit}"),
        )
    }

    pub fn length_not_greater_than(length: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::LengthOutOfRange,
            format!("length {length} is not greater than {limit}"),
        )
    }

    pub fn length_not_greater_than_or_equal_to(length: usize, limit: usize) -> Self {
        Self::new(
            ErrorCode::LengthOutOfRange,
            format!("length {length} is not greater than or equal to {limit}"),
        )
    }

    pub fn length_not_in_range(length: usize, lower: usize, upper: usize) -> Self {
        Self::new(
            ErrorCode::LengthOutOfRange,
            format!("length {length} is not between {lower} and {upper}"),
        )
    }

    pub fn not_serializable(reason: impl Display) -> Self {
        Self::new(
            ErrorCode::NotSerializable,
            format!("value is not serializable, {reason}"),
        )
    }

    /// Parse-phase type mismatch; `found` is the source value's kind
    #[must_use]
    pub fn type_mismatch(code: ErrorCode, found: &str) -> Self {
        let expected = code.title().trim_start_matches("type is not ");
        Self::new(code, format!("type is not {expected}, but {found}"))
    }

    pub fn time_not_parsable(value: &str, layout: &str) -> Self {
        Self::new(
            ErrorCode::TimeNotParsable,
            format!("value {} is not a parsable time of format {}", quote(value), quote(layout)),
        )
    }

    #[must_use]
    pub fn not_parsed() -> Self {
        Self::new(ErrorCode::NotParsed, "not parsed")
    }
}

/// Render a string value the way details quote them
#[must_use]
pub fn quote(value: &str) -> String {
    format!("{value:?}")
}

/// Render a comparison set, e.g. `[0, 2.5]`
pub fn format_list<T: Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Render a set of strings with quoting, e.g. `["normal", "square"]`
pub fn format_string_list<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| quote(v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}
