#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # datum-validation
//!
//! Validation primitives shared by every phase of datum processing.
//!
//! A [`ValidationContext`] tracks where in a record a check is happening and
//! collects every [`ValidationError`] reported below it. The typed builders
//! handed out by a [`Validator`] turn field checks into short fluent chains:
//!
//! ```rust
//! use datum_validation::{ErrorCode, ValidationContext, Validator};
//!
//! let context = ValidationContext::new();
//! let validator = Validator::new(context.clone());
//!
//! validator.float("normal", Some(250.1)).exists().in_range(0.0, 100.0);
//! validator.int("duration", None).exists().in_range(0, 86_400_000);
//!
//! let result = context.result();
//! assert_eq!(result.errors.len(), 2);
//! assert_eq!(result.errors[0].code, ErrorCode::OutOfRange);
//! assert_eq!(result.errors[0].pointer(), "/normal");
//! assert_eq!(result.errors[1].code, ErrorCode::NotExists);
//! ```

pub mod context;
pub mod error;
pub mod reporter;
pub mod result;
pub mod validator;

pub use context::ValidationContext;
pub use error::{ErrorCode, ValidationError, format_list, format_string_list, quote};
pub use reporter::{ErrorSource, ValidationIssue, ValidationReport, ValidationReporter};
pub use result::{ValidationErrors, ValidationResult};
pub use validator::{
    ArrayValidator, BoolValidator, BytesValidator, DurationValidator, FloatValidator,
    IntValidator, ObjectValidator, StringArrayValidator, StringValidator, TimeValidator,
    Validatable, ValidatableArrayValidator, ValidatableValidator, Validator,
};
