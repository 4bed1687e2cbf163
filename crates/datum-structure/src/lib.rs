#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # datum-structure
//!
//! The three-phase contract every datum record implements, plus variant
//! dispatch.
//!
//! - [`Parsable`] reads a record out of an untyped source through an
//!   [`ObjectParser`], reporting type errors instead of failing.
//! - [`Validatable`] checks a record without mutating it.
//! - [`Normalizable`] brings a clean record into canonical form.
//!
//! A [`VariantRegistry`] selects the concrete record for a source from its
//! `type` and sub-type discriminators before any field is read.

pub mod normalizer;
pub mod parser;
pub mod registry;

pub use datum_validation::{Validatable, Validator};
pub use normalizer::{Normalizable, Normalizer};
pub use parser::{ArrayParser, ObjectParser, Parsable, TIME_LAYOUT, UnparsedKeys};
pub use registry::{Constructor, VariantRegistry, VariantRegistryBuilder};

use thiserror::Error;

/// Errors raised while building a variant registry
#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate variant {value:?} in registry {registry:?}")]
    DuplicateVariant { registry: String, value: String },

    #[error("Empty discriminator in registry {registry:?}")]
    EmptyDiscriminator { registry: String },

    #[error("No variants registered in registry {registry:?}")]
    NoVariants { registry: String },
}

pub type Result<T> = std::result::Result<T, Error>;
