#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # datum-ir
//!
//! Untyped source tree for externally supplied datum records.
//!
//! This crate provides the in-memory decoded form of a JSON or BSON document
//! (a recursive tree of scalars, arrays and keyed objects), the path segments
//! used to locate a value inside that tree, and a cursor for navigating it by
//! JSON pointer. Everything above this crate is agnostic to the wire format.

/// Path segments and JSON-pointer rendering.
pub mod path;
/// Source-preserving number and timestamp scalars.
pub mod scalar;
/// Cursor-based navigation over a value tree.
pub mod traversal;
/// Untyped value tree.
pub mod value;

/// Path primitives for error locations.
pub use path::{Path, PathSegment};
/// Source-preserving scalars.
pub use scalar::{Number, Timestamp};
/// Traversal entry point.
pub use traversal::Cursor;
/// Value primitives.
pub use value::{Object, Value};

use thiserror::Error;

/// Errors that can occur when working with the IR
#[derive(Error, Debug)]
pub enum Error {
    #[error("Value not found at pointer: {pointer}")]
    NotFound { pointer: String },

    #[error("Invalid pointer '{pointer}': {reason}")]
    InvalidPointer { pointer: String, reason: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Build a not-found error for the given pointer.
    pub fn not_found(pointer: impl Into<String>) -> Self {
        Self::NotFound {
            pointer: pointer.into(),
        }
    }

    /// Build an invalid-pointer error with the input pointer and parsing reason.
    pub fn invalid_pointer(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPointer {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for IR operations.
pub type Result<T> = std::result::Result<T, Error>;
