#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # datum-pipeline
//!
//! Per-record orchestration, batching, and acceptance policies.
//!
//! Each record runs decode, the unparsed-key check, validate and normalize
//! against its own context. Batches fan records out to blocking workers and
//! gather the outcomes back in input order before the [`AcceptancePolicy`]
//! decides what reaches the [`DatumStore`].

pub mod batch;
pub mod pipeline;
pub mod policies;
pub mod source;
pub mod store;

pub use batch::{BatchOutcome, BatchReport};
pub use pipeline::{Pipeline, PipelineConfig, RecordOutcome, RecordReport, RecordStatus};
pub use policies::{AcceptancePolicy, StrictnessLevel};
pub use source::{read_sources, records};
pub use store::{DatumStore, MemoryStore};

use thiserror::Error;

/// Errors that can occur in the pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Pipeline error during {operation} for '{path}': {message}")]
    Pipeline {
        operation: String,
        path: String,
        message: String,
    },

    #[error("Batch error: {0}")]
    Batch(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Registry error: {0}")]
    Registry(#[from] datum_structure::Error),

    #[error("IO error during {operation} for '{path}': {message}")]
    Io {
        operation: String,
        path: String,
        message: String,
    },
}

impl Error {
    /// Create a structured pipeline error with operation/path context.
    pub fn pipeline(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Pipeline {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a structured I/O error with operation/path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("io", "<unknown>", e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
