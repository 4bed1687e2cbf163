//! Reading batch sources from disk

use std::path::Path;

use datum_ir::{Cursor, Value};
use tracing::debug;

use crate::{Error, Result};

/// Split a decoded document into records: an array yields its elements,
/// anything else is a single record
#[must_use]
pub fn records(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Read the JSON document at `path`, optionally narrowed to the sub-value at
/// `pointer`, and split it into records.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and [`Error::Pipeline`]
/// when it is not JSON or the pointer does not resolve.
pub fn read_sources(path: &Path, pointer: Option<&str>) -> Result<Vec<Value>> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io("read", &display, e.to_string()))?;
    let document = Value::from_json_str(&text).map_err(|e| Error::pipeline("decode", &display, e.to_string()))?;

    let document = match pointer {
        Some(pointer) => Cursor::new(&document)
            .navigate(pointer)
            .map_err(|e| Error::pipeline("navigate", &display, e.to_string()))?
            .value()
            .clone(),
        None => document,
    };

    let sources = records(document);
    debug!(path = %path.display(), count = sources.len(), "sources read");
    Ok(sources)
}
