//! Scalars that keep the form they were written in
//!
//! A record read from a source and serialized again must reproduce every
//! field it read. [`Number`] remembers whether a quantity was written as an
//! integer, and [`Timestamp`] keeps the source text of a time until it is
//! deliberately rewritten.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Numeric quantity read as a float but written as either an integer or a float
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl From<Number> for f64 {
    fn from(number: Number) -> Self {
        number.as_f64()
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Int(i) => serializer.serialize_i64(*i),
            Number::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

/// Point in time with its original offset and, when read from text, that text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    time: DateTime<FixedOffset>,
    text: Option<String>,
}

impl Timestamp {
    /// Timestamp without source text; serializes in canonical RFC 3339
    #[must_use]
    pub fn new(time: DateTime<FixedOffset>) -> Self {
        Self { time, text: None }
    }

    /// Parse RFC 3339 text, keeping it verbatim for serialization
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error when `text` is not RFC 3339.
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        let time = DateTime::parse_from_rfc3339(text)?;
        Ok(Self {
            time,
            text: Some(text.to_string()),
        })
    }

    #[must_use]
    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }

    #[must_use]
    pub fn utc(&self) -> DateTime<Utc> {
        self.time.with_timezone(&Utc)
    }

    /// Source text, until the timestamp is rewritten
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Source text when present, else RFC 3339 with `Z` for UTC
    #[must_use]
    pub fn render(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(time: DateTime<FixedOffset>) -> Self {
        Self::new(time)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}
