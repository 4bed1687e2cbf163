//! Parse phase: typed reads over an untyped source object
//!
//! Every read marks its key as consumed. A missing key and an explicit `null`
//! both read as `None`; a value of the wrong shape reports a parse-phase error
//! at the key's path and also reads as `None`, so one malformed field never
//! stops the rest of the record from being read.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use datum_ir::{Number, Object, PathSegment, Timestamp, Value};
use datum_validation::{ErrorCode, ValidationContext, ValidationError};

/// Layout quoted in `time-not-parsable` details
pub const TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// A record that populates itself from an [`ObjectParser`]
pub trait Parsable {
    fn parse(&mut self, parser: &mut ObjectParser<'_>);
}

/// How keys left unconsumed after a parse are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnparsedKeys {
    #[default]
    Error,
    Warning,
}

/// Reader over one source object
#[derive(Debug)]
pub struct ObjectParser<'a> {
    context: ValidationContext,
    object: Option<&'a Object>,
    parsed: BTreeSet<String>,
    unparsed: UnparsedKeys,
}

impl<'a> ObjectParser<'a> {
    #[must_use]
    pub fn new(context: ValidationContext, object: Option<&'a Object>) -> Self {
        Self {
            context,
            object,
            parsed: BTreeSet::new(),
            unparsed: UnparsedKeys::default(),
        }
    }

    /// Parser over a source value, reporting `type-not-object` when it is not one
    #[must_use]
    pub fn from_value(context: ValidationContext, value: &'a Value) -> Self {
        let object = match value {
            Value::Object(object) => Some(object),
            Value::Null => None,
            other => {
                context.report_error(ValidationError::type_mismatch(
                    ErrorCode::TypeNotObject,
                    other.kind(),
                ));
                None
            }
        };
        Self::new(context, object)
    }

    /// Set how nested parsers report unconsumed keys
    #[must_use]
    pub fn with_unparsed_keys(mut self, unparsed: UnparsedKeys) -> Self {
        self.unparsed = unparsed;
        self
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.object.is_some()
    }

    #[must_use]
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Whether `key` holds a non-null value; does not consume it
    #[must_use]
    pub fn has_value(&self, key: &str) -> bool {
        self.object
            .and_then(|object| object.get(key))
            .is_some_and(|value| !value.is_null())
    }

    fn raw(&mut self, key: &str) -> Option<&'a Value> {
        self.parsed.insert(key.to_string());
        self.object?.get(key).filter(|value| !value.is_null())
    }

    fn read<T>(
        &mut self,
        key: &str,
        code: ErrorCode,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.raw(key)?;
        let extracted = extract(value);
        if extracted.is_none() {
            self.context
                .child(key)
                .report_error(ValidationError::type_mismatch(code, value.kind()));
        }
        extracted
    }

    pub fn bool(&mut self, key: &str) -> Option<bool> {
        self.read(key, ErrorCode::TypeNotBool, |value| match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn int(&mut self, key: &str) -> Option<i64> {
        self.read(key, ErrorCode::TypeNotInt, int_value)
    }

    pub fn float(&mut self, key: &str) -> Option<f64> {
        self.number(key).map(Number::as_f64)
    }

    /// Float read that remembers whether the source wrote an integer
    pub fn number(&mut self, key: &str) -> Option<Number> {
        self.read(key, ErrorCode::TypeNotFloat, |value| match value {
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Int(i) => Some(Number::Int(*i)),
            _ => None,
        })
    }

    pub fn string(&mut self, key: &str) -> Option<String> {
        self.read(key, ErrorCode::TypeNotString, |value| {
            value.as_str().map(ToString::to_string)
        })
    }

    /// Array of strings; any non-string element is reported at its index and
    /// leaves the whole attribute unset
    pub fn string_array(&mut self, key: &str) -> Option<Vec<String>> {
        let elements = self.read(key, ErrorCode::TypeNotArray, Value::as_array)?;
        let context = self.context.child(key);

        let mut strings = Vec::with_capacity(elements.len());
        let mut valid = true;
        for (index, element) in elements.iter().enumerate() {
            match element.as_str() {
                Some(s) => strings.push(s.to_string()),
                None => {
                    context.child(index).report_error(ValidationError::type_mismatch(
                        ErrorCode::TypeNotString,
                        element.kind(),
                    ));
                    valid = false;
                }
            }
        }
        valid.then_some(strings)
    }

    pub fn bytes(&mut self, key: &str) -> Option<Vec<u8>> {
        self.read(key, ErrorCode::TypeNotBytes, |value| match value {
            Value::Binary(bytes) => Some(bytes.clone()),
            _ => None,
        })
    }

    /// RFC 3339 string or native timestamp, keeping the source offset
    pub fn time(&mut self, key: &str) -> Option<DateTime<FixedOffset>> {
        self.timestamp(key).map(|timestamp| timestamp.time())
    }

    /// Like [`ObjectParser::time`], keeping the source text as well
    pub fn timestamp(&mut self, key: &str) -> Option<Timestamp> {
        let value = self.raw(key)?;
        match value {
            Value::DateTime(time) => Some(Timestamp::new(time.fixed_offset())),
            Value::String(text) => match Timestamp::parse(text) {
                Ok(timestamp) => Some(timestamp),
                Err(_) => {
                    self.context
                        .child(key)
                        .report_error(ValidationError::time_not_parsable(text, TIME_LAYOUT));
                    None
                }
            },
            other => {
                self.context.child(key).report_error(ValidationError::type_mismatch(
                    ErrorCode::TypeNotTime,
                    other.kind(),
                ));
                None
            }
        }
    }

    pub fn object(&mut self, key: &str) -> Option<&'a Object> {
        self.read(key, ErrorCode::TypeNotObject, Value::as_object)
    }

    pub fn array(&mut self, key: &str) -> Option<&'a [Value]> {
        self.read(key, ErrorCode::TypeNotArray, Value::as_array)
    }

    /// Parser for the object under `key`; empty when absent or mistyped
    pub fn object_parser(&mut self, key: &str) -> ObjectParser<'a> {
        let object = self.object(key);
        ObjectParser::new(self.context.child(key), object).with_unparsed_keys(self.unparsed)
    }

    /// Parser for the array under `key`; empty when absent or mistyped
    pub fn array_parser(&mut self, key: &str) -> ArrayParser<'a> {
        let array = self.array(key);
        ArrayParser::new(self.context.child(key), array, self.unparsed)
    }

    /// Parse a nested record, reporting its unconsumed keys
    pub fn parse<T: Parsable + Default>(&mut self, key: &str) -> Option<T> {
        let mut parser = self.object_parser(key);
        parser.parse_self()
    }

    /// Parse an array of nested records
    pub fn parse_array<T: Parsable + Default>(&mut self, key: &str) -> Option<Vec<T>> {
        self.array_parser(key).parse_all()
    }

    pub(crate) fn parse_self<T: Parsable + Default>(&mut self) -> Option<T> {
        if !self.exists() {
            return None;
        }
        let mut record = T::default();
        record.parse(self);
        self.report_not_parsed();
        Some(record)
    }

    fn unparsed_keys(&self) -> Vec<&'a str> {
        self.object
            .map(|object| {
                object
                    .keys()
                    .filter(|key| !self.parsed.contains(key.as_str()))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Report every unconsumed key as a `not-parsed` error, in key order
    pub fn not_parsed(&self) {
        for key in self.unparsed_keys() {
            self.context.child(key).report_error(ValidationError::not_parsed());
        }
    }

    /// Report every unconsumed key as a `not-parsed` warning
    pub fn not_parsed_as_warnings(&self) {
        for key in self.unparsed_keys() {
            self.context.child(key).report_warning(ValidationError::not_parsed());
        }
    }

    /// Report unconsumed keys with this parser's configured severity
    pub fn report_not_parsed(&self) {
        match self.unparsed {
            UnparsedKeys::Error => self.not_parsed(),
            UnparsedKeys::Warning => self.not_parsed_as_warnings(),
        }
    }
}

fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Some(*f as i64)
        }
        _ => None,
    }
}

/// Reader over one source array; elements are addressed by index
#[derive(Debug)]
pub struct ArrayParser<'a> {
    context: ValidationContext,
    array: Option<&'a [Value]>,
    unparsed: UnparsedKeys,
}

impl<'a> ArrayParser<'a> {
    #[must_use]
    pub fn new(context: ValidationContext, array: Option<&'a [Value]>, unparsed: UnparsedKeys) -> Self {
        Self {
            context,
            array,
            unparsed,
        }
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.array.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.array.map_or(0, <[Value]>::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Parser for the object at `index`; reports `type-not-object` otherwise
    #[must_use]
    pub fn object_parser(&self, index: usize) -> ObjectParser<'a> {
        let context = self.context.child(PathSegment::Index(index));
        let element = self.array.and_then(|array| array.get(index));
        let parser = match element {
            Some(value) => ObjectParser::from_value(context, value),
            None => ObjectParser::new(context, None),
        };
        parser.with_unparsed_keys(self.unparsed)
    }

    /// Parse the record at `index`
    pub fn parse<T: Parsable + Default>(&self, index: usize) -> Option<T> {
        self.object_parser(index).parse_self()
    }

    /// Parse every element; elements that are not objects are reported and skipped
    pub fn parse_all<T: Parsable + Default>(&self) -> Option<Vec<T>> {
        if !self.exists() {
            return None;
        }
        Some((0..self.len()).filter_map(|index| self.parse(index)).collect())
    }
}
