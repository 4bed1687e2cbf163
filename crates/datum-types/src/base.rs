//! Timestamped event shape embedded by every datum

use chrono::{DateTime, TimeDelta, Utc};
use datum_ir::Timestamp;
use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use crate::association::Association;
use crate::origin::Origin;
use crate::time;

pub const TIMEZONE_OFFSET_MAXIMUM: i64 = 7 * 24 * 60;
pub const TIMEZONE_OFFSET_MINIMUM: i64 = -TIMEZONE_OFFSET_MAXIMUM;
pub const CLOCK_DRIFT_OFFSET_MAXIMUM: i64 = 24 * 60 * 60 * 1000;
pub const CLOCK_DRIFT_OFFSET_MINIMUM: i64 = -CLOCK_DRIFT_OFFSET_MAXIMUM;
pub const TAGS_LENGTH_MAXIMUM: usize = 100;
pub const TAG_LENGTH_MAXIMUM: usize = 100;
pub const ASSOCIATIONS_LENGTH_MAXIMUM: usize = 100;

/// Local device time without offset
pub const DEVICE_TIME_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$";

/// Fields common to every datum
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    /// Assigned by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Assigned by the store
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "time::serialize")]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_drift_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<Association>>,
}

impl Parsable for Base {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.kind = parser.string("type");
        self.time = parser.timestamp("time");
        self.timezone_offset = parser.int("timezoneOffset");
        self.clock_drift_offset = parser.int("clockDriftOffset");
        self.device_id = parser.string("deviceId");
        self.device_time = parser.string("deviceTime");
        self.tags = parser.string_array("tags");
        self.origin = parser.parse("origin");
        self.associations = parser.parse_array("associations");
    }
}

impl Validatable for Base {
    fn validate(&self, validator: &Validator) {
        validator.string("type", self.kind.as_deref()).exists().not_empty();
        validator
            .time("time", time::to_utc(self.time.as_ref()))
            .exists()
            .before_now(TimeDelta::days(1));
        validator
            .int("timezoneOffset", self.timezone_offset)
            .in_range(TIMEZONE_OFFSET_MINIMUM, TIMEZONE_OFFSET_MAXIMUM);
        validator
            .int("clockDriftOffset", self.clock_drift_offset)
            .warn_not_in_range(CLOCK_DRIFT_OFFSET_MINIMUM, CLOCK_DRIFT_OFFSET_MAXIMUM);
        validator.string("deviceId", self.device_id.as_deref()).not_empty();
        validator
            .string("deviceTime", self.device_time.as_deref())
            .matches_pattern(DEVICE_TIME_PATTERN);
        validator
            .string_array("tags", self.tags.as_deref())
            .length_less_than_or_equal_to(TAGS_LENGTH_MAXIMUM)
            .each_not_empty()
            .each_length_less_than_or_equal_to(TAG_LENGTH_MAXIMUM);
        validator
            .validating("origin", self.origin.as_ref().map(|o| o as &dyn Validatable))
            .validate();
        validator
            .validating_array("associations", self.associations.as_deref())
            .length_less_than_or_equal_to(ASSOCIATIONS_LENGTH_MAXIMUM)
            .validate_each();
    }
}

impl Normalizable for Base {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.time = self.time.as_ref().map(time::normalize);
        if let Some(origin) = &mut self.origin {
            origin.normalize(&normalizer.with_reference("origin"));
        }
    }
}
