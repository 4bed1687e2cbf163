//! Timestamp helpers shared by records

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use datum_ir::Timestamp;
use serde::Serializer;

/// Serialize an optional timestamp as RFC 3339, `Z` for UTC
#[allow(clippy::ref_option)]
pub(crate) fn serialize<Tz, S>(value: &Option<DateTime<Tz>>, serializer: S) -> Result<S::Ok, S::Error>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    S: Serializer,
{
    match value {
        Some(time) => serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => serializer.serialize_none(),
    }
}

/// UTC, truncated to whole seconds; the source text is dropped
#[must_use]
pub fn normalize(time: &Timestamp) -> Timestamp {
    Timestamp::new(time.utc().trunc_subsecs(0).fixed_offset())
}

/// View of a source timestamp as UTC for time assertions
#[must_use]
pub fn to_utc(time: Option<&Timestamp>) -> Option<DateTime<Utc>> {
    time.map(Timestamp::utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_truncates_and_coerces() {
        let source = Timestamp::parse("2024-03-01T12:30:15.987+02:00").unwrap();
        let normalized = normalize(&source);

        assert_eq!(normalized.render(), "2024-03-01T10:30:15Z");
        assert_eq!(normalized.text(), None);
        assert_eq!(normalize(&normalized), normalized);
    }
}
