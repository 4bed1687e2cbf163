//! Basal family, dispatched on `deliveryType`

mod scheduled;
mod suspend;
mod temporary;

pub use self::scheduled::Scheduled;
pub use self::suspend::Suspend;
pub use self::temporary::Temporary;

use datum_structure::{
    Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator, VariantRegistry,
};
use serde::Serialize;

use crate::base::Base;
use crate::linked::LinkedPair;

pub const TYPE: &str = "basal";
pub const DELIVERY_TYPE_KEY: &str = "deliveryType";

pub const DURATION: LinkedPair<i64> = LinkedPair::new("duration", "expectedDuration", 0, 604_800_000);
pub const RATE_MINIMUM: f64 = 0.0;
pub const RATE_MAXIMUM: f64 = 100.0;

/// Fields shared by every basal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasalBase {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<i64>,
}

impl BasalBase {
    pub fn validate_as(&self, validator: &Validator, delivery_type: &str) {
        self.base.validate(validator);
        validator
            .string(DELIVERY_TYPE_KEY, self.delivery_type.as_deref())
            .exists()
            .equal_to(delivery_type);
        DURATION.validate(validator, self.duration, self.expected_duration);
    }
}

impl Parsable for BasalBase {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.base.parse(parser);
        self.delivery_type = parser.string(DELIVERY_TYPE_KEY);
        self.duration = parser.int(DURATION.primary);
        self.expected_duration = parser.int(DURATION.expected);
    }
}

impl Normalizable for BasalBase {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.base.normalize(normalizer);
    }
}

/// Closed set of basal variants
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Basal {
    Scheduled(Scheduled),
    Temporary(Temporary),
    Suspend(Suspend),
}

impl Basal {
    #[must_use]
    pub fn basal(&self) -> &BasalBase {
        match self {
            Basal::Scheduled(scheduled) => &scheduled.basal,
            Basal::Temporary(temporary) => &temporary.basal,
            Basal::Suspend(suspend) => &suspend.basal,
        }
    }

    pub fn basal_mut(&mut self) -> &mut BasalBase {
        match self {
            Basal::Scheduled(scheduled) => &mut scheduled.basal,
            Basal::Temporary(temporary) => &mut temporary.basal,
            Basal::Suspend(suspend) => &mut suspend.basal,
        }
    }

    #[must_use]
    pub fn delivery_type(&self) -> &'static str {
        match self {
            Basal::Scheduled(_) => Scheduled::DELIVERY_TYPE,
            Basal::Temporary(_) => Temporary::DELIVERY_TYPE,
            Basal::Suspend(_) => Suspend::DELIVERY_TYPE,
        }
    }
}

impl Parsable for Basal {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        match self {
            Basal::Scheduled(scheduled) => scheduled.parse(parser),
            Basal::Temporary(temporary) => temporary.parse(parser),
            Basal::Suspend(suspend) => suspend.parse(parser),
        }
    }
}

impl Validatable for Basal {
    fn validate(&self, validator: &Validator) {
        match self {
            Basal::Scheduled(scheduled) => scheduled.validate(validator),
            Basal::Temporary(temporary) => temporary.validate(validator),
            Basal::Suspend(suspend) => suspend.validate(validator),
        }
    }
}

impl Normalizable for Basal {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.basal_mut().normalize(normalizer);
    }
}

/// Registry of every basal variant
///
/// # Errors
///
/// Returns an error when the registry is malformed.
pub fn registry() -> datum_structure::Result<VariantRegistry<Basal>> {
    VariantRegistry::builder("type", TYPE, DELIVERY_TYPE_KEY)
        .variant(Scheduled::DELIVERY_TYPE, || Basal::Scheduled(Scheduled::default()))
        .variant(Temporary::DELIVERY_TYPE, || Basal::Temporary(Temporary::default()))
        .variant(Suspend::DELIVERY_TYPE, || Basal::Suspend(Suspend::default()))
        .build()
}
