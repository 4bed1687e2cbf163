use datum_ir::Number;
use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use super::{BasalBase, RATE_MAXIMUM, RATE_MINIMUM};

/// Basal following the pump's programmed schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduled {
    #[serde(flatten)]
    pub basal: BasalBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_name: Option<String>,
}

impl Scheduled {
    pub const DELIVERY_TYPE: &'static str = "scheduled";
}

impl Parsable for Scheduled {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.basal.parse(parser);
        self.rate = parser.number("rate");
        self.schedule_name = parser.string("scheduleName");
    }
}

impl Validatable for Scheduled {
    fn validate(&self, validator: &Validator) {
        self.basal.validate_as(validator, Self::DELIVERY_TYPE);
        validator
            .float("rate", self.rate.map(f64::from))
            .exists()
            .in_range(RATE_MINIMUM, RATE_MAXIMUM);
        validator
            .string("scheduleName", self.schedule_name.as_deref())
            .not_empty();
    }
}

impl Normalizable for Scheduled {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.basal.normalize(normalizer);
    }
}
