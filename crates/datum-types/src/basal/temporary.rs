use datum_ir::Number;
use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use super::{BasalBase, RATE_MAXIMUM, RATE_MINIMUM};

pub const PERCENT_MINIMUM: f64 = 0.0;
pub const PERCENT_MAXIMUM: f64 = 10.0;

/// Temporary override of the scheduled rate
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Temporary {
    #[serde(flatten)]
    pub basal: BasalBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<Number>,
}

impl Temporary {
    pub const DELIVERY_TYPE: &'static str = "temp";
}

impl Parsable for Temporary {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.basal.parse(parser);
        self.rate = parser.number("rate");
        self.percent = parser.number("percent");
    }
}

impl Validatable for Temporary {
    fn validate(&self, validator: &Validator) {
        self.basal.validate_as(validator, Self::DELIVERY_TYPE);
        validator
            .float("rate", self.rate.map(f64::from))
            .exists()
            .in_range(RATE_MINIMUM, RATE_MAXIMUM);
        validator
            .float("percent", self.percent.map(f64::from))
            .in_range(PERCENT_MINIMUM, PERCENT_MAXIMUM);
    }
}

impl Normalizable for Temporary {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.basal.normalize(normalizer);
    }
}
