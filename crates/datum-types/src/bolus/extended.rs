use datum_ir::Number;
use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use super::{BolusBase, DURATION, EXTENDED};
use crate::linked::validate_expected_linkage;

/// Duration and extended amount pairs, tied by the expected-field linkage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_extended: Option<Number>,
}

impl Parsable for ExtendedFields {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.duration = parser.int(DURATION.primary);
        self.expected_duration = parser.int(DURATION.expected);
        self.extended = parser.number(EXTENDED.primary);
        self.expected_extended = parser.number(EXTENDED.expected);
    }
}

impl Validatable for ExtendedFields {
    fn validate(&self, validator: &Validator) {
        DURATION.validate(validator, self.duration, self.expected_duration);
        EXTENDED.validate(validator, self.extended, self.expected_extended);
        validate_expected_linkage(
            validator,
            DURATION.expected,
            self.expected_duration.is_some(),
            self.expected_extended.is_some(),
        );
    }
}

/// Bolus delivered over a duration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extended {
    #[serde(flatten)]
    pub bolus: BolusBase,
    #[serde(flatten)]
    pub delivery: ExtendedFields,
}

impl Extended {
    pub const SUB_TYPE: &'static str = "square";
}

impl Parsable for Extended {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.bolus.parse(parser);
        self.delivery.parse(parser);
    }
}

impl Validatable for Extended {
    fn validate(&self, validator: &Validator) {
        self.bolus.validate_as(validator, Self::SUB_TYPE);
        self.delivery.validate(validator);
    }
}

impl Normalizable for Extended {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.bolus.normalize(normalizer);
    }
}
