use datum_ir::Number;
use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use super::extended::ExtendedFields;
use super::{BolusBase, NORMAL};

/// Immediate portion followed by an extended portion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    #[serde(flatten)]
    pub bolus: BolusBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_normal: Option<Number>,
    #[serde(flatten)]
    pub delivery: ExtendedFields,
}

impl Combination {
    pub const SUB_TYPE: &'static str = "dual/square";
}

impl Parsable for Combination {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.bolus.parse(parser);
        self.normal = parser.number(NORMAL.primary);
        self.expected_normal = parser.number(NORMAL.expected);
        self.delivery.parse(parser);
    }
}

impl Validatable for Combination {
    fn validate(&self, validator: &Validator) {
        self.bolus.validate_as(validator, Self::SUB_TYPE);
        NORMAL.validate(validator, self.normal, self.expected_normal);
        self.delivery.validate(validator);
    }
}

impl Normalizable for Combination {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.bolus.normalize(normalizer);
    }
}
