use datum_ir::Number;
use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use super::{BolusBase, NORMAL};

/// Immediate bolus
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Normal {
    #[serde(flatten)]
    pub bolus: BolusBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_normal: Option<Number>,
}

impl Normal {
    pub const SUB_TYPE: &'static str = "normal";
}

impl Parsable for Normal {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.bolus.parse(parser);
        self.normal = parser.number(NORMAL.primary);
        self.expected_normal = parser.number(NORMAL.expected);
    }
}

impl Validatable for Normal {
    fn validate(&self, validator: &Validator) {
        self.bolus.validate_as(validator, Self::SUB_TYPE);
        NORMAL.validate(validator, self.normal, self.expected_normal);
    }
}

impl Normalizable for Normal {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.bolus.normalize(normalizer);
    }
}
