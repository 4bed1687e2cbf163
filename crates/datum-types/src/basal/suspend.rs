use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use super::BasalBase;

/// Delivery suspended; carries only the duration pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suspend {
    #[serde(flatten)]
    pub basal: BasalBase,
}

impl Suspend {
    pub const DELIVERY_TYPE: &'static str = "suspend";
}

impl Parsable for Suspend {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.basal.parse(parser);
    }
}

impl Validatable for Suspend {
    fn validate(&self, validator: &Validator) {
        self.basal.validate_as(validator, Self::DELIVERY_TYPE);
    }
}

impl Normalizable for Suspend {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.basal.normalize(normalizer);
    }
}
