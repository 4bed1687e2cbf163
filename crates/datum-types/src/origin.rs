use datum_ir::Timestamp;
use datum_structure::{Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

use crate::time;

pub const ORIGIN_TYPES: [&str; 3] = ["device", "manual", "service"];

/// Where a record came from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Origin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Parsable for Origin {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.id = parser.string("id");
        self.name = parser.string("name");
        self.kind = parser.string("type");
        self.time = parser.timestamp("time");
        self.version = parser.string("version");
    }
}

impl Validatable for Origin {
    fn validate(&self, validator: &Validator) {
        validator
            .string("id", self.id.as_deref())
            .not_empty()
            .length_less_than_or_equal_to(100);
        validator
            .string("name", self.name.as_deref())
            .not_empty()
            .length_less_than_or_equal_to(100);
        validator.string("type", self.kind.as_deref()).one_of(&ORIGIN_TYPES);
        validator
            .string("version", self.version.as_deref())
            .not_empty()
            .length_less_than_or_equal_to(100);
    }
}

impl Normalizable for Origin {
    fn normalize(&mut self, _normalizer: &Normalizer) {
        self.time = self.time.as_ref().map(time::normalize);
    }
}
