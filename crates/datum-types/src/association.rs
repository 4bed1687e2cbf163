use datum_structure::{ObjectParser, Parsable, Validatable, Validator};
use serde::Serialize;

pub const ASSOCIATION_TYPES: [&str; 4] = ["blob", "datum", "image", "url"];

const URL_PATTERN: &str = "^https?://";

/// Link from a record to another stored object or an external URL
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Parsable for Association {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.kind = parser.string("type");
        self.id = parser.string("id");
        self.url = parser.string("url");
        self.reason = parser.string("reason");
    }
}

impl Validatable for Association {
    fn validate(&self, validator: &Validator) {
        validator
            .string("type", self.kind.as_deref())
            .exists()
            .one_of(&ASSOCIATION_TYPES);

        match self.kind.as_deref() {
            Some("blob" | "datum" | "image") => {
                validator.string("id", self.id.as_deref()).exists().not_empty();
                validator.string("url", self.url.as_deref()).not_exists();
            }
            Some("url") => {
                validator.string("id", self.id.as_deref()).not_exists();
                validator
                    .string("url", self.url.as_deref())
                    .exists()
                    .matches_pattern(URL_PATTERN);
            }
            _ => {}
        }

        validator
            .string("reason", self.reason.as_deref())
            .not_empty()
            .length_less_than_or_equal_to(1000);
    }
}
