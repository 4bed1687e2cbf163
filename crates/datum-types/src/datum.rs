//! Top-level datum and its two-level decoder

use datum_ir::Value;
use datum_structure::{
    Normalizable, Normalizer, ObjectParser, UnparsedKeys, Validatable, Validator,
    VariantRegistry,
};
use datum_validation::{ValidationContext, ValidationError, format_string_list, quote};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::base::Base;
use crate::basal::{self, Basal};
use crate::bolus::{self, Bolus};

/// Values accepted for the top-level `type` key
pub const TYPES: [&str; 2] = [basal::TYPE, bolus::TYPE];

/// Any decodable datum
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Datum {
    Bolus(Bolus),
    Basal(Basal),
}

impl Datum {
    #[must_use]
    pub fn base(&self) -> &Base {
        match self {
            Datum::Bolus(bolus) => &bolus.bolus().base,
            Datum::Basal(basal) => &basal.basal().base,
        }
    }

    pub fn base_mut(&mut self) -> &mut Base {
        match self {
            Datum::Bolus(bolus) => &mut bolus.bolus_mut().base,
            Datum::Basal(basal) => &mut basal.basal_mut().base,
        }
    }

    /// Discriminators attached to every error reported for this datum
    #[must_use]
    pub fn meta(&self) -> serde_json::Value {
        match self {
            Datum::Bolus(bolus) => json!({"type": bolus::TYPE, "subType": bolus.sub_type()}),
            Datum::Basal(basal) => json!({"type": basal::TYPE, "deliveryType": basal.delivery_type()}),
        }
    }
}

impl Validatable for Datum {
    fn validate(&self, validator: &Validator) {
        match self {
            Datum::Bolus(bolus) => bolus.validate(validator),
            Datum::Basal(basal) => basal.validate(validator),
        }
    }
}

impl Normalizable for Datum {
    fn normalize(&mut self, normalizer: &Normalizer) {
        match self {
            Datum::Bolus(bolus) => bolus.normalize(normalizer),
            Datum::Basal(basal) => basal.normalize(normalizer),
        }
    }
}

/// Routes a source to the bolus or basal registry by its `type`
#[derive(Debug)]
pub struct DatumDecoder {
    bolus: VariantRegistry<Bolus>,
    basal: VariantRegistry<Basal>,
}

impl DatumDecoder {
    /// Decoder over every known family
    ///
    /// # Errors
    ///
    /// Returns an error when a family registry is malformed.
    pub fn new() -> datum_structure::Result<Self> {
        Ok(Self {
            bolus: bolus::registry()?,
            basal: basal::registry()?,
        })
    }

    /// `(type, discriminator key, discriminator values)` for every family
    #[must_use]
    pub fn variants(&self) -> Vec<(&str, &str, Vec<&str>)> {
        vec![
            (self.basal.type_value(), self.basal.sub_type_key(), self.basal.discriminators()),
            (self.bolus.type_value(), self.bolus.sub_type_key(), self.bolus.discriminators()),
        ]
    }

    /// Decode the record read by `parser`; failures are reported to its context
    pub fn decode(&self, parser: &mut ObjectParser<'_>) -> Option<Datum> {
        if !parser.exists() {
            return None;
        }

        let Some(kind) = parser.string("type") else {
            if !parser.has_value("type") {
                parser
                    .context()
                    .child("type")
                    .report_error(ValidationError::not_exists());
            }
            return None;
        };

        match kind.as_str() {
            bolus::TYPE => self.bolus.dispatch(parser).map(Datum::Bolus),
            basal::TYPE => self.basal.dispatch(parser).map(Datum::Basal),
            other => {
                debug!(kind = other, "unknown datum type");
                parser
                    .context()
                    .child("type")
                    .report_error(ValidationError::not_one_of(quote(other), format_string_list(&TYPES)));
                None
            }
        }
    }

    /// Decode a whole source value and report its unconsumed keys
    pub fn decode_value(&self, context: &ValidationContext, value: &Value, unparsed: UnparsedKeys) -> Option<Datum> {
        let mut parser = ObjectParser::from_value(context.clone(), value).with_unparsed_keys(unparsed);
        let datum = self.decode(&mut parser)?;
        parser.report_not_parsed();
        Some(datum)
    }
}
