//! Bolus family, dispatched on `subType`

mod combination;
mod extended;
mod normal;

pub use self::combination::Combination;
pub use self::extended::{Extended, ExtendedFields};
pub use self::normal::Normal;

use datum_structure::{
    Normalizable, Normalizer, ObjectParser, Parsable, Validatable, Validator, VariantRegistry,
};
use serde::Serialize;

use crate::base::Base;
use crate::linked::LinkedPair;

pub const TYPE: &str = "bolus";
pub const SUB_TYPE_KEY: &str = "subType";

pub const DELIVERY_CONTEXTS: [&str; 5] = ["algorithm", "device", "oneButton", "remote", "undetermined"];

pub const NORMAL: LinkedPair<f64> = LinkedPair::new("normal", "expectedNormal", 0.0, 100.0);
pub const DURATION: LinkedPair<i64> = LinkedPair::new("duration", "expectedDuration", 0, 86_400_000);
pub const EXTENDED: LinkedPair<f64> = LinkedPair::new("extended", "expectedExtended", 0.0, 100.0);

/// Fields shared by every bolus
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BolusBase {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_context: Option<String>,
}

impl BolusBase {
    /// Shared checks, with `subType` pinned to the variant's value
    pub fn validate_as(&self, validator: &Validator, sub_type: &str) {
        self.base.validate(validator);
        validator
            .string(SUB_TYPE_KEY, self.sub_type.as_deref())
            .exists()
            .equal_to(sub_type);
        validator
            .string("deliveryContext", self.delivery_context.as_deref())
            .one_of(&DELIVERY_CONTEXTS);
    }
}

impl Parsable for BolusBase {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        self.base.parse(parser);
        self.sub_type = parser.string(SUB_TYPE_KEY);
        self.delivery_context = parser.string("deliveryContext");
    }
}

impl Normalizable for BolusBase {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.base.normalize(normalizer);
    }
}

/// Closed set of bolus variants
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bolus {
    Normal(Normal),
    Extended(Extended),
    Combination(Combination),
}

impl Bolus {
    #[must_use]
    pub fn bolus(&self) -> &BolusBase {
        match self {
            Bolus::Normal(normal) => &normal.bolus,
            Bolus::Extended(extended) => &extended.bolus,
            Bolus::Combination(combination) => &combination.bolus,
        }
    }

    pub fn bolus_mut(&mut self) -> &mut BolusBase {
        match self {
            Bolus::Normal(normal) => &mut normal.bolus,
            Bolus::Extended(extended) => &mut extended.bolus,
            Bolus::Combination(combination) => &mut combination.bolus,
        }
    }

    #[must_use]
    pub fn sub_type(&self) -> &'static str {
        match self {
            Bolus::Normal(_) => Normal::SUB_TYPE,
            Bolus::Extended(_) => Extended::SUB_TYPE,
            Bolus::Combination(_) => Combination::SUB_TYPE,
        }
    }
}

impl Parsable for Bolus {
    fn parse(&mut self, parser: &mut ObjectParser<'_>) {
        match self {
            Bolus::Normal(normal) => normal.parse(parser),
            Bolus::Extended(extended) => extended.parse(parser),
            Bolus::Combination(combination) => combination.parse(parser),
        }
    }
}

impl Validatable for Bolus {
    fn validate(&self, validator: &Validator) {
        match self {
            Bolus::Normal(normal) => normal.validate(validator),
            Bolus::Extended(extended) => extended.validate(validator),
            Bolus::Combination(combination) => combination.validate(validator),
        }
    }
}

impl Normalizable for Bolus {
    fn normalize(&mut self, normalizer: &Normalizer) {
        self.bolus_mut().normalize(normalizer);
    }
}

/// Registry of every bolus variant
///
/// # Errors
///
/// Returns an error when the registry is malformed.
pub fn registry() -> datum_structure::Result<VariantRegistry<Bolus>> {
    VariantRegistry::builder("type", TYPE, SUB_TYPE_KEY)
        .variant(Normal::SUB_TYPE, || Bolus::Normal(Normal::default()))
        .variant(Extended::SUB_TYPE, || Bolus::Extended(Extended::default()))
        .variant(Combination::SUB_TYPE, || Bolus::Combination(Combination::default()))
        .build()
}
