//! Variant registry and discriminator dispatch
//!
//! A registry maps the values of a secondary discriminator (e.g. `subType`) to
//! constructors of empty records, under one fixed primary discriminator value
//! (e.g. `type = "bolus"`). Registries are built once, validated at build
//! time, and never mutated afterwards.

use std::collections::HashSet;

use datum_validation::{ValidationError, format_string_list, quote};
use tracing::debug;

use crate::parser::{ObjectParser, Parsable};
use crate::{Error, Result};

/// Zero-argument factory producing an empty record
pub type Constructor<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Immutable mapping from sub-type value to record constructor
pub struct VariantRegistry<T> {
    type_key: String,
    type_value: String,
    sub_type_key: String,
    variants: Vec<(String, Constructor<T>)>,
}

impl<T> std::fmt::Debug for VariantRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("type_key", &self.type_key)
            .field("type_value", &self.type_value)
            .field("sub_type_key", &self.sub_type_key)
            .field("variants", &self.discriminators())
            .finish()
    }
}

impl<T> VariantRegistry<T> {
    /// Start a registry for records tagged `type_key = type_value`, dispatched on `sub_type_key`
    pub fn builder(
        type_key: impl Into<String>,
        type_value: impl Into<String>,
        sub_type_key: impl Into<String>,
    ) -> VariantRegistryBuilder<T> {
        VariantRegistryBuilder {
            type_key: type_key.into(),
            type_value: type_value.into(),
            sub_type_key: sub_type_key.into(),
            variants: Vec::new(),
        }
    }

    #[must_use]
    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    #[must_use]
    pub fn type_value(&self) -> &str {
        &self.type_value
    }

    #[must_use]
    pub fn sub_type_key(&self) -> &str {
        &self.sub_type_key
    }

    /// Registered sub-type values, in registration order
    #[must_use]
    pub fn discriminators(&self) -> Vec<&str> {
        self.variants.iter().map(|(value, _)| value.as_str()).collect()
    }

    #[must_use]
    pub fn contains(&self, sub_type: &str) -> bool {
        self.variants.iter().any(|(value, _)| value == sub_type)
    }

    /// Construct an empty record for `sub_type`
    #[must_use]
    pub fn instantiate(&self, sub_type: &str) -> Option<T> {
        self.variants
            .iter()
            .find(|(value, _)| value == sub_type)
            .map(|(_, constructor)| constructor())
    }
}

impl<T: Parsable> VariantRegistry<T> {
    /// Select, construct and parse the variant named by the source's discriminators.
    ///
    /// Both discriminators are checked before any variant is constructed, so an
    /// unknown sub-type never partially populates a record. Every failure is
    /// reported to the parser's context and yields `None`.
    pub fn dispatch(&self, parser: &mut ObjectParser<'_>) -> Option<T> {
        if !parser.exists() {
            return None;
        }

        let type_value = parser.string(&self.type_key);
        let Some(type_value) = type_value else {
            if !parser.has_value(&self.type_key) {
                parser
                    .context()
                    .child(self.type_key.as_str())
                    .report_error(ValidationError::not_exists());
            }
            return None;
        };
        if type_value != self.type_value {
            parser
                .context()
                .child(self.type_key.as_str())
                .report_error(ValidationError::not_one_of(
                    quote(&type_value),
                    format_string_list(&[self.type_value.as_str()]),
                ));
            return None;
        }

        let sub_type = parser.string(&self.sub_type_key);
        let Some(sub_type) = sub_type else {
            if !parser.has_value(&self.sub_type_key) {
                parser
                    .context()
                    .child(self.sub_type_key.as_str())
                    .report_error(ValidationError::not_exists());
            }
            return None;
        };

        let Some(mut record) = self.instantiate(&sub_type) else {
            debug!(kind = %type_value, sub_type = %sub_type, "unknown variant");
            parser
                .context()
                .child(self.sub_type_key.as_str())
                .report_error(ValidationError::not_one_of(
                    quote(&sub_type),
                    format_string_list(&self.discriminators()),
                ));
            return None;
        };

        debug!(kind = %type_value, sub_type = %sub_type, "dispatching variant");
        record.parse(parser);
        Some(record)
    }
}

/// Collects variants and validates them into a [`VariantRegistry`]
pub struct VariantRegistryBuilder<T> {
    type_key: String,
    type_value: String,
    sub_type_key: String,
    variants: Vec<(String, Constructor<T>)>,
}

impl<T> VariantRegistryBuilder<T> {
    /// Register a constructor for `sub_type`
    #[must_use]
    pub fn variant(
        mut self,
        sub_type: impl Into<String>,
        constructor: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        self.variants.push((sub_type.into(), Box::new(constructor)));
        self
    }

    /// Validate and freeze the registry.
    ///
    /// # Errors
    ///
    /// Returns an error when a discriminator key or value is empty, when no
    /// variant is registered, or when a sub-type value is registered twice.
    pub fn build(self) -> Result<VariantRegistry<T>> {
        for key in [&self.type_key, &self.type_value, &self.sub_type_key] {
            if key.is_empty() {
                return Err(Error::EmptyDiscriminator {
                    registry: self.type_value.clone(),
                });
            }
        }
        if self.variants.is_empty() {
            return Err(Error::NoVariants {
                registry: self.type_value,
            });
        }

        let mut seen = HashSet::new();
        for (value, _) in &self.variants {
            if value.is_empty() {
                return Err(Error::EmptyDiscriminator {
                    registry: self.type_value.clone(),
                });
            }
            if !seen.insert(value.as_str()) {
                return Err(Error::DuplicateVariant {
                    registry: self.type_value.clone(),
                    value: value.clone(),
                });
            }
        }

        Ok(VariantRegistry {
            type_key: self.type_key,
            type_value: self.type_value,
            sub_type_key: self.sub_type_key,
            variants: self.variants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datum_ir::Value;
    use datum_validation::{ErrorCode, ValidationContext};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default, PartialEq)]
    struct Shape {
        kind: &'static str,
        amount: Option<f64>,
    }

    impl Parsable for Shape {
        fn parse(&mut self, parser: &mut ObjectParser<'_>) {
            self.amount = parser.float("amount");
        }
    }

    fn registry() -> VariantRegistry<Shape> {
        VariantRegistry::builder("type", "bolus", "subType")
            .variant("normal", || Shape { kind: "normal", amount: None })
            .variant("square", || Shape { kind: "square", amount: None })
            .variant("dual/square", || Shape { kind: "dual/square", amount: None })
            .build()
            .unwrap()
    }

    fn dispatch(json: serde_json::Value) -> (Option<Shape>, ValidationContext) {
        let value = Value::from(json);
        let context = ValidationContext::new();
        let mut parser = ObjectParser::from_value(context.clone(), &value);
        let shape = registry().dispatch(&mut parser);
        (shape, context)
    }

    fn located(context: &ValidationContext) -> Vec<(String, ErrorCode, String)> {
        context
            .result()
            .errors
            .iter()
            .map(|e| (e.pointer(), e.code, e.detail.clone()))
            .collect()
    }

    #[test]
    fn test_dispatch_selects_variant() {
        let (shape, context) = dispatch(json!({"type": "bolus", "subType": "square", "amount": 2}));

        assert_eq!(shape, Some(Shape { kind: "square", amount: Some(2.0) }));
        assert!(!context.has_error());
    }

    #[test]
    fn test_only_selected_constructor_runs() {
        let calls: Arc<Vec<AtomicUsize>> = Arc::new((0..3).map(|_| AtomicUsize::new(0)).collect());
        let counter = |index: usize, kind: &'static str| {
            let calls = Arc::clone(&calls);
            move || {
                calls[index].fetch_add(1, Ordering::SeqCst);
                Shape { kind, amount: None }
            }
        };
        let registry = VariantRegistry::builder("type", "bolus", "subType")
            .variant("normal", counter(0, "normal"))
            .variant("square", counter(1, "square"))
            .variant("dual/square", counter(2, "dual/square"))
            .build()
            .unwrap();

        let value = Value::from(json!({"type": "bolus", "subType": "square"}));
        let mut parser = ObjectParser::from_value(ValidationContext::new(), &value);
        let shape = registry.dispatch(&mut parser).unwrap();

        assert_eq!(shape.kind, "square");
        let counts: Vec<usize> = calls.iter().map(|c| c.load(Ordering::SeqCst)).collect();
        assert_eq!(counts, vec![0, 1, 0]);
    }

    #[test]
    fn test_missing_type() {
        let (shape, context) = dispatch(json!({"subType": "normal"}));

        assert!(shape.is_none());
        assert_eq!(
            located(&context),
            vec![("/type".to_string(), ErrorCode::NotExists, "value does not exist".to_string())]
        );
    }

    #[test]
    fn test_wrong_type() {
        let (shape, context) = dispatch(json!({"type": "basal", "subType": "normal"}));

        assert!(shape.is_none());
        assert_eq!(
            located(&context),
            vec![(
                "/type".to_string(),
                ErrorCode::NotAllowed,
                r#"value "basal" is not one of ["bolus"]"#.to_string()
            )]
        );
    }

    #[test]
    fn test_missing_sub_type() {
        let (shape, context) = dispatch(json!({"type": "bolus"}));

        assert!(shape.is_none());
        assert_eq!(located(&context)[0].0, "/subType");
        assert_eq!(located(&context)[0].1, ErrorCode::NotExists);
    }

    #[test]
    fn test_unknown_sub_type_lists_every_variant() {
        let (shape, context) = dispatch(json!({"type": "bolus", "subType": "bogus", "amount": 1}));

        assert!(shape.is_none());
        assert_eq!(
            located(&context),
            vec![(
                "/subType".to_string(),
                ErrorCode::NotAllowed,
                r#"value "bogus" is not one of ["normal", "square", "dual/square"]"#.to_string()
            )]
        );
    }

    #[test]
    fn test_mistyped_discriminator_reports_once() {
        let (shape, context) = dispatch(json!({"type": 7}));

        assert!(shape.is_none());
        let errors = located(&context);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].1, ErrorCode::TypeNotString);
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let result = VariantRegistry::builder("type", "bolus", "subType")
            .variant("normal", Shape::default)
            .variant("normal", Shape::default)
            .build();

        assert!(matches!(
            result,
            Err(Error::DuplicateVariant { ref value, .. }) if value == "normal"
        ));
    }

    #[test]
    fn test_build_rejects_empty_and_missing() {
        let empty = VariantRegistry::builder("type", "", "subType")
            .variant("normal", Shape::default)
            .build();
        assert!(matches!(empty, Err(Error::EmptyDiscriminator { .. })));

        let none = VariantRegistry::<Shape>::builder("type", "bolus", "subType").build();
        assert!(matches!(none, Err(Error::NoVariants { .. })));

        let blank = VariantRegistry::builder("type", "bolus", "subType")
            .variant("", Shape::default)
            .build();
        assert!(matches!(blank, Err(Error::EmptyDiscriminator { .. })));
    }

    #[test]
    fn test_discriminators_keep_registration_order() {
        let registry = registry();
        assert_eq!(registry.discriminators(), vec!["normal", "square", "dual/square"]);
        assert!(registry.contains("dual/square"));
        assert!(registry.instantiate("extended").is_none());
    }
}
