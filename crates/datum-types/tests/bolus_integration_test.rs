//! Integration tests for bolus decoding and validation

use datum_ir::Value;
use datum_structure::{Normalizable, Normalizer, UnparsedKeys, Validatable, Validator};
use datum_types::bolus::{Bolus, Combination, Extended};
use datum_types::{Datum, DatumDecoder};
use datum_validation::{ErrorCode, ValidationContext};
use serde_json::json;

fn decode(source: serde_json::Value) -> (Option<Datum>, ValidationContext) {
    let decoder = DatumDecoder::new().unwrap();
    let context = ValidationContext::new();
    let datum = decoder.decode_value(&context, &Value::from(source), UnparsedKeys::Error);
    (datum, context)
}

fn validate(datum: &Datum) -> ValidationContext {
    let context = ValidationContext::new();
    datum.validate(&Validator::new(context.with_meta(datum.meta())));
    context
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
fn test_combination_reports_every_violation_in_one_pass() {
    let (datum, parse_context) = decode(json!({
        "type": "bolus",
        "subType": "dual/square",
        "time": "2024-03-01T10:00:00Z",
        "normal": 250.1,
        "expectedNormal": 250.1,
        "duration": null,
        "expectedDuration": 86_400_001
    }));
    assert!(!parse_context.has_error());

    let datum = datum.unwrap();
    assert!(matches!(datum, Datum::Bolus(Bolus::Combination(_))));

    let context = validate(&datum);
    assert_eq!(
        located(&context),
        vec![
            ("/normal".to_string(), ErrorCode::OutOfRange, "value 250.1 is not between 0 and 100".to_string()),
            (
                "/expectedNormal".to_string(),
                ErrorCode::OutOfRange,
                "value 250.1 is not between 0 and 100".to_string()
            ),
            ("/duration".to_string(), ErrorCode::NotExists, "value does not exist".to_string()),
            (
                "/expectedDuration".to_string(),
                ErrorCode::OutOfRange,
                "value 86400001 is not between 0 and 86400000".to_string()
            ),
            ("/extended".to_string(), ErrorCode::NotExists, "value does not exist".to_string()),
            ("/expectedDuration".to_string(), ErrorCode::Exists, "value exists".to_string()),
        ]
    );

    let meta = json!({"type": "bolus", "subType": "dual/square"});
    assert!(context.result().errors.iter().all(|e| e.meta.as_ref() == Some(&meta)));
}

#[test]
fn test_normal_narrowed_by_expected() {
    let (datum, _) = decode(json!({
        "type": "bolus",
        "subType": "normal",
        "time": "2024-03-01T10:00:00Z",
        "normal": 80,
        "expectedNormal": 60
    }));
    let context = validate(&datum.unwrap());

    assert_eq!(
        located(&context),
        vec![("/normal".to_string(), ErrorCode::OutOfRange, "value 80 is not between 0 and 60".to_string())]
    );

    let (datum, _) = decode(json!({
        "type": "bolus",
        "subType": "normal",
        "time": "2024-03-01T10:00:00Z",
        "normal": 80
    }));
    assert!(!validate(&datum.unwrap()).has_error());
}

#[test]
fn test_square_linkage_is_satisfied_by_both_expected_fields() {
    let (datum, _) = decode(json!({
        "type": "bolus",
        "subType": "square",
        "time": "2024-03-01T10:00:00Z",
        "duration": 1_800_000,
        "expectedDuration": 3_600_000,
        "extended": 1.5,
        "expectedExtended": 3.0
    }));
    let datum = datum.unwrap();
    assert!(matches!(&datum, Datum::Bolus(Bolus::Extended(Extended { .. }))));
    assert!(!validate(&datum).has_error());
}

#[test]
fn test_square_linkage_missing_expected_duration() {
    let (datum, _) = decode(json!({
        "type": "bolus",
        "subType": "square",
        "time": "2024-03-01T10:00:00Z",
        "duration": 1_800_000,
        "extended": 1.5,
        "expectedExtended": 3.0
    }));

    assert_eq!(
        located(&validate(&datum.unwrap())),
        vec![("/expectedDuration".to_string(), ErrorCode::NotExists, "value does not exist".to_string())]
    );
}

#[test]
fn test_unknown_sub_type_stops_before_fields() {
    let (datum, context) = decode(json!({
        "type": "bolus",
        "subType": "bogus",
        "normal": "not even a number"
    }));

    assert!(datum.is_none());
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
fn test_delivery_context_and_type_errors() {
    let (datum, context) = decode(json!({
        "type": "bolus",
        "subType": "normal",
        "time": "2024-03-01T10:00:00Z",
        "normal": "two",
        "deliveryContext": "psychic"
    }));
    assert_eq!(
        located(&context),
        vec![("/normal".to_string(), ErrorCode::TypeNotFloat, "type is not float, but string".to_string())]
    );

    let codes: Vec<(String, ErrorCode)> = located(&validate(&datum.unwrap()))
        .into_iter()
        .map(|(pointer, code, _)| (pointer, code))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("/deliveryContext".to_string(), ErrorCode::NotAllowed),
            ("/normal".to_string(), ErrorCode::NotExists),
        ]
    );
}

#[test]
fn test_round_trip_preserves_present_fields() {
    let source = json!({
        "type": "bolus",
        "subType": "dual/square",
        "time": "2024-03-01T10:00:00Z",
        "timezoneOffset": -300,
        "deviceId": "pump-1",
        "deviceTime": "2024-03-01T05:00:00",
        "tags": ["lunch"],
        "origin": {"name": "uploader", "type": "device", "version": "1.2"},
        "associations": [{"type": "url", "url": "https://example.com/x"}],
        "deliveryContext": "device",
        "normal": 2.5,
        "expectedNormal": 3.5,
        "duration": 1_800_000,
        "expectedDuration": 3_600_000,
        "extended": 1.25,
        "expectedExtended": 2.75
    });
    let (datum, context) = decode(source.clone());

    assert!(!context.has_error());
    assert_eq!(serde_json::to_value(datum.unwrap()).unwrap(), source);
}

#[test]
fn test_round_trip_keeps_source_number_and_time_forms() {
    let source = json!({
        "type": "bolus",
        "subType": "dual/square",
        "time": "2024-03-01T10:00:00.5+00:00",
        "origin": {"name": "uploader", "time": "2024-03-01T12:00:00+02:00"},
        "normal": 2,
        "expectedNormal": 2.0,
        "duration": 1_800_000,
        "expectedDuration": 3_600_000,
        "extended": 1,
        "expectedExtended": 3
    });
    let (datum, context) = decode(source.clone());

    assert!(!context.has_error());
    let datum = datum.unwrap();
    assert!(!validate(&datum).has_error());
    assert_eq!(serde_json::to_value(&datum).unwrap(), source);
}

#[test]
fn test_normalize_rewrites_source_time_text() {
    let (datum, _) = decode(json!({
        "type": "bolus",
        "subType": "normal",
        "time": "2024-03-01T10:00:00.5+00:00",
        "normal": 2
    }));
    let mut datum = datum.unwrap();
    datum.normalize(&Normalizer::default());

    let body = serde_json::to_value(&datum).unwrap();
    assert_eq!(body["time"], json!("2024-03-01T10:00:00Z"));
    assert_eq!(body["normal"], json!(2));
}

#[test]
fn test_normalize_is_idempotent() {
    let (datum, _) = decode(json!({
        "type": "bolus",
        "subType": "dual/square",
        "time": "2024-03-01T12:00:00.999+02:00",
        "origin": {"time": "2024-03-01T12:00:00.25+02:00"},
        "normal": 1.0,
        "duration": 0,
        "extended": 1.0
    }));
    let mut datum = datum.unwrap();
    assert!(!validate(&datum).has_error());

    datum.normalize(&Normalizer::default());
    let once = datum.clone();
    datum.normalize(&Normalizer::default());

    assert_eq!(datum, once);
    let Datum::Bolus(Bolus::Combination(Combination { bolus, .. })) = &datum else {
        panic!("expected a combination bolus");
    };
    assert_eq!(
        serde_json::to_value(&bolus.base).unwrap()["time"],
        json!("2024-03-01T10:00:00Z")
    );
}
