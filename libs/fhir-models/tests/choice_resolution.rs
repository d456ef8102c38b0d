//! Closed choice types: allow-lists, narrowing and exhaustive matching

mod test_support;

use ferrum_models::datatypes::*;
use ferrum_models::prelude::*;
use ferrum_models::resources::{
    Observation, ObservationEffective, ObservationValue, ParameterResource, ParameterValue,
    Parameters, ParametersParameter,
};
use ferrum_models::Error;
use rust_decimal::Decimal as RustDecimal;
use test_support::{loinc, loinc_coding, observation};

fn allowed_values() -> Vec<Box<dyn Node>> {
    vec![
        Box::new(
            Quantity::builder()
                .value(RustDecimal::new(5, 1))
                .build()
                .unwrap(),
        ),
        Box::new(loinc("LA6576-8")),
        Box::new(FhirString::of("positive").unwrap()),
        Box::new(Boolean::of(true).unwrap()),
        Box::new(Integer::of(3).unwrap()),
        Box::new(
            Range::builder()
                .low(Quantity::builder().value(RustDecimal::ONE).build().unwrap())
                .build()
                .unwrap(),
        ),
        Box::new(Period::builder().start("2024-01").build().unwrap()),
        Box::new(DateTime::parse("2024-01-02").unwrap()),
    ]
}

fn disallowed_values() -> Vec<Box<dyn Node>> {
    vec![
        // specialisations of allowed primitives are distinct types
        Box::new(PositiveInt::of(3).unwrap()),
        Box::new(UnsignedInt::of(3).unwrap()),
        Box::new(Code::of("positive").unwrap()),
        Box::new(Markdown::of("*positive*").unwrap()),
        Box::new(Date::parse("2024-01-02").unwrap()),
        Box::new(Uri::of("http://example.org").unwrap()),
        Box::new(Decimal::of(RustDecimal::ONE).unwrap()),
        Box::new(loinc_coding("8867-4")),
        Box::new(Reference::to("Patient/1").unwrap()),
        Box::new(
            Extension::builder()
                .url("http://example.org/ext")
                .value(true)
                .build()
                .unwrap(),
        ),
    ]
}

#[test]
fn test_allow_list_follows_declaration() {
    assert_eq!(
        ObservationValue::ALLOWED,
        &[
            "Quantity",
            "CodeableConcept",
            "string",
            "boolean",
            "integer",
            "Range",
            "Period",
            "dateTime"
        ]
    );
    assert_eq!(ObservationEffective::ALLOWED, &["dateTime", "Period"]);
    assert_eq!(ParameterResource::ALLOWED, &["Observation", "Parameters"]);
    assert!(!ParameterValue::ALLOWED.contains(&"Extension"));
}

#[test]
fn test_every_allowed_type_is_accepted() {
    let values = allowed_values();
    assert_eq!(values.len(), ObservationValue::ALLOWED.len());

    for value in values {
        let type_name = value.type_name();
        let built = observation("8867-4").value(value).build().unwrap();
        let stored = built.value().unwrap();
        assert_eq!(stored.type_name(), type_name);
    }
}

#[test]
fn test_every_disallowed_type_is_rejected() {
    for value in disallowed_values() {
        let type_name = value.type_name();
        let err = observation("8867-4").value(value).build().unwrap_err();
        assert_eq!(
            err,
            Error::DisallowedChoiceType {
                element: "value".to_string(),
                found: type_name,
                allowed: ObservationValue::ALLOWED,
            }
        );
    }
}

#[test]
fn test_disallowed_type_error_names_field_and_types() {
    let err = observation("8867-4")
        .effective(Date::parse("2024-01-02").unwrap())
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid type: date for choice element: 'effective' must be one of: [dateTime, Period]"
    );
    assert_eq!(err.element(), Some("effective"));
}

#[test]
fn test_native_values_wrap_as_base_primitives() {
    let built = observation("8867-4").value(42_i32).build().unwrap();
    assert!(matches!(built.value(), Some(ObservationValue::Integer(v)) if v.value() == Some(42)));

    let built = observation("8867-4").value("text").build().unwrap();
    assert!(matches!(built.value(), Some(ObservationValue::String(_))));

    // a native value that fails its own checks surfaces at build
    let err = observation("8867-4").value("   ").build().unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)));
}

#[test]
fn test_choice_enum_values_are_accepted_by_setters() {
    let effective = ObservationEffective::from(Period::builder().start("2024").build().unwrap());
    let built = observation("8867-4").effective(effective.clone()).build().unwrap();
    assert_eq!(built.effective(), Some(&effective));
}

fn describe(value: &ObservationValue) -> String {
    match value {
        ObservationValue::Quantity(quantity) => format!("{:?}", quantity.value().and_then(|v| v.value())),
        ObservationValue::CodeableConcept(concept) => format!("{} codings", concept.coding().len()),
        ObservationValue::String(text) => text.value().unwrap_or_default().to_string(),
        ObservationValue::Boolean(flag) => format!("{:?}", flag.value()),
        ObservationValue::Integer(count) => format!("{:?}", count.value()),
        ObservationValue::Range(range) => format!("low={}", range.low().is_some()),
        ObservationValue::Period(period) => format!("start={}", period.start().is_some()),
        ObservationValue::DateTime(when) => when.value().map(ToString::to_string).unwrap_or_default(),
    }
}

#[test]
fn test_exhaustive_match_over_choice() {
    let described: Vec<String> = allowed_values()
        .into_iter()
        .map(|value| {
            let built = observation("8867-4").value(value).build().unwrap();
            describe(built.value().unwrap())
        })
        .collect();
    assert_eq!(described[2], "positive");
    assert_eq!(described[4], "Some(3)");
    assert_eq!(described[7], "2024-01-02");
}

#[test]
fn test_resource_choice() {
    let observation: Observation = observation("8867-4").build().unwrap();
    let parameter = ParametersParameter::builder()
        .name("result")
        .resource(observation.clone())
        .build()
        .unwrap();
    assert_eq!(
        parameter.resource(),
        Some(&ParameterResource::Observation(observation))
    );

    let nested = Parameters::builder().parameter(parameter).build().unwrap();
    assert!(ParametersParameter::builder()
        .name("nested")
        .resource(nested)
        .build()
        .is_ok());

    let err = ParametersParameter::builder()
        .name("bad")
        .resource(loinc("8867-4"))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::DisallowedChoiceType { found: "CodeableConcept", .. }));
}

#[test]
fn test_inv_1_one_of_value_resource_part() {
    let leaf = ParametersParameter::builder().name("a").value(1_i32).build().unwrap();

    assert!(ParametersParameter::builder().name("p").part(leaf.clone()).build().is_ok());

    let err = ParametersParameter::builder().name("p").build().unwrap_err();
    assert!(matches!(err, Error::Constraint { key: "inv-1", .. }));

    let err = ParametersParameter::builder()
        .name("p")
        .value(true)
        .part(leaf)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Constraint { key: "inv-1", .. }));
}

#[test]
fn test_round_trip_keeps_choice_variant() {
    let original = observation("8867-4")
        .effective(DateTime::parse("2024-01-02T08:00:00Z").unwrap())
        .value(Integer::of(7).unwrap())
        .build()
        .unwrap();
    let copy = original.to_builder().build().unwrap();
    assert_eq!(copy.effective(), original.effective());
    assert!(matches!(copy.value(), Some(ObservationValue::Integer(v)) if v.value() == Some(7)));
}
