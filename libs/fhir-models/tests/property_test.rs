//! Property-based tests using QuickCheck

use ferrum_models::datatypes::{CodeableConcept, Coding, Integer, PositiveInt, UnsignedInt};
use ferrum_models::prelude::*;
use ferrum_models::resources::{Observation, ObservationValue};
use ferrum_models::Error;
use quickcheck::{QuickCheck, TestResult};

mod test_support;

use test_support::{loinc, observation, Recorder};

fn coding(code: &str, display: Option<&str>, user_selected: Option<bool>) -> Result<Coding, Error> {
    let mut builder = Coding::builder().system("http://loinc.org").code(code);
    if let Some(display) = display {
        builder = builder.display(display);
    }
    if let Some(user_selected) = user_selected {
        builder = builder.user_selected(user_selected);
    }
    builder.build()
}

/// Property: a built node survives to_builder().build() unchanged
#[test]
fn prop_coding_round_trip() {
    fn prop(code: String, display: Option<String>, user_selected: Option<bool>) -> TestResult {
        let Ok(original) = coding(&code, display.as_deref(), user_selected) else {
            return TestResult::discard();
        };
        let copy = original.to_builder().build();
        TestResult::from_bool(copy.as_ref() == Ok(&original))
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(String, Option<String>, Option<bool>) -> TestResult);
}

/// Property: one absent list entry fails the build wherever it sits
#[test]
fn prop_null_list_entry_always_fails() {
    fn prop(len: u8, position: usize) -> TestResult {
        let len = usize::from(len % 5);
        let position = position % (len + 1);

        let mut builder = CodeableConcept::builder();
        for index in 0..=len {
            builder = if index == position {
                builder.coding(Option::<Coding>::None)
            } else {
                builder.coding(test_support::loinc_coding(&format!("code-{index}")))
            };
        }
        TestResult::from_bool(
            builder.build() == Err(Error::NullListElement("coding".to_string())),
        )
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(u8, usize) -> TestResult);
}

/// Property: every integer is an allowed Observation.value, positiveInt never is
#[test]
fn prop_integer_choice_accepts_any_value() {
    fn prop(value: i32) -> TestResult {
        let accepted = observation("8867-4")
            .value(Integer::of(value).unwrap())
            .build()
            .map(|obs| matches!(obs.value(), Some(ObservationValue::Integer(v)) if v.value() == Some(value)))
            .unwrap_or(false);

        let rejected = match PositiveInt::of(value) {
            Ok(positive) => matches!(
                observation("8867-4").value(positive).build(),
                Err(Error::DisallowedChoiceType { found: "positiveInt", .. })
            ),
            Err(_) => value < 1,
        };

        TestResult::from_bool(accepted && rejected)
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(i32) -> TestResult);
}

/// Property: unsignedInt and positiveInt bounds
#[test]
fn prop_integer_lower_bounds() {
    fn prop(value: i32) -> TestResult {
        TestResult::from_bool(
            UnsignedInt::of(value).is_ok() == (value >= 0)
                && PositiveInt::of(value).is_ok() == (value >= 1),
        )
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(i32) -> TestResult);
}

/// Property: omitting status fails the build whatever else is set
#[test]
fn prop_required_status() {
    fn prop(value: i32, with_subject: bool) -> TestResult {
        let mut builder = Observation::builder()
            .code(loinc("8867-4"))
            .value(value);
        if with_subject {
            builder = builder.subject(Reference::to("Patient/p1").unwrap());
        }
        TestResult::from_bool(
            builder.build() == Err(Error::MissingRequired("status".to_string())),
        )
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(i32, bool) -> TestResult);
}

/// Property: two walks over the same node record identical visit_start sequences
#[test]
fn prop_traversal_order_deterministic() {
    fn prop(codes: Vec<String>, text: Option<String>) -> TestResult {
        let mut builder = CodeableConcept::builder();
        for code in &codes {
            match coding(code, None, None) {
                Ok(coding) => builder = builder.coding(coding),
                Err(_) => return TestResult::discard(),
            }
        }
        if let Some(text) = &text {
            builder = builder.text(text.as_str());
        }
        let Ok(concept) = builder.build() else {
            return TestResult::discard();
        };

        let first = Recorder::record(&concept);
        let second = Recorder::record(&concept);
        TestResult::from_bool(first == second)
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<String>, Option<String>) -> TestResult);
}
