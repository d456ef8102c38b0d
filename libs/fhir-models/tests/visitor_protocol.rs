//! Traversal order, pruning and the stock visitors

mod test_support;

use ferrum_models::datatypes::{Coding, DateTime, Extension, FhirString, Quantity};
use ferrum_models::prelude::*;
use ferrum_models::resources::{Observation, ObservationComponent};
use ferrum_models::visitor::{CollectingVisitor, DefaultVisitor, PathVisitor, TreePrinter};
use rust_decimal::Decimal;
use test_support::{init_tracing, loinc, loinc_coding, observation, Recorder};

fn blood_pressure() -> Observation {
    let component = |code: &str, value: i64| {
        ObservationComponent::builder()
            .code(loinc(code))
            .value(
                Quantity::builder()
                    .value(Decimal::new(value, 0))
                    .system("http://unitsofmeasure.org")
                    .code("mm[Hg]")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    };
    observation("85354-9")
        .subject(Reference::to("Patient/example").unwrap())
        .effective(DateTime::parse("2024-05-01").unwrap())
        .component(component("8480-6", 120))
        .component(component("8462-4", 80))
        .build()
        .unwrap()
}

#[test]
fn test_event_sequence_for_leaf_datatype() {
    let coding = loinc_coding("8867-4");
    assert_eq!(
        Recorder::record(&coding),
        vec![
            "pre Coding",
            "start Coding:Coding",
            "visit Coding",
            "pre uri",
            "start system:uri",
            "visit system",
            "primitive value=http://loinc.org",
            "end system",
            "post uri",
            "pre code",
            "start code:code",
            "visit code",
            "primitive value=8867-4",
            "end code",
            "post code",
            "end Coding",
            "post Coding",
        ]
    );
}

#[test]
fn test_lists_are_announced_and_indexed() {
    let concept = ferrum_models::datatypes::CodeableConcept::builder()
        .coding(loinc_coding("a"))
        .coding(loinc_coding("b"))
        .text("pair")
        .build()
        .unwrap();
    let mut recorder = Recorder::default();
    concept.accept("code", None, &mut recorder);

    assert_eq!(
        recorder.starts(),
        vec![
            "code:CodeableConcept",
            "coding[0]:Coding",
            "system:uri",
            "code:code",
            "coding[1]:Coding",
            "system:uri",
            "code:code",
            "text:string",
        ]
    );
    let list_events: Vec<&String> = recorder
        .events
        .iter()
        .filter(|event| event.contains("list"))
        .collect();
    assert_eq!(list_events, vec!["list coding x2", "/list coding"]);
}

#[test]
fn test_empty_lists_fire_no_events() {
    let events = Recorder::record(&loinc_coding("a"));
    assert!(events.iter().all(|event| !event.contains("list")));
}

#[test]
fn test_id_and_extensions_come_first() {
    let string = FhirString::builder()
        .value("text")
        .id("s1")
        .extension(
            Extension::builder()
                .url("http://example.org/ext")
                .value(true)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let events = Recorder::record(&string);
    let id = events.iter().position(|e| e == "primitive id=s1").unwrap();
    let extension = events.iter().position(|e| e == "list extension x1").unwrap();
    let value = events.iter().position(|e| e == "primitive value=text").unwrap();
    assert!(id < extension && extension < value);
}

#[test]
fn test_traversal_is_deterministic() {
    init_tracing();
    let observation = blood_pressure();
    let first = Recorder::record(&observation);
    let second = Recorder::record(&observation);
    let copy = Recorder::record(&observation.to_builder().build().unwrap());
    assert_eq!(first, second);
    assert_eq!(first, copy);
}

#[test]
fn test_visit_false_prunes_children_only() {
    let observation = blood_pressure();
    let mut recorder = Recorder::pruning("Observation.component");
    observation.accept("Observation", None, &mut recorder);

    let starts = recorder.starts();
    assert!(starts.contains(&"component[0]:Observation.component".to_string()));
    assert!(starts.contains(&"component[1]:Observation.component".to_string()));
    assert!(!starts.iter().any(|s| s.contains("Quantity")));

    // the pruned node still closes
    let events = &recorder.events;
    let visit = events.iter().position(|e| e == "visit component[0]").unwrap();
    assert_eq!(events[visit + 1], "end component[0]");
    assert_eq!(events[visit + 2], "post Observation.component");
}

#[test]
fn test_pre_visit_false_skips_node_entirely() {
    let observation = blood_pressure();
    let mut recorder = Recorder::skipping("CodeableConcept");
    observation.accept("Observation", None, &mut recorder);

    assert!(recorder.events.iter().any(|e| e == "pre CodeableConcept"));
    assert!(!recorder.events.iter().any(|e| e.contains(":CodeableConcept")));
    assert!(!recorder.events.iter().any(|e| e == "post CodeableConcept"));
    assert!(!recorder.events.iter().any(|e| e.contains("Coding")));
    // siblings are unaffected
    assert!(recorder.starts().contains(&"subject:Reference".to_string()));
}

#[test]
fn test_choice_field_visits_present_value_under_field_name() {
    let observation = blood_pressure();
    let starts = {
        let mut recorder = Recorder::default();
        observation.accept("Observation", None, &mut recorder);
        recorder.starts()
    };
    assert!(starts.contains(&"effective:dateTime".to_string()));
    assert!(starts.contains(&"value:Quantity".to_string()));
}

#[test]
fn test_default_visitor_walks_everything() {
    let observation = blood_pressure();
    let mut visitor = DefaultVisitor::default();
    observation.accept("Observation", None, &mut visitor);

    let mut shallow = DefaultVisitor::new(false);
    assert!(!shallow.visit("Observation", None, &observation));
}

#[test]
fn test_path_visitor() {
    let paths: Vec<String> = PathVisitor::collect(&blood_pressure())
        .into_iter()
        .map(|(path, _)| path)
        .collect();
    assert_eq!(paths[0], "Observation");
    assert!(paths.contains(&"Observation.status".to_string()));
    assert!(paths.contains(&"Observation.code.coding[0].system".to_string()));
    assert!(paths.contains(&"Observation.component[1].value.code".to_string()));
    assert!(paths.contains(&"Observation.effective".to_string()));
}

#[test]
fn test_collecting_visitor_finds_nested_nodes() {
    let observation = blood_pressure();
    let codings = CollectingVisitor::<Coding>::collect(&observation);
    let codes: Vec<&str> = codings
        .iter()
        .filter_map(|coding| coding.code().and_then(|code| code.value()))
        .collect();
    assert_eq!(codes, vec!["85354-9", "8480-6", "8462-4"]);

    let quantities = CollectingVisitor::<Quantity>::collect(&observation);
    assert_eq!(quantities.len(), 2);
}

#[test]
fn test_tree_printer() {
    let rendered = TreePrinter::render(&loinc_coding("8867-4"));
    assert_eq!(
        rendered,
        "├─ Coding: Coding\n  ├─ system: uri\n    ├─ value = http://loinc.org\n  ├─ code: code\n    ├─ value = 8867-4\n"
    );
}
