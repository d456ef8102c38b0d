//! A record type declared outside the crate: one required string field and
//! one optional choice over `{integer, string}`

mod test_support;

use ferrum_models::datatypes::{Code, FhirString, Integer};
use ferrum_models::element::{Element, ElementBuilder, ElementSetters, NodeData, Staged};
use ferrum_models::prelude::*;
use ferrum_models::validation::{choice_element, require_non_null, Validatable};
use ferrum_models::visitor::{accept, accept_optional};
use ferrum_models::{Error, Frozen, ModelConfig, NodeKind, Result};
use test_support::{init_tracing, Recorder};

ferrum_models::choice_type! {
    pub enum MeasureValue {
        Integer(Integer),
        String(FhirString),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeasureData {
    element: Element,
    label: FhirString,
    value: Option<MeasureValue>,
}

type Measure = Frozen<MeasureData>;

impl MeasureData {
    fn label(&self) -> &FhirString {
        &self.label
    }

    fn value(&self) -> Option<&MeasureValue> {
        self.value.as_ref()
    }
}

impl Validatable for MeasureData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

impl NodeData for MeasureData {
    const TYPE_NAME: &'static str = "Measure";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        true
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept(&self.label, "label", visitor);
        accept_optional(self.value.as_ref(), "value", visitor);
    }
}

#[derive(Debug, Clone, Default)]
struct MeasureBuilder {
    element: ElementBuilder,
    label: Staged<FhirString>,
    value: Staged<Box<dyn Node>>,
}

impl ElementSetters for MeasureBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl MeasureBuilder {
    fn label(mut self, label: impl IntoElement<FhirString>) -> Self {
        self.label = Some(label.into_element());
        self
    }

    fn value(mut self, value: impl IntoNode) -> Self {
        self.value = Some(value.into_node());
        self
    }

    fn stage(self) -> Result<MeasureData> {
        Ok(MeasureData {
            label: require_non_null(self.label, "label")?,
            value: choice_element(self.value, "value")?,
            element: self.element.freeze()?,
        })
    }

    fn build(self) -> Result<Measure> {
        Frozen::finish(self.stage(), &ModelConfig::default())
    }
}

#[test]
fn test_missing_required_field_is_named() {
    init_tracing();
    let err = MeasureBuilder::default()
        .value(Integer::of(4).unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err, Error::MissingRequired("label".to_string()));
    assert_eq!(err.element(), Some("label"));
}

#[test]
fn test_allowed_choice_builds_and_visits_two_descendants() {
    let measure = MeasureBuilder::default()
        .label("systolic")
        .value(Integer::of(120).unwrap())
        .build()
        .unwrap();

    assert_eq!(measure.label().value(), Some("systolic"));
    assert!(matches!(measure.value(), Some(MeasureValue::Integer(v)) if v.value() == Some(120)));

    let mut recorder = Recorder::default();
    measure.accept("Measure", None, &mut recorder);
    assert_eq!(
        recorder.starts(),
        vec!["Measure:Measure", "label:string", "value:integer"]
    );
}

#[test]
fn test_disallowed_choice_names_field_and_allowed_types() {
    let err = MeasureBuilder::default()
        .label("systolic")
        .value(Code::of("high").unwrap())
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::DisallowedChoiceType {
            element: "value".to_string(),
            found: "code",
            allowed: &["integer", "string"],
        }
    );
    assert_eq!(
        err.to_string(),
        "Invalid type: code for choice element: 'value' must be one of: [integer, string]"
    );
}

#[test]
fn test_choice_is_optional() {
    let measure = MeasureBuilder::default().label("unset").build().unwrap();
    assert!(measure.value().is_none());
    assert_eq!(Recorder::record(&measure).iter().filter(|e| e.starts_with("start ")).count(), 2);
}

#[test]
fn test_setter_order_does_not_matter() {
    let a = MeasureBuilder::default()
        .label("x")
        .value("text")
        .id("m1")
        .build()
        .unwrap();
    let b = MeasureBuilder::default()
        .id("m1")
        .value("text")
        .label("x")
        .build()
        .unwrap();
    assert_eq!(a, b);
    assert!(matches!(a.value(), Some(MeasureValue::String(_))));
}
