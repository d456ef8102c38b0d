use super::{Code, CodeableConcept, FhirString, Period, Reference, Uri};
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_one, Element, ElementBuilder, ElementSetters, Frozen, IntoElement,
    NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{check_reference_type, optional, Validatable};
use crate::visitor::{accept_optional, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierData {
    element: Element,
    use_: Option<Code>,
    type_: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Reference>,
}

/// An identifier intended for computation.
pub type Identifier = Frozen<IdentifierData>;

impl IdentifierData {
    pub fn use_(&self) -> Option<&Code> {
        self.use_.as_ref()
    }

    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_ref()
    }
}

crate::element::delegate_capabilities!(IdentifierData => element: element);

impl Validatable for IdentifierData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, config: &ModelConfig) -> Result<()> {
        check_reference_type(self.assigner.as_ref(), "assigner", &["Organization"], config)
    }
}

impl NodeData for IdentifierData {
    const TYPE_NAME: &'static str = "Identifier";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children()
            || self.use_.is_some()
            || self.type_.is_some()
            || self.system.is_some()
            || self.value.is_some()
            || self.period.is_some()
            || self.assigner.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_optional(self.use_.as_ref(), "use", visitor);
        accept_optional(self.type_.as_ref(), "type", visitor);
        accept_optional(self.system.as_ref(), "system", visitor);
        accept_optional(self.value.as_ref(), "value", visitor);
        accept_optional(self.period.as_ref(), "period", visitor);
        accept_optional(self.assigner.as_ref(), "assigner", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    element: ElementBuilder,
    use_: Staged<Code>,
    type_: Staged<CodeableConcept>,
    system: Staged<Uri>,
    value: Staged<FhirString>,
    period: Staged<Period>,
    assigner: Staged<Reference>,
}

impl ElementSetters for IdentifierBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl IdentifierBuilder {
    pub fn use_(mut self, use_: impl IntoElement<Code>) -> Self {
        self.use_ = Some(use_.into_element());
        self
    }

    pub fn type_(mut self, type_: impl IntoElement<CodeableConcept>) -> Self {
        self.type_ = Some(type_.into_element());
        self
    }

    pub fn system(mut self, system: impl IntoElement<Uri>) -> Self {
        self.system = Some(system.into_element());
        self
    }

    pub fn value(mut self, value: impl IntoElement<FhirString>) -> Self {
        self.value = Some(value.into_element());
        self
    }

    pub fn period(mut self, period: impl IntoElement<Period>) -> Self {
        self.period = Some(period.into_element());
        self
    }

    pub fn assigner(mut self, assigner: impl IntoElement<Reference>) -> Self {
        self.assigner = Some(assigner.into_element());
        self
    }

    fn stage(self) -> Result<IdentifierData> {
        Ok(IdentifierData {
            element: self.element.freeze()?,
            use_: optional(self.use_)?,
            type_: optional(self.type_)?,
            system: optional(self.system)?,
            value: optional(self.value)?,
            period: optional(self.period)?,
            assigner: optional(self.assigner)?,
        })
    }
}

impl From<&Identifier> for IdentifierBuilder {
    fn from(node: &Identifier) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            use_: restage_one(node.use_.as_ref()),
            type_: restage_one(node.type_.as_ref()),
            system: restage_one(node.system.as_ref()),
            value: restage_one(node.value.as_ref()),
            period: restage_one(node.period.as_ref()),
            assigner: restage_one(node.assigner.as_ref()),
        }
    }
}

builder_lifecycle!(Identifier, IdentifierBuilder);
