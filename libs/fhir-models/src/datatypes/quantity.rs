use super::{Code, Decimal, FhirString, Uri};
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_one, Element, ElementBuilder, ElementSetters, Frozen, IntoElement,
    NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{check_constraint, optional, Validatable};
use crate::visitor::{accept_optional, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantityData {
    element: Element,
    value: Option<Decimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

/// A measured amount.
pub type Quantity = Frozen<QuantityData>;

impl QuantityData {
    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    /// `<`, `<=`, `>=` or `>`
    pub fn comparator(&self) -> Option<&Code> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    /// Unit the value is expressed in, coded form preferred.
    pub(crate) fn unit_key(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(|code| code.value())
            .or_else(|| self.unit.as_ref().and_then(|unit| unit.value()))
    }
}

crate::element::delegate_capabilities!(QuantityData => element: element);

impl Validatable for QuantityData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        check_constraint(
            "qty-3",
            self.code.is_none() || self.system.is_some(),
            "If a code for the unit is present, the system SHALL also be present",
        )
    }
}

impl NodeData for QuantityData {
    const TYPE_NAME: &'static str = "Quantity";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children()
            || self.value.is_some()
            || self.comparator.is_some()
            || self.unit.is_some()
            || self.system.is_some()
            || self.code.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_optional(self.value.as_ref(), "value", visitor);
        accept_optional(self.comparator.as_ref(), "comparator", visitor);
        accept_optional(self.unit.as_ref(), "unit", visitor);
        accept_optional(self.system.as_ref(), "system", visitor);
        accept_optional(self.code.as_ref(), "code", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    element: ElementBuilder,
    value: Staged<Decimal>,
    comparator: Staged<Code>,
    unit: Staged<FhirString>,
    system: Staged<Uri>,
    code: Staged<Code>,
}

impl ElementSetters for QuantityBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl QuantityBuilder {
    pub fn value(mut self, value: impl IntoElement<Decimal>) -> Self {
        self.value = Some(value.into_element());
        self
    }

    pub fn comparator(mut self, comparator: impl IntoElement<Code>) -> Self {
        self.comparator = Some(comparator.into_element());
        self
    }

    pub fn unit(mut self, unit: impl IntoElement<FhirString>) -> Self {
        self.unit = Some(unit.into_element());
        self
    }

    pub fn system(mut self, system: impl IntoElement<Uri>) -> Self {
        self.system = Some(system.into_element());
        self
    }

    pub fn code(mut self, code: impl IntoElement<Code>) -> Self {
        self.code = Some(code.into_element());
        self
    }

    fn stage(self) -> Result<QuantityData> {
        Ok(QuantityData {
            element: self.element.freeze()?,
            value: optional(self.value)?,
            comparator: optional(self.comparator)?,
            unit: optional(self.unit)?,
            system: optional(self.system)?,
            code: optional(self.code)?,
        })
    }
}

impl From<&Quantity> for QuantityBuilder {
    fn from(node: &Quantity) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            value: restage_one(node.value.as_ref()),
            comparator: restage_one(node.comparator.as_ref()),
            unit: restage_one(node.unit.as_ref()),
            system: restage_one(node.system.as_ref()),
            code: restage_one(node.code.as_ref()),
        }
    }
}

builder_lifecycle!(Quantity, QuantityBuilder);
