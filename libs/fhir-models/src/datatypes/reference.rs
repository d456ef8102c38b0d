use super::{FhirString, Identifier, Uri};
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_one, Element, ElementBuilder, ElementSetters, Frozen, IntoElement,
    NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{optional, Validatable};
use crate::visitor::{accept_optional, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceData {
    element: Element,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

/// A reference from one resource to another.
///
/// Fields holding a reference may restrict the resource types it targets;
/// that check runs in the owning type's validation, see
/// [`check_reference_type`](crate::validation::check_reference_type).
pub type Reference = Frozen<ReferenceData>;

impl ReferenceData {
    /// Literal reference: relative, internal (`#id`) or absolute URL.
    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    /// Type the reference refers to, e.g. `Patient`.
    pub fn type_(&self) -> Option<&Uri> {
        self.type_.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }
}

crate::element::delegate_capabilities!(ReferenceData => element: element);

impl Validatable for ReferenceData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

impl NodeData for ReferenceData {
    const TYPE_NAME: &'static str = "Reference";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children()
            || self.reference.is_some()
            || self.type_.is_some()
            || self.identifier.is_some()
            || self.display.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_optional(self.reference.as_ref(), "reference", visitor);
        accept_optional(self.type_.as_ref(), "type", visitor);
        accept_optional(self.identifier.as_ref(), "identifier", visitor);
        accept_optional(self.display.as_ref(), "display", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    element: ElementBuilder,
    reference: Staged<FhirString>,
    type_: Staged<Uri>,
    identifier: Staged<Identifier>,
    display: Staged<FhirString>,
}

impl ElementSetters for ReferenceBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl ReferenceBuilder {
    pub fn reference(mut self, reference: impl IntoElement<FhirString>) -> Self {
        self.reference = Some(reference.into_element());
        self
    }

    pub fn type_(mut self, type_: impl IntoElement<Uri>) -> Self {
        self.type_ = Some(type_.into_element());
        self
    }

    pub fn identifier(mut self, identifier: impl IntoElement<Identifier>) -> Self {
        self.identifier = Some(identifier.into_element());
        self
    }

    pub fn display(mut self, display: impl IntoElement<FhirString>) -> Self {
        self.display = Some(display.into_element());
        self
    }

    fn stage(self) -> Result<ReferenceData> {
        Ok(ReferenceData {
            element: self.element.freeze()?,
            reference: optional(self.reference)?,
            type_: optional(self.type_)?,
            identifier: optional(self.identifier)?,
            display: optional(self.display)?,
        })
    }
}

impl From<&Reference> for ReferenceBuilder {
    fn from(node: &Reference) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            reference: restage_one(node.reference.as_ref()),
            type_: restage_one(node.type_.as_ref()),
            identifier: restage_one(node.identifier.as_ref()),
            display: restage_one(node.display.as_ref()),
        }
    }
}

builder_lifecycle!(Reference, ReferenceBuilder);

impl Reference {
    /// Shorthand for a reference holding only a literal.
    pub fn to(reference: &str) -> Result<Self> {
        Self::builder().reference(reference).build()
    }
}
