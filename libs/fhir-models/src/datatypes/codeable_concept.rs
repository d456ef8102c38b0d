use super::{Coding, FhirString};
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage, restage_one, Element, ElementBuilder, ElementSetters, Frozen,
    IntoElement, NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{check_list, optional, Validatable};
use crate::visitor::{accept_list, accept_optional, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeableConceptData {
    element: Element,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

/// A concept given by codings and/or free text.
pub type CodeableConcept = Frozen<CodeableConceptData>;

impl CodeableConceptData {
    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }
}

crate::element::delegate_capabilities!(CodeableConceptData => element: element);

impl Validatable for CodeableConceptData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

impl NodeData for CodeableConceptData {
    const TYPE_NAME: &'static str = "CodeableConcept";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children() || !self.coding.is_empty() || self.text.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_list(&self.coding, "coding", visitor);
        accept_optional(self.text.as_ref(), "text", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    element: ElementBuilder,
    coding: Vec<Option<Coding>>,
    text: Staged<FhirString>,
}

impl ElementSetters for CodeableConceptBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl CodeableConceptBuilder {
    /// Append one coding. `None` stages an absent entry, which fails the build.
    pub fn coding(mut self, coding: impl Into<Option<Coding>>) -> Self {
        self.coding.push(coding.into());
        self
    }

    /// Replace all codings.
    pub fn codings(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding = coding.into_iter().map(Some).collect();
        self
    }

    pub fn text(mut self, text: impl IntoElement<FhirString>) -> Self {
        self.text = Some(text.into_element());
        self
    }

    fn stage(self) -> Result<CodeableConceptData> {
        Ok(CodeableConceptData {
            element: self.element.freeze()?,
            coding: check_list(self.coding, "coding")?,
            text: optional(self.text)?,
        })
    }
}

impl From<&CodeableConcept> for CodeableConceptBuilder {
    fn from(node: &CodeableConcept) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            coding: restage(&node.coding),
            text: restage_one(node.text.as_ref()),
        }
    }
}

builder_lifecycle!(CodeableConcept, CodeableConceptBuilder);
