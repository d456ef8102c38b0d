use super::{Boolean, Code, FhirString, Uri};
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_one, Element, ElementBuilder, ElementSetters, Frozen, IntoElement,
    NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{optional, Validatable};
use crate::visitor::{accept_optional, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodingData {
    element: Element,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

/// A reference to a code defined by a terminology system.
pub type Coding = Frozen<CodingData>;

impl CodingData {
    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }
}

crate::element::delegate_capabilities!(CodingData => element: element);

impl Validatable for CodingData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

impl NodeData for CodingData {
    const TYPE_NAME: &'static str = "Coding";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children()
            || self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_optional(self.system.as_ref(), "system", visitor);
        accept_optional(self.version.as_ref(), "version", visitor);
        accept_optional(self.code.as_ref(), "code", visitor);
        accept_optional(self.display.as_ref(), "display", visitor);
        accept_optional(self.user_selected.as_ref(), "userSelected", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    element: ElementBuilder,
    system: Staged<Uri>,
    version: Staged<FhirString>,
    code: Staged<Code>,
    display: Staged<FhirString>,
    user_selected: Staged<Boolean>,
}

impl ElementSetters for CodingBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl CodingBuilder {
    pub fn system(mut self, system: impl IntoElement<Uri>) -> Self {
        self.system = Some(system.into_element());
        self
    }

    pub fn version(mut self, version: impl IntoElement<FhirString>) -> Self {
        self.version = Some(version.into_element());
        self
    }

    pub fn code(mut self, code: impl IntoElement<Code>) -> Self {
        self.code = Some(code.into_element());
        self
    }

    pub fn display(mut self, display: impl IntoElement<FhirString>) -> Self {
        self.display = Some(display.into_element());
        self
    }

    pub fn user_selected(mut self, user_selected: impl IntoElement<Boolean>) -> Self {
        self.user_selected = Some(user_selected.into_element());
        self
    }

    fn stage(self) -> Result<CodingData> {
        Ok(CodingData {
            element: self.element.freeze()?,
            system: optional(self.system)?,
            version: optional(self.version)?,
            code: optional(self.code)?,
            display: optional(self.display)?,
            user_selected: optional(self.user_selected)?,
        })
    }
}

impl From<&Coding> for CodingBuilder {
    fn from(node: &Coding) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            system: restage_one(node.system.as_ref()),
            version: restage_one(node.version.as_ref()),
            code: restage_one(node.code.as_ref()),
            display: restage_one(node.display.as_ref()),
            user_selected: restage_one(node.user_selected.as_ref()),
        }
    }
}

builder_lifecycle!(Coding, CodingBuilder);
