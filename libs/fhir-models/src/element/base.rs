//! Base records embedded by every concrete type
//!
//! `Element` carries the id and extensions shared by all datatypes,
//! `BackboneElement` adds modifier extensions, `Resource` carries the
//! logical id and resource-level metadata and `DomainResource` adds the
//! resource extensions. Each base has a matching builder and a setter trait
//! that concrete builders implement by handing out their embedded base
//! builder.

use crate::config::ModelConfig;
use crate::datatypes::{Code, Extension, Uri};
use crate::element::{
    restage, restage_one, HasExtensions, HasId, HasModifierExtensions, IntoElement, Staged,
};
use crate::error::Result;
use crate::validation::{check_id, check_list, check_string, optional, Validatable};
use crate::visitor::{accept_list, accept_optional, accept_primitive, PrimitiveValue, Visitor};

// ============================================================================
// Element
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Element {
    id: Option<String>,
    extension: Vec<Extension>,
}

impl Element {
    pub fn has_children(&self) -> bool {
        self.id.is_some() || !self.extension.is_empty()
    }

    pub fn accept_children(&self, visitor: &mut dyn Visitor) {
        accept_primitive(self.id.as_deref().map(PrimitiveValue::String), "id", visitor);
        accept_list(&self.extension, "extension", visitor);
    }
}

impl HasId for Element {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl HasExtensions for Element {
    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl Validatable for Element {
    type Base = ();

    fn base(&self) -> &() {
        &()
    }

    fn check(&self, config: &ModelConfig) -> Result<()> {
        match &self.id {
            Some(id) => check_string(id, config),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    id: Option<String>,
    extension: Vec<Option<Extension>>,
}

impl ElementBuilder {
    pub fn freeze(self) -> Result<Element> {
        Ok(Element {
            id: self.id,
            extension: check_list(self.extension, "extension")?,
        })
    }
}

impl From<&Element> for ElementBuilder {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id.clone(),
            extension: restage(&element.extension),
        }
    }
}

/// Setters shared by every datatype builder.
pub trait ElementSetters: Sized {
    fn element_builder(&mut self) -> &mut ElementBuilder;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.element_builder().id = Some(id.into());
        self
    }

    /// Append one extension. `None` stages an absent entry, which fails the build.
    fn extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.element_builder().extension.push(extension.into());
        self
    }

    /// Replace all extensions.
    fn extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.element_builder().extension = extensions.into_iter().map(Some).collect();
        self
    }
}

// ============================================================================
// BackboneElement
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneElement {
    element: Element,
    modifier_extension: Vec<Extension>,
}

impl BackboneElement {
    pub fn has_children(&self) -> bool {
        self.element.has_children() || !self.modifier_extension.is_empty()
    }

    pub fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_list(&self.modifier_extension, "modifierExtension", visitor);
    }
}

impl HasId for BackboneElement {
    fn id(&self) -> Option<&str> {
        self.element.id()
    }
}

impl HasExtensions for BackboneElement {
    fn extension(&self) -> &[Extension] {
        self.element.extension()
    }
}

impl HasModifierExtensions for BackboneElement {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

impl Validatable for BackboneElement {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackboneElementBuilder {
    element: ElementBuilder,
    modifier_extension: Vec<Option<Extension>>,
}

impl BackboneElementBuilder {
    pub fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }

    pub fn freeze(self) -> Result<BackboneElement> {
        Ok(BackboneElement {
            element: self.element.freeze()?,
            modifier_extension: check_list(self.modifier_extension, "modifierExtension")?,
        })
    }
}

impl From<&BackboneElement> for BackboneElementBuilder {
    fn from(backbone: &BackboneElement) -> Self {
        Self {
            element: ElementBuilder::from(&backbone.element),
            modifier_extension: restage(&backbone.modifier_extension),
        }
    }
}

/// Builders of backbone elements implement this and [`ElementSetters`],
/// the latter through [`BackboneElementBuilder`]'s embedded element builder.
pub trait BackboneElementSetters: ElementSetters {
    fn backbone_builder(&mut self) -> &mut BackboneElementBuilder;

    fn modifier_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.backbone_builder().modifier_extension.push(extension.into());
        self
    }

    fn modifier_extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.backbone_builder().modifier_extension = extensions.into_iter().map(Some).collect();
        self
    }
}

// ============================================================================
// Resource
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Resource {
    id: Option<String>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
}

impl Resource {
    pub fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn has_children(&self) -> bool {
        self.id.is_some() || self.implicit_rules.is_some() || self.language.is_some()
    }

    pub fn accept_children(&self, visitor: &mut dyn Visitor) {
        accept_primitive(self.id.as_deref().map(PrimitiveValue::String), "id", visitor);
        accept_optional(self.implicit_rules.as_ref(), "implicitRules", visitor);
        accept_optional(self.language.as_ref(), "language", visitor);
    }
}

impl HasId for Resource {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Validatable for Resource {
    type Base = ();

    fn base(&self) -> &() {
        &()
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        match &self.id {
            Some(id) => check_id(id),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceBuilder {
    id: Option<String>,
    implicit_rules: Staged<Uri>,
    language: Staged<Code>,
}

impl ResourceBuilder {
    pub fn freeze(self) -> Result<Resource> {
        Ok(Resource {
            id: self.id,
            implicit_rules: optional(self.implicit_rules)?,
            language: optional(self.language)?,
        })
    }
}

impl From<&Resource> for ResourceBuilder {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id.clone(),
            implicit_rules: restage_one(resource.implicit_rules.as_ref()),
            language: restage_one(resource.language.as_ref()),
        }
    }
}

/// Setters shared by every resource builder.
pub trait ResourceSetters: Sized {
    fn resource_builder(&mut self) -> &mut ResourceBuilder;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.resource_builder().id = Some(id.into());
        self
    }

    fn implicit_rules(mut self, implicit_rules: impl IntoElement<Uri>) -> Self {
        self.resource_builder().implicit_rules = Some(implicit_rules.into_element());
        self
    }

    fn language(mut self, language: impl IntoElement<Code>) -> Self {
        self.resource_builder().language = Some(language.into_element());
        self
    }
}

// ============================================================================
// DomainResource
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainResource {
    resource: Resource,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
}

impl DomainResource {
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn has_children(&self) -> bool {
        self.resource.has_children()
            || !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
    }

    pub fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.resource.accept_children(visitor);
        accept_list(&self.extension, "extension", visitor);
        accept_list(&self.modifier_extension, "modifierExtension", visitor);
    }
}

impl HasId for DomainResource {
    fn id(&self) -> Option<&str> {
        self.resource.id()
    }
}

impl HasExtensions for DomainResource {
    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl HasModifierExtensions for DomainResource {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

impl Validatable for DomainResource {
    type Base = Resource;

    fn base(&self) -> &Resource {
        &self.resource
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DomainResourceBuilder {
    resource: ResourceBuilder,
    extension: Vec<Option<Extension>>,
    modifier_extension: Vec<Option<Extension>>,
}

impl DomainResourceBuilder {
    pub fn resource_builder(&mut self) -> &mut ResourceBuilder {
        &mut self.resource
    }

    pub fn freeze(self) -> Result<DomainResource> {
        Ok(DomainResource {
            resource: self.resource.freeze()?,
            extension: check_list(self.extension, "extension")?,
            modifier_extension: check_list(self.modifier_extension, "modifierExtension")?,
        })
    }
}

impl From<&DomainResource> for DomainResourceBuilder {
    fn from(domain: &DomainResource) -> Self {
        Self {
            resource: ResourceBuilder::from(&domain.resource),
            extension: restage(&domain.extension),
            modifier_extension: restage(&domain.modifier_extension),
        }
    }
}

pub trait DomainResourceSetters: ResourceSetters {
    fn domain_resource_builder(&mut self) -> &mut DomainResourceBuilder;

    fn extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.domain_resource_builder().extension.push(extension.into());
        self
    }

    fn extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_resource_builder().extension = extensions.into_iter().map(Some).collect();
        self
    }

    fn modifier_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.domain_resource_builder().modifier_extension.push(extension.into());
        self
    }

    fn modifier_extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_resource_builder().modifier_extension =
            extensions.into_iter().map(Some).collect();
        self
    }
}
