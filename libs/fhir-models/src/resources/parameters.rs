use super::Observation;
use crate::config::ModelConfig;
use crate::datatypes::{
    Annotation, Boolean, Canonical, Code, CodeableConcept, Coding, Date, DateTime, Decimal,
    FhirString, Id, Identifier, Integer, Markdown, Period, PositiveInt, Quantity, Range,
    Reference, UnsignedInt, Uri,
};
use crate::element::{
    builder_lifecycle, restage, restage_choice, restage_one, BackboneElement,
    BackboneElementBuilder, BackboneElementSetters, ElementBuilder, ElementSetters, Frozen,
    IntoElement, IntoNode, Node, NodeData, NodeKind, Resource, ResourceBuilder, ResourceSetters,
    Staged,
};
use crate::error::Result;
use crate::validation::{
    check_constraint, check_list, choice_element, require_non_null, Validatable,
};
use crate::visitor::{accept, accept_list, accept_optional, Visitor};

crate::choice_type! {
    /// Parameters.parameter.value[x]
    pub enum ParameterValue {
        Boolean(Boolean),
        Integer(Integer),
        UnsignedInt(UnsignedInt),
        PositiveInt(PositiveInt),
        Decimal(Decimal),
        String(FhirString),
        Code(Code),
        Id(Id),
        Uri(Uri),
        Canonical(Canonical),
        Markdown(Markdown),
        Date(Date),
        DateTime(DateTime),
        Coding(Coding),
        CodeableConcept(CodeableConcept),
        Quantity(Quantity),
        Range(Range),
        Period(Period),
        Reference(Reference),
        Identifier(Identifier),
        Annotation(Annotation),
    }
}

crate::choice_type! {
    /// Parameters.parameter.resource
    pub enum ParameterResource {
        Observation(Observation),
        Parameters(Parameters),
    }
}

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParametersData {
    resource: Resource,
    parameter: Vec<ParametersParameter>,
}

/// Operation request or response.
pub type Parameters = Frozen<ParametersData>;

impl ParametersData {
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn parameter(&self) -> &[ParametersParameter] {
        &self.parameter
    }

    /// First top-level parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&ParametersParameter> {
        self.parameter
            .iter()
            .find(|parameter| parameter.name().value() == Some(name))
    }
}

crate::element::delegate_capabilities!(ParametersData => resource: resource);

impl Validatable for ParametersData {
    type Base = Resource;

    fn base(&self) -> &Resource {
        &self.resource
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

impl NodeData for ParametersData {
    const TYPE_NAME: &'static str = "Parameters";
    const KIND: NodeKind = NodeKind::Resource;

    fn has_children(&self) -> bool {
        self.resource.has_children() || !self.parameter.is_empty()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.resource.accept_children(visitor);
        accept_list(&self.parameter, "parameter", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    resource: ResourceBuilder,
    parameter: Vec<Option<ParametersParameter>>,
}

impl ResourceSetters for ParametersBuilder {
    fn resource_builder(&mut self) -> &mut ResourceBuilder {
        &mut self.resource
    }
}

impl ParametersBuilder {
    pub fn parameter(mut self, parameter: impl Into<Option<ParametersParameter>>) -> Self {
        self.parameter.push(parameter.into());
        self
    }

    pub fn parameters(mut self, parameter: impl IntoIterator<Item = ParametersParameter>) -> Self {
        self.parameter = parameter.into_iter().map(Some).collect();
        self
    }

    fn stage(self) -> Result<ParametersData> {
        Ok(ParametersData {
            parameter: check_list(self.parameter, "parameter")?,
            resource: self.resource.freeze()?,
        })
    }
}

impl From<&Parameters> for ParametersBuilder {
    fn from(node: &Parameters) -> Self {
        Self {
            resource: ResourceBuilder::from(&node.resource),
            parameter: restage(&node.parameter),
        }
    }
}

builder_lifecycle!(Parameters, ParametersBuilder);

// ============================================================================
// Parameters.parameter
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParametersParameterData {
    backbone: BackboneElement,
    name: FhirString,
    value: Option<ParameterValue>,
    resource: Option<ParameterResource>,
    part: Vec<ParametersParameter>,
}

/// A named parameter: a value, a resource or nested parts.
pub type ParametersParameter = Frozen<ParametersParameterData>;

impl ParametersParameterData {
    pub fn name(&self) -> &FhirString {
        &self.name
    }

    pub fn value(&self) -> Option<&ParameterValue> {
        self.value.as_ref()
    }

    pub fn resource(&self) -> Option<&ParameterResource> {
        self.resource.as_ref()
    }

    pub fn part(&self) -> &[ParametersParameter] {
        &self.part
    }
}

crate::element::delegate_capabilities!(ParametersParameterData => backbone: backbone);

impl Validatable for ParametersParameterData {
    type Base = BackboneElement;

    fn base(&self) -> &BackboneElement {
        &self.backbone
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        let has_part = !self.part.is_empty();
        let has_value = self.value.is_some();
        let has_resource = self.resource.is_some();
        check_constraint(
            "inv-1",
            (has_part && !has_value && !has_resource) || (!has_part && (has_value != has_resource)),
            "A parameter must have one and only one of (value, resource, part)",
        )
    }
}

impl NodeData for ParametersParameterData {
    const TYPE_NAME: &'static str = "Parameters.parameter";
    const KIND: NodeKind = NodeKind::Backbone;

    fn has_children(&self) -> bool {
        true
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept(&self.name, "name", visitor);
        accept_optional(self.value.as_ref(), "value", visitor);
        accept_optional(self.resource.as_ref(), "resource", visitor);
        accept_list(&self.part, "part", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParametersParameterBuilder {
    backbone: BackboneElementBuilder,
    name: Staged<FhirString>,
    value: Staged<Box<dyn Node>>,
    resource: Staged<Box<dyn Node>>,
    part: Vec<Option<ParametersParameter>>,
}

impl ElementSetters for ParametersParameterBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        self.backbone.element_builder()
    }
}

impl BackboneElementSetters for ParametersParameterBuilder {
    fn backbone_builder(&mut self) -> &mut BackboneElementBuilder {
        &mut self.backbone
    }
}

impl ParametersParameterBuilder {
    /// Required.
    pub fn name(mut self, name: impl IntoElement<FhirString>) -> Self {
        self.name = Some(name.into_element());
        self
    }

    /// Any datatype other than `Extension`.
    pub fn value(mut self, value: impl IntoNode) -> Self {
        self.value = Some(value.into_node());
        self
    }

    pub fn resource(mut self, resource: impl IntoNode) -> Self {
        self.resource = Some(resource.into_node());
        self
    }

    pub fn part(mut self, part: impl Into<Option<ParametersParameter>>) -> Self {
        self.part.push(part.into());
        self
    }

    pub fn parts(mut self, part: impl IntoIterator<Item = ParametersParameter>) -> Self {
        self.part = part.into_iter().map(Some).collect();
        self
    }

    fn stage(self) -> Result<ParametersParameterData> {
        Ok(ParametersParameterData {
            name: require_non_null(self.name, "name")?,
            part: check_list(self.part, "part")?,
            value: choice_element(self.value, "value")?,
            resource: choice_element(self.resource, "resource")?,
            backbone: self.backbone.freeze()?,
        })
    }
}

impl From<&ParametersParameter> for ParametersParameterBuilder {
    fn from(node: &ParametersParameter) -> Self {
        Self {
            backbone: BackboneElementBuilder::from(&node.backbone),
            name: restage_one(Some(&node.name)),
            value: restage_choice(node.value.as_ref()),
            resource: restage_choice(node.resource.as_ref()),
            part: restage(&node.part),
        }
    }
}

builder_lifecycle!(ParametersParameter, ParametersParameterBuilder);
