use crate::config::ModelConfig;
use crate::datatypes::{
    Annotation, Boolean, Code, CodeableConcept, DateTime, FhirString, Identifier, Integer, Period,
    Quantity, Range, Reference,
};
use crate::element::{
    builder_lifecycle, restage, restage_choice, restage_one, BackboneElement,
    BackboneElementBuilder, BackboneElementSetters, DomainResource, DomainResourceBuilder,
    DomainResourceSetters, ElementBuilder, ElementSetters, Frozen, IntoElement, IntoNode, Node,
    NodeData, NodeKind, ResourceBuilder, ResourceSetters, Staged,
};
use crate::error::Result;
use crate::validation::{
    check_constraint, check_list, check_reference_type, check_reference_types, choice_element,
    optional, require_non_null, Validatable,
};
use crate::visitor::{accept, accept_list, accept_optional, Visitor};

crate::choice_type! {
    /// Observation.effective[x]
    pub enum ObservationEffective {
        DateTime(DateTime),
        Period(Period),
    }
}

crate::choice_type! {
    /// Observation.value[x] and Observation.component.value[x]
    pub enum ObservationValue {
        Quantity(Quantity),
        CodeableConcept(CodeableConcept),
        String(FhirString),
        Boolean(Boolean),
        Integer(Integer),
        Range(Range),
        Period(Period),
        DateTime(DateTime),
    }
}

const SUBJECT_TARGETS: &[&str] = &["Patient", "Group", "Device", "Location"];
const ENCOUNTER_TARGETS: &[&str] = &["Encounter"];
const PERFORMER_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Organization",
    "CareTeam",
    "Patient",
    "RelatedPerson",
];

// ============================================================================
// Observation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationData {
    domain: DomainResource,
    identifier: Vec<Identifier>,
    status: Code,
    category: Vec<CodeableConcept>,
    code: CodeableConcept,
    subject: Option<Reference>,
    encounter: Option<Reference>,
    effective: Option<ObservationEffective>,
    performer: Vec<Reference>,
    value: Option<ObservationValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
    note: Vec<Annotation>,
    body_site: Option<CodeableConcept>,
    method: Option<CodeableConcept>,
    component: Vec<ObservationComponent>,
}

/// Measurements and simple assertions made about a patient, device or
/// other subject.
pub type Observation = Frozen<ObservationData>;

impl ObservationData {
    pub fn domain_resource(&self) -> &DomainResource {
        &self.domain
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// `registered | preliminary | final | amended | ...`
    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn encounter(&self) -> Option<&Reference> {
        self.encounter.as_ref()
    }

    pub fn effective(&self) -> Option<&ObservationEffective> {
        self.effective.as_ref()
    }

    pub fn performer(&self) -> &[Reference] {
        &self.performer
    }

    pub fn value(&self) -> Option<&ObservationValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }

    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    pub fn body_site(&self) -> Option<&CodeableConcept> {
        self.body_site.as_ref()
    }

    pub fn method(&self) -> Option<&CodeableConcept> {
        self.method.as_ref()
    }

    pub fn component(&self) -> &[ObservationComponent] {
        &self.component
    }

    /// obs-7: a component repeating the observation code takes the value,
    /// so the observation itself must not carry one.
    fn component_codes_distinct(&self) -> bool {
        if self.value.is_none() {
            return true;
        }
        let codings = self.code.coding();
        !self.component.iter().any(|component| {
            component
                .code()
                .coding()
                .iter()
                .any(|coding| codings.contains(coding))
        })
    }
}

crate::element::delegate_capabilities!(ObservationData => domain: domain_resource);

impl Validatable for ObservationData {
    type Base = DomainResource;

    fn base(&self) -> &DomainResource {
        &self.domain
    }

    fn check(&self, config: &ModelConfig) -> Result<()> {
        check_reference_type(self.subject.as_ref(), "subject", SUBJECT_TARGETS, config)?;
        check_reference_type(self.encounter.as_ref(), "encounter", ENCOUNTER_TARGETS, config)?;
        check_reference_types(&self.performer, "performer", PERFORMER_TARGETS, config)?;
        check_constraint(
            "obs-6",
            self.data_absent_reason.is_none() || self.value.is_none(),
            "dataAbsentReason SHALL only be present if Observation.value[x] is not present",
        )?;
        check_constraint(
            "obs-7",
            self.component_codes_distinct(),
            "If Observation.code is the same as an Observation.component.code then the value element associated with the code SHALL NOT be present",
        )
    }
}

impl NodeData for ObservationData {
    const TYPE_NAME: &'static str = "Observation";
    const KIND: NodeKind = NodeKind::Resource;

    fn has_children(&self) -> bool {
        true
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.domain.accept_children(visitor);
        accept_list(&self.identifier, "identifier", visitor);
        accept(&self.status, "status", visitor);
        accept_list(&self.category, "category", visitor);
        accept(&self.code, "code", visitor);
        accept_optional(self.subject.as_ref(), "subject", visitor);
        accept_optional(self.encounter.as_ref(), "encounter", visitor);
        accept_optional(self.effective.as_ref(), "effective", visitor);
        accept_list(&self.performer, "performer", visitor);
        accept_optional(self.value.as_ref(), "value", visitor);
        accept_optional(self.data_absent_reason.as_ref(), "dataAbsentReason", visitor);
        accept_list(&self.interpretation, "interpretation", visitor);
        accept_list(&self.note, "note", visitor);
        accept_optional(self.body_site.as_ref(), "bodySite", visitor);
        accept_optional(self.method.as_ref(), "method", visitor);
        accept_list(&self.component, "component", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    domain: DomainResourceBuilder,
    identifier: Vec<Option<Identifier>>,
    status: Staged<Code>,
    category: Vec<Option<CodeableConcept>>,
    code: Staged<CodeableConcept>,
    subject: Staged<Reference>,
    encounter: Staged<Reference>,
    effective: Staged<Box<dyn Node>>,
    performer: Vec<Option<Reference>>,
    value: Staged<Box<dyn Node>>,
    data_absent_reason: Staged<CodeableConcept>,
    interpretation: Vec<Option<CodeableConcept>>,
    note: Vec<Option<Annotation>>,
    body_site: Staged<CodeableConcept>,
    method: Staged<CodeableConcept>,
    component: Vec<Option<ObservationComponent>>,
}

impl ResourceSetters for ObservationBuilder {
    fn resource_builder(&mut self) -> &mut ResourceBuilder {
        self.domain.resource_builder()
    }
}

impl DomainResourceSetters for ObservationBuilder {
    fn domain_resource_builder(&mut self) -> &mut DomainResourceBuilder {
        &mut self.domain
    }
}

impl ObservationBuilder {
    pub fn identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier.push(identifier.into());
        self
    }

    pub fn identifiers(mut self, identifier: impl IntoIterator<Item = Identifier>) -> Self {
        self.identifier = identifier.into_iter().map(Some).collect();
        self
    }

    /// Required.
    pub fn status(mut self, status: impl IntoElement<Code>) -> Self {
        self.status = Some(status.into_element());
        self
    }

    pub fn category(mut self, category: impl Into<Option<CodeableConcept>>) -> Self {
        self.category.push(category.into());
        self
    }

    pub fn categories(mut self, category: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.category = category.into_iter().map(Some).collect();
        self
    }

    /// Required.
    pub fn code(mut self, code: impl IntoElement<CodeableConcept>) -> Self {
        self.code = Some(code.into_element());
        self
    }

    pub fn subject(mut self, subject: impl IntoElement<Reference>) -> Self {
        self.subject = Some(subject.into_element());
        self
    }

    pub fn encounter(mut self, encounter: impl IntoElement<Reference>) -> Self {
        self.encounter = Some(encounter.into_element());
        self
    }

    /// A [`DateTime`] or a [`Period`].
    pub fn effective(mut self, effective: impl IntoNode) -> Self {
        self.effective = Some(effective.into_node());
        self
    }

    pub fn performer(mut self, performer: impl Into<Option<Reference>>) -> Self {
        self.performer.push(performer.into());
        self
    }

    pub fn performers(mut self, performer: impl IntoIterator<Item = Reference>) -> Self {
        self.performer = performer.into_iter().map(Some).collect();
        self
    }

    /// One of the [`ObservationValue`] types.
    pub fn value(mut self, value: impl IntoNode) -> Self {
        self.value = Some(value.into_node());
        self
    }

    pub fn data_absent_reason(mut self, reason: impl IntoElement<CodeableConcept>) -> Self {
        self.data_absent_reason = Some(reason.into_element());
        self
    }

    pub fn interpretation(mut self, interpretation: impl Into<Option<CodeableConcept>>) -> Self {
        self.interpretation.push(interpretation.into());
        self
    }

    pub fn interpretations(
        mut self,
        interpretation: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.interpretation = interpretation.into_iter().map(Some).collect();
        self
    }

    pub fn note(mut self, note: impl Into<Option<Annotation>>) -> Self {
        self.note.push(note.into());
        self
    }

    pub fn notes(mut self, note: impl IntoIterator<Item = Annotation>) -> Self {
        self.note = note.into_iter().map(Some).collect();
        self
    }

    pub fn body_site(mut self, body_site: impl IntoElement<CodeableConcept>) -> Self {
        self.body_site = Some(body_site.into_element());
        self
    }

    pub fn method(mut self, method: impl IntoElement<CodeableConcept>) -> Self {
        self.method = Some(method.into_element());
        self
    }

    pub fn component(mut self, component: impl Into<Option<ObservationComponent>>) -> Self {
        self.component.push(component.into());
        self
    }

    pub fn components(mut self, component: impl IntoIterator<Item = ObservationComponent>) -> Self {
        self.component = component.into_iter().map(Some).collect();
        self
    }

    fn stage(self) -> Result<ObservationData> {
        Ok(ObservationData {
            status: require_non_null(self.status, "status")?,
            code: require_non_null(self.code, "code")?,
            identifier: check_list(self.identifier, "identifier")?,
            category: check_list(self.category, "category")?,
            performer: check_list(self.performer, "performer")?,
            interpretation: check_list(self.interpretation, "interpretation")?,
            note: check_list(self.note, "note")?,
            component: check_list(self.component, "component")?,
            effective: choice_element(self.effective, "effective")?,
            value: choice_element(self.value, "value")?,
            subject: optional(self.subject)?,
            encounter: optional(self.encounter)?,
            data_absent_reason: optional(self.data_absent_reason)?,
            body_site: optional(self.body_site)?,
            method: optional(self.method)?,
            domain: self.domain.freeze()?,
        })
    }
}

impl From<&Observation> for ObservationBuilder {
    fn from(node: &Observation) -> Self {
        Self {
            domain: DomainResourceBuilder::from(&node.domain),
            identifier: restage(&node.identifier),
            status: restage_one(Some(&node.status)),
            category: restage(&node.category),
            code: restage_one(Some(&node.code)),
            subject: restage_one(node.subject.as_ref()),
            encounter: restage_one(node.encounter.as_ref()),
            effective: restage_choice(node.effective.as_ref()),
            performer: restage(&node.performer),
            value: restage_choice(node.value.as_ref()),
            data_absent_reason: restage_one(node.data_absent_reason.as_ref()),
            interpretation: restage(&node.interpretation),
            note: restage(&node.note),
            body_site: restage_one(node.body_site.as_ref()),
            method: restage_one(node.method.as_ref()),
            component: restage(&node.component),
        }
    }
}

builder_lifecycle!(Observation, ObservationBuilder);

// ============================================================================
// Observation.component
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObservationComponentData {
    backbone: BackboneElement,
    code: CodeableConcept,
    value: Option<ObservationValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
}

/// A component result, for observations made of several measurements.
pub type ObservationComponent = Frozen<ObservationComponentData>;

impl ObservationComponentData {
    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn value(&self) -> Option<&ObservationValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }
}

crate::element::delegate_capabilities!(ObservationComponentData => backbone: backbone);

impl Validatable for ObservationComponentData {
    type Base = BackboneElement;

    fn base(&self) -> &BackboneElement {
        &self.backbone
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

impl NodeData for ObservationComponentData {
    const TYPE_NAME: &'static str = "Observation.component";
    const KIND: NodeKind = NodeKind::Backbone;

    fn has_children(&self) -> bool {
        true
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept(&self.code, "code", visitor);
        accept_optional(self.value.as_ref(), "value", visitor);
        accept_optional(self.data_absent_reason.as_ref(), "dataAbsentReason", visitor);
        accept_list(&self.interpretation, "interpretation", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationComponentBuilder {
    backbone: BackboneElementBuilder,
    code: Staged<CodeableConcept>,
    value: Staged<Box<dyn Node>>,
    data_absent_reason: Staged<CodeableConcept>,
    interpretation: Vec<Option<CodeableConcept>>,
}

impl ElementSetters for ObservationComponentBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        self.backbone.element_builder()
    }
}

impl BackboneElementSetters for ObservationComponentBuilder {
    fn backbone_builder(&mut self) -> &mut BackboneElementBuilder {
        &mut self.backbone
    }
}

impl ObservationComponentBuilder {
    /// Required.
    pub fn code(mut self, code: impl IntoElement<CodeableConcept>) -> Self {
        self.code = Some(code.into_element());
        self
    }

    /// One of the [`ObservationValue`] types.
    pub fn value(mut self, value: impl IntoNode) -> Self {
        self.value = Some(value.into_node());
        self
    }

    pub fn data_absent_reason(mut self, reason: impl IntoElement<CodeableConcept>) -> Self {
        self.data_absent_reason = Some(reason.into_element());
        self
    }

    pub fn interpretation(mut self, interpretation: impl Into<Option<CodeableConcept>>) -> Self {
        self.interpretation.push(interpretation.into());
        self
    }

    pub fn interpretations(
        mut self,
        interpretation: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.interpretation = interpretation.into_iter().map(Some).collect();
        self
    }

    fn stage(self) -> Result<ObservationComponentData> {
        Ok(ObservationComponentData {
            code: require_non_null(self.code, "code")?,
            interpretation: check_list(self.interpretation, "interpretation")?,
            value: choice_element(self.value, "value")?,
            data_absent_reason: optional(self.data_absent_reason)?,
            backbone: self.backbone.freeze()?,
        })
    }
}

impl From<&ObservationComponent> for ObservationComponentBuilder {
    fn from(node: &ObservationComponent) -> Self {
        Self {
            backbone: BackboneElementBuilder::from(&node.backbone),
            code: restage_one(Some(&node.code)),
            value: restage_choice(node.value.as_ref()),
            data_absent_reason: restage_one(node.data_absent_reason.as_ref()),
            interpretation: restage(&node.interpretation),
        }
    }
}

builder_lifecycle!(ObservationComponent, ObservationComponentBuilder);
