use super::{
    Annotation, Boolean, Canonical, Code, CodeableConcept, Coding, Date, DateTime, Decimal,
    FhirString, Id, Identifier, Integer, Markdown, Period, PositiveInt, Quantity, Range,
    Reference, UnsignedInt, Uri,
};
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_choice, Element, ElementBuilder, ElementSetters, Frozen,
    HasExtensions, IntoNode, Node, NodeData, NodeKind, Staged,
};
use crate::error::{Error, Result};
use crate::validation::{check_constraint, check_uri, choice_element, Validatable};
use crate::visitor::{accept_optional, accept_primitive, PrimitiveValue, Visitor};

crate::choice_type! {
    /// Extension.value[x]
    pub enum ExtensionValue {
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

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionData {
    element: Element,
    url: String,
    value: Option<ExtensionValue>,
}

/// Additional content defined by implementations, keyed by `url`.
pub type Extension = Frozen<ExtensionData>;

impl ExtensionData {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn value(&self) -> Option<&ExtensionValue> {
        self.value.as_ref()
    }
}

crate::element::delegate_capabilities!(ExtensionData => element: element);

impl Validatable for ExtensionData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, config: &ModelConfig) -> Result<()> {
        check_uri(&self.url, config)?;
        check_constraint(
            "ext-1",
            self.element.extension().is_empty() != self.value.is_none(),
            "Must have either extensions or value[x], not both",
        )
    }
}

impl NodeData for ExtensionData {
    const TYPE_NAME: &'static str = "Extension";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children() || self.value.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_primitive(Some(PrimitiveValue::String(&self.url)), "url", visitor);
        accept_optional(self.value.as_ref(), "value", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    element: ElementBuilder,
    url: Option<String>,
    value: Staged<Box<dyn Node>>,
}

impl ElementSetters for ExtensionBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl ExtensionBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl IntoNode) -> Self {
        self.value = Some(value.into_node());
        self
    }

    fn stage(self) -> Result<ExtensionData> {
        Ok(ExtensionData {
            url: self.url.ok_or_else(|| Error::MissingRequired("url".to_string()))?,
            value: choice_element(self.value, "value")?,
            element: self.element.freeze()?,
        })
    }
}

impl From<&Extension> for ExtensionBuilder {
    fn from(node: &Extension) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            url: Some(node.url.clone()),
            value: restage_choice(node.value.as_ref()),
        }
    }
}

builder_lifecycle!(Extension, ExtensionBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::ChoiceType;

    #[test]
    fn test_url_is_required() {
        let err = Extension::builder().value("x").build().unwrap_err();
        assert_eq!(err, Error::MissingRequired("url".to_string()));
    }

    #[test]
    fn test_ext_1_value_or_nested_extensions() {
        let url = "http://example.org/ext";
        assert!(Extension::builder().url(url).value(true).build().is_ok());

        let nested = Extension::builder().url("child").value(1_i32).build().unwrap();
        assert!(Extension::builder().url(url).extension(nested.clone()).build().is_ok());

        let both = Extension::builder()
            .url(url)
            .value(true)
            .extension(nested)
            .build()
            .unwrap_err();
        assert!(matches!(both, Error::Constraint { key: "ext-1", .. }));

        let neither = Extension::builder().url(url).id("e1").build().unwrap_err();
        assert!(matches!(neither, Error::Constraint { key: "ext-1", .. }));
    }

    #[test]
    fn test_url_alone_is_an_empty_element() {
        // url is an attribute, not a child
        let err = Extension::builder()
            .url("http://example.org/ext")
            .build()
            .unwrap_err();
        assert_eq!(err, Error::EmptyElement("Extension"));
    }

    #[test]
    fn test_extension_is_not_an_extension_value() {
        assert!(!ExtensionValue::ALLOWED.contains(&"Extension"));
        let inner = Extension::builder().url("a").value(1_i32).build().unwrap();
        let err = Extension::builder().url("b").value(inner).build().unwrap_err();
        assert!(matches!(err, Error::DisallowedChoiceType { found: "Extension", .. }));
    }
}
