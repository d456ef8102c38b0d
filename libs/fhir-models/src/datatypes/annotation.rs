use super::{DateTime, FhirString, Markdown, Reference};
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_choice, restage_one, Element, ElementBuilder, ElementSetters,
    Frozen, IntoElement, IntoNode, Node, NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{
    check_reference_type, choice_element, optional, require_non_null, Validatable,
};
use crate::visitor::{accept, accept_optional, Visitor};

crate::choice_type! {
    /// Annotation.author[x]
    pub enum AnnotationAuthor {
        Reference(Reference),
        String(FhirString),
    }
}

const AUTHOR_TARGETS: &[&str] = &["Practitioner", "Patient", "RelatedPerson", "Organization"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationData {
    element: Element,
    author: Option<AnnotationAuthor>,
    time: Option<DateTime>,
    text: Markdown,
}

/// A text note with attribution.
pub type Annotation = Frozen<AnnotationData>;

impl AnnotationData {
    pub fn author(&self) -> Option<&AnnotationAuthor> {
        self.author.as_ref()
    }

    pub fn time(&self) -> Option<&DateTime> {
        self.time.as_ref()
    }

    pub fn text(&self) -> &Markdown {
        &self.text
    }
}

crate::element::delegate_capabilities!(AnnotationData => element: element);

impl Validatable for AnnotationData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, config: &ModelConfig) -> Result<()> {
        if let Some(AnnotationAuthor::Reference(author)) = &self.author {
            check_reference_type(Some(author), "author", AUTHOR_TARGETS, config)?;
        }
        Ok(())
    }
}

impl NodeData for AnnotationData {
    const TYPE_NAME: &'static str = "Annotation";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        true
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_optional(self.author.as_ref(), "author", visitor);
        accept_optional(self.time.as_ref(), "time", visitor);
        accept(&self.text, "text", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationBuilder {
    element: ElementBuilder,
    author: Staged<Box<dyn Node>>,
    time: Staged<DateTime>,
    text: Staged<Markdown>,
}

impl ElementSetters for AnnotationBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl AnnotationBuilder {
    /// A [`Reference`] or a [`FhirString`].
    pub fn author(mut self, author: impl IntoNode) -> Self {
        self.author = Some(author.into_node());
        self
    }

    pub fn time(mut self, time: impl IntoElement<DateTime>) -> Self {
        self.time = Some(time.into_element());
        self
    }

    pub fn text(mut self, text: impl IntoElement<Markdown>) -> Self {
        self.text = Some(text.into_element());
        self
    }

    fn stage(self) -> Result<AnnotationData> {
        Ok(AnnotationData {
            text: require_non_null(self.text, "text")?,
            element: self.element.freeze()?,
            author: choice_element(self.author, "author")?,
            time: optional(self.time)?,
        })
    }
}

impl From<&Annotation> for AnnotationBuilder {
    fn from(node: &Annotation) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            author: restage_choice(node.author.as_ref()),
            time: restage_one(node.time.as_ref()),
            text: restage_one(Some(&node.text)),
        }
    }
}

builder_lifecycle!(Annotation, AnnotationBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Integer;
    use crate::error::Error;

    #[test]
    fn test_text_is_required() {
        let err = Annotation::builder().author("Dr. Who").build().unwrap_err();
        assert_eq!(err, Error::MissingRequired("text".to_string()));
    }

    #[test]
    fn test_author_choice() {
        let by_name = Annotation::builder().author("Dr. Who").text("note").build().unwrap();
        assert!(matches!(by_name.author(), Some(AnnotationAuthor::String(_))));

        let by_reference = Annotation::builder()
            .author(Reference::to("Practitioner/1").unwrap())
            .text("note")
            .build()
            .unwrap();
        assert!(matches!(by_reference.author(), Some(AnnotationAuthor::Reference(_))));

        let err = Annotation::builder()
            .author(Integer::of(1).unwrap())
            .text("note")
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid type: integer for choice element: 'author' must be one of: [Reference, string]"
        );
    }

    #[test]
    fn test_author_reference_targets() {
        let err = Annotation::builder()
            .author(Reference::to("Device/1").unwrap())
            .text("note")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReference(_)));
    }
}
