use super::DateTime;
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_one, Element, ElementBuilder, ElementSetters, Frozen, IntoElement,
    NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{check_constraint, optional, Validatable};
use crate::visitor::{accept_optional, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodData {
    element: Element,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

/// A time range defined by start and/or end.
pub type Period = Frozen<PeriodData>;

impl PeriodData {
    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }

    /// Only definite violations count: partial values are compared by the
    /// earliest start and the latest end they may denote.
    fn is_ordered(&self) -> bool {
        let start = self.start.as_ref().and_then(|start| start.value());
        let end = self.end.as_ref().and_then(|end| end.value());
        match (start, end) {
            (Some(start), Some(end)) => start.lower_bound() <= end.upper_bound(),
            _ => true,
        }
    }
}

crate::element::delegate_capabilities!(PeriodData => element: element);

impl Validatable for PeriodData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        check_constraint(
            "per-1",
            self.is_ordered(),
            "If present, start SHALL have a lower value than end",
        )
    }
}

impl NodeData for PeriodData {
    const TYPE_NAME: &'static str = "Period";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children() || self.start.is_some() || self.end.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_optional(self.start.as_ref(), "start", visitor);
        accept_optional(self.end.as_ref(), "end", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    element: ElementBuilder,
    start: Staged<DateTime>,
    end: Staged<DateTime>,
}

impl ElementSetters for PeriodBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl PeriodBuilder {
    pub fn start(mut self, start: impl IntoElement<DateTime>) -> Self {
        self.start = Some(start.into_element());
        self
    }

    pub fn end(mut self, end: impl IntoElement<DateTime>) -> Self {
        self.end = Some(end.into_element());
        self
    }

    fn stage(self) -> Result<PeriodData> {
        Ok(PeriodData {
            element: self.element.freeze()?,
            start: optional(self.start)?,
            end: optional(self.end)?,
        })
    }
}

impl From<&Period> for PeriodBuilder {
    fn from(node: &Period) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            start: restage_one(node.start.as_ref()),
            end: restage_one(node.end.as_ref()),
        }
    }
}

builder_lifecycle!(Period, PeriodBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_per_1_start_not_after_end() {
        assert!(Period::builder().start("2024-01-01").end("2024-02-01").build().is_ok());
        assert!(Period::builder().start("2024-01-01").build().is_ok());

        let err = Period::builder()
            .start("2024-03-01")
            .end("2024-02-01")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Constraint { key: "per-1", .. }));
    }

    #[test]
    fn test_per_1_partial_precision_overlap_passes() {
        assert!(Period::builder()
            .start("2024-05-01T10:00:00Z")
            .end("2024-05")
            .build()
            .is_ok());
    }

    #[test]
    fn test_unparseable_date_time_fails_build() {
        let err = Period::builder().start("yesterday").build().unwrap_err();
        assert!(matches!(err, Error::InvalidValue(_)));
    }
}
