use super::Quantity;
use crate::config::ModelConfig;
use crate::element::{
    builder_lifecycle, restage_one, Element, ElementBuilder, ElementSetters, Frozen, IntoElement,
    NodeData, NodeKind, Staged,
};
use crate::error::Result;
use crate::validation::{check_constraint, optional, prohibited, Validatable};
use crate::visitor::{accept_optional, Visitor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeData {
    element: Element,
    low: Option<Quantity>,
    high: Option<Quantity>,
}

/// A set of ordered quantities between a lower and an upper limit.
pub type Range = Frozen<RangeData>;

impl RangeData {
    pub fn low(&self) -> Option<&Quantity> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&Quantity> {
        self.high.as_ref()
    }

    fn is_ordered(&self) -> bool {
        let (Some(low), Some(high)) = (&self.low, &self.high) else {
            return true;
        };
        let (Some(low_value), Some(high_value)) = (low.value(), high.value()) else {
            return true;
        };
        // quantities in different units are not comparable here
        if low.unit_key() != high.unit_key() {
            return true;
        }
        match (low_value.value(), high_value.value()) {
            (Some(low_value), Some(high_value)) => low_value <= high_value,
            _ => true,
        }
    }
}

crate::element::delegate_capabilities!(RangeData => element: element);

impl Validatable for RangeData {
    type Base = Element;

    fn base(&self) -> &Element {
        &self.element
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        // low and high are simple quantities
        prohibited(self.low.as_ref().and_then(|low| low.comparator()), "low.comparator")?;
        prohibited(self.high.as_ref().and_then(|high| high.comparator()), "high.comparator")?;
        check_constraint(
            "rng-2",
            self.is_ordered(),
            "If present, low SHALL have a lower value than high",
        )
    }
}

impl NodeData for RangeData {
    const TYPE_NAME: &'static str = "Range";
    const KIND: NodeKind = NodeKind::Complex;

    fn has_children(&self) -> bool {
        self.element.has_children() || self.low.is_some() || self.high.is_some()
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        accept_optional(self.low.as_ref(), "low", visitor);
        accept_optional(self.high.as_ref(), "high", visitor);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RangeBuilder {
    element: ElementBuilder,
    low: Staged<Quantity>,
    high: Staged<Quantity>,
}

impl ElementSetters for RangeBuilder {
    fn element_builder(&mut self) -> &mut ElementBuilder {
        &mut self.element
    }
}

impl RangeBuilder {
    pub fn low(mut self, low: impl IntoElement<Quantity>) -> Self {
        self.low = Some(low.into_element());
        self
    }

    pub fn high(mut self, high: impl IntoElement<Quantity>) -> Self {
        self.high = Some(high.into_element());
        self
    }

    fn stage(self) -> Result<RangeData> {
        Ok(RangeData {
            element: self.element.freeze()?,
            low: optional(self.low)?,
            high: optional(self.high)?,
        })
    }
}

impl From<&Range> for RangeBuilder {
    fn from(node: &Range) -> Self {
        Self {
            element: ElementBuilder::from(&node.element),
            low: restage_one(node.low.as_ref()),
            high: restage_one(node.high.as_ref()),
        }
    }
}

builder_lifecycle!(Range, RangeBuilder);
