//! Depth-first traversal over built nodes
//!
//! Every node runs the same protocol when [`Visitable::accept`] is called:
//!
//! ```text
//! pre_visit(node) == false  -> skip the node and its subtree entirely
//! visit_start(name, index, node)
//! visit(name, index, node) == true -> children in declaration order
//! visit_end(name, index, node)
//! post_visit(node)
//! ```
//!
//! Children are the id, the extensions (and modifier extensions), then every
//! field in the order the type declares it. Repeating fields are announced by
//! `visit_list_start`/`visit_list_end` and expanded element by element with
//! their index; choice fields visit whichever value is present. Raw primitive
//! payloads are reported through `visit_primitive` and are not nodes.
//!
//! Traversal is synchronous and always runs to completion; the only way to
//! prune is returning `false` from `pre_visit` or `visit`.

mod collecting;
mod default;
mod path;
mod printer;

pub use collecting::CollectingVisitor;
pub use default::DefaultVisitor;
pub use path::PathVisitor;
pub use printer::TreePrinter;

use crate::element::Node;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

use crate::datatypes::{PartialDate, PartialDateTime};

/// A node that can drive a [`Visitor`] over itself and its children.
pub trait Visitable {
    /// `index` is the position inside the enclosing repeating field, `None`
    /// when the node is not list-nested.
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor);
}

/// Raw value held by a primitive or by an id attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    Boolean(bool),
    Integer(i32),
    Decimal(&'a Decimal),
    String(&'a str),
    Date(&'a PartialDate),
    DateTime(&'a PartialDateTime),
}

impl PrimitiveValue<'_> {
    /// Calendar date for temporal values, truncated to the stated precision.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PrimitiveValue::Date(date) => Some(date.lower_bound()),
            PrimitiveValue::DateTime(date_time) => Some(date_time.lower_bound().date_naive()),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Boolean(value) => write!(f, "{value}"),
            PrimitiveValue::Integer(value) => write!(f, "{value}"),
            PrimitiveValue::Decimal(value) => write!(f, "{value}"),
            PrimitiveValue::String(value) => write!(f, "{value}"),
            PrimitiveValue::Date(value) => write!(f, "{value}"),
            PrimitiveValue::DateTime(value) => write!(f, "{value}"),
        }
    }
}

/// Callbacks fired during traversal. All methods default to a full walk
/// that does nothing.
pub trait Visitor {
    /// Gate. Returning `false` skips the node: no further events fire for it.
    fn pre_visit(&mut self, _node: &dyn Node) -> bool {
        true
    }

    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Node) {}

    /// Returning `false` keeps the walk out of the node's children;
    /// `visit_end` and `post_visit` still fire.
    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Node) -> bool {
        true
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Node) {}

    fn post_visit(&mut self, _node: &dyn Node) {}

    /// Before the first element of a non-empty repeating field.
    fn visit_list_start(&mut self, _name: &str, _len: usize) {}

    /// After the last element of a non-empty repeating field.
    fn visit_list_end(&mut self, _name: &str, _len: usize) {}

    fn visit_primitive(&mut self, _name: &str, _value: PrimitiveValue<'_>) {}
}

// ============================================================================
// Child traversal helpers used by `NodeData::accept_children`
// ============================================================================

pub fn accept<T: Visitable + ?Sized>(value: &T, name: &str, visitor: &mut dyn Visitor) {
    value.accept(name, None, visitor);
}

pub fn accept_optional<T: Visitable>(value: Option<&T>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        value.accept(name, None, visitor);
    }
}

pub fn accept_list<T: Visitable>(values: &[T], name: &str, visitor: &mut dyn Visitor) {
    if values.is_empty() {
        return;
    }
    visitor.visit_list_start(name, values.len());
    for (index, value) in values.iter().enumerate() {
        value.accept(name, Some(index), visitor);
    }
    visitor.visit_list_end(name, values.len());
}

pub fn accept_primitive(value: Option<PrimitiveValue<'_>>, name: &str, visitor: &mut dyn Visitor) {
    if let Some(value) = value {
        visitor.visit_primitive(name, value);
    }
}
