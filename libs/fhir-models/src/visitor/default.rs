//! Visitor that either walks everything or stops below the entry node

use super::Visitor;
use crate::element::Node;

/// Base behaviour for visitors that only care about a few callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultVisitor {
    visit_children: bool,
}

impl DefaultVisitor {
    pub fn new(visit_children: bool) -> Self {
        Self { visit_children }
    }
}

impl Default for DefaultVisitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Visitor for DefaultVisitor {
    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Node) -> bool {
        self.visit_children
    }
}
