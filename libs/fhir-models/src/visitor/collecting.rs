//! Collect every node of one concrete type

use super::Visitor;
use crate::element::{Node, NodeType};

/// Gathers, in traversal order, every node whose concrete type is `T`.
///
/// ```ignore
/// let codings = CollectingVisitor::<Coding>::collect(&observation);
/// ```
#[derive(Debug)]
pub struct CollectingVisitor<T> {
    result: Vec<T>,
}

impl<T: NodeType> CollectingVisitor<T> {
    pub fn new() -> Self {
        Self { result: Vec::new() }
    }

    /// Walk `root` (named after its type) and return the matches.
    pub fn collect(root: &dyn Node) -> Vec<T> {
        let mut visitor = Self::new();
        root.accept(root.type_name(), None, &mut visitor);
        visitor.into_result()
    }

    pub fn result(&self) -> &[T] {
        &self.result
    }

    pub fn into_result(self) -> Vec<T> {
        self.result
    }
}

impl<T: NodeType> Default for CollectingVisitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NodeType> Visitor for CollectingVisitor<T> {
    fn visit(&mut self, _name: &str, _index: Option<usize>, node: &dyn Node) -> bool {
        if let Some(value) = node.downcast_ref::<T>() {
            self.result.push(value.clone());
        }
        true
    }
}
