//! Record the FHIRPath-style location of every node

use super::Visitor;
use crate::element::Node;

/// Builds paths such as `Observation.component[1].code.coding[0]`.
///
/// The entry node's name becomes the first path segment.
#[derive(Debug, Default)]
pub struct PathVisitor {
    segments: Vec<String>,
    entries: Vec<(String, &'static str)>,
}

impl PathVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and return `(path, type name)` for every node, in order.
    pub fn collect(root: &dyn Node) -> Vec<(String, &'static str)> {
        let mut visitor = Self::new();
        root.accept(root.type_name(), None, &mut visitor);
        visitor.entries
    }

    pub fn entries(&self) -> &[(String, &'static str)] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Path of the node currently being visited.
    pub fn current_path(&self) -> String {
        self.segments.join(".")
    }
}

impl Visitor for PathVisitor {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Node) {
        let segment = match index {
            Some(index) => format!("{name}[{index}]"),
            None => name.to_string(),
        };
        self.segments.push(segment);
        let path = self.current_path();
        tracing::trace!(path = %path, node = node.type_name(), "visit");
        self.entries.push((path, node.type_name()));
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Node) {
        self.segments.pop();
    }
}
