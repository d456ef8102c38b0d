//! ASCII tree rendering of a node

use super::{PrimitiveValue, Visitor};
use crate::element::Node;
use std::fmt::Write as FmtWrite;

/// Renders a node as an indented tree, one line per node or raw value:
///
/// ```text
/// ├─ Observation: Observation
///   ├─ status: code
///     ├─ value = final
/// ```
#[derive(Debug, Default)]
pub struct TreePrinter {
    depth: usize,
    output: String,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(root: &dyn Node) -> String {
        let mut printer = Self::new();
        root.accept(root.type_name(), None, &mut printer);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, label: std::fmt::Arguments<'_>) {
        let indent = "  ".repeat(self.depth);
        let _ = writeln!(self.output, "{indent}├─ {label}");
    }
}

impl Visitor for TreePrinter {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Node) {
        match index {
            Some(index) => self.line(format_args!("{name}[{index}]: {}", node.type_name())),
            None => self.line(format_args!("{name}: {}", node.type_name())),
        }
        self.depth += 1;
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Node) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn visit_primitive(&mut self, name: &str, value: PrimitiveValue<'_>) {
        self.line(format_args!("{name} = {value}"));
    }
}
