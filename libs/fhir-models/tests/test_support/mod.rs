#![allow(dead_code)]

use ferrum_models::datatypes::{CodeableConcept, Coding};
use ferrum_models::prelude::*;
use ferrum_models::resources::{Observation, ObservationBuilder};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route library tracing to the test output (`RUST_LOG=ferrum_models=debug`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn loinc_coding(code: &str) -> Coding {
    Coding::builder()
        .system("http://loinc.org")
        .code(code)
        .build()
        .unwrap()
}

pub fn loinc(code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .coding(loinc_coding(code))
        .build()
        .unwrap()
}

/// Builder with every required Observation field set.
pub fn observation(code: &str) -> ObservationBuilder {
    Observation::builder().status("final").code(loinc(code))
}

/// Records every callback as a readable line.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<String>,
    /// `visit` returns false for nodes of this type.
    pub prune: Option<&'static str>,
    /// `pre_visit` returns false for nodes of this type.
    pub skip: Option<&'static str>,
}

impl Recorder {
    pub fn pruning(type_name: &'static str) -> Self {
        Self {
            prune: Some(type_name),
            ..Self::default()
        }
    }

    pub fn skipping(type_name: &'static str) -> Self {
        Self {
            skip: Some(type_name),
            ..Self::default()
        }
    }

    /// Walk `root` with a fresh recorder and return the events.
    pub fn record(root: &dyn Node) -> Vec<String> {
        let mut recorder = Self::default();
        root.accept(root.type_name(), None, &mut recorder);
        recorder.events
    }

    /// Only the `visit_start` events, as `name[index]:Type`.
    pub fn starts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.strip_prefix("start "))
            .map(str::to_string)
            .collect()
    }
}

fn label(name: &str, index: Option<usize>) -> String {
    match index {
        Some(index) => format!("{name}[{index}]"),
        None => name.to_string(),
    }
}

impl Visitor for Recorder {
    fn pre_visit(&mut self, node: &dyn Node) -> bool {
        self.events.push(format!("pre {}", node.type_name()));
        self.skip != Some(node.type_name())
    }

    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Node) {
        self.events
            .push(format!("start {}:{}", label(name, index), node.type_name()));
    }

    fn visit(&mut self, name: &str, index: Option<usize>, node: &dyn Node) -> bool {
        self.events.push(format!("visit {}", label(name, index)));
        self.prune != Some(node.type_name())
    }

    fn visit_end(&mut self, name: &str, index: Option<usize>, _node: &dyn Node) {
        self.events.push(format!("end {}", label(name, index)));
    }

    fn post_visit(&mut self, node: &dyn Node) {
        self.events.push(format!("post {}", node.type_name()));
    }

    fn visit_list_start(&mut self, name: &str, len: usize) {
        self.events.push(format!("list {name} x{len}"));
    }

    fn visit_list_end(&mut self, name: &str, _len: usize) {
        self.events.push(format!("/list {name}"));
    }

    fn visit_primitive(&mut self, name: &str, value: PrimitiveValue<'_>) {
        self.events.push(format!("primitive {name}={value}"));
    }
}
