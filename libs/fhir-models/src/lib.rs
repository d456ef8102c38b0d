//! FHIR element model
//!
//! Immutable FHIR nodes built through validating builders, with closed choice
//! types and a visitor protocol for walking heterogeneous trees.
//!
//! # Module Organization
//!
//! - [`element`]: the node abstraction, base records and capability traits
//! - [`choice`]: choice elements (`value[x]`) as closed enums
//! - [`validation`]: the structural constraint catalog run by `build()`
//! - [`visitor`]: depth-first traversal and stock visitors
//! - [`datatypes`]: primitive and complex datatypes
//! - [`resources`]: resources and their backbone elements
//!
//! # Lifecycle
//!
//! Fields are staged on a builder in any order without validation. `build()`
//! resolves required, list and choice fields, then runs every rule of the
//! type and its base records; it returns either a fully valid node or the
//! first violation. Built nodes are never mutated: cloning shares them and
//! `to_builder()` seeds a new builder for copy-and-modify.
//!
//! # Example
//!
//! ```rust
//! use ferrum_models::prelude::*;
//! use ferrum_models::datatypes::{CodeableConcept, Coding, Quantity};
//! use ferrum_models::resources::{Observation, ObservationValue};
//! use rust_decimal::Decimal;
//!
//! let code = CodeableConcept::builder()
//!     .coding(
//!         Coding::builder()
//!             .system("http://loinc.org")
//!             .code("8867-4")
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let heart_rate = Quantity::builder()
//!     .value(Decimal::new(72, 0))
//!     .system("http://unitsofmeasure.org")
//!     .code("/min")
//!     .build()
//!     .unwrap();
//!
//! let observation = Observation::builder()
//!     .status("final")
//!     .code(code)
//!     .subject(Reference::to("Patient/example").unwrap())
//!     .value(heart_rate)
//!     .build()
//!     .unwrap();
//!
//! assert!(matches!(observation.value(), Some(ObservationValue::Quantity(_))));
//!
//! // A disallowed choice type fails the build
//! let err = Observation::builder()
//!     .status("final")
//!     .code(observation.code().clone())
//!     .value(Reference::to("Patient/example").unwrap())
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err.element(), Some("value"));
//! ```

pub mod choice;
pub mod config;
pub mod datatypes;
pub mod element;
pub mod error;
pub mod resource_types;
pub mod resources;
pub mod validation;
pub mod visitor;

pub use config::{ConfigError, ModelConfig, ModelConfigBuilder};
pub use element::{Frozen, Node, NodeKind, NodeType};
pub use error::{Error, Result};

/// Traits needed to call builder setters, read capabilities and traverse.
pub mod prelude {
    pub use crate::choice::ChoiceType;
    pub use crate::datatypes::Reference;
    pub use crate::element::{
        BackboneElementSetters, DomainResourceSetters, ElementSetters, HasExtensions, HasId,
        HasModifierExtensions, IntoElement, IntoNode, Node, NodeType, ResourceSetters,
    };
    pub use crate::visitor::{PrimitiveValue, Visitable, Visitor};
}
