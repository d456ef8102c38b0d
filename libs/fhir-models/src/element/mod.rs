//! Node abstraction shared by every generated type
//!
//! A FHIR instance is a tree of immutable nodes. Each concrete type is a
//! plain data record (`NodeData`) wrapped in a [`Frozen`] handle, which adds
//! structural sharing, a cached structural hash and the traversal protocol.
//!
//! # Capabilities
//!
//! Instead of an inheritance chain, shared state lives in small base records
//! embedded by composition ([`Element`], [`BackboneElement`], [`Resource`],
//! [`DomainResource`]) and is exposed through capability traits:
//!
//! - [`HasId`]: optional identifier
//! - [`HasExtensions`]: ordered extensions
//! - [`HasModifierExtensions`]: extensions a consumer must not ignore

mod base;
mod frozen;

pub use base::{
    BackboneElement, BackboneElementBuilder, BackboneElementSetters, DomainResource,
    DomainResourceBuilder, DomainResourceSetters, Element, ElementBuilder, ElementSetters,
    Resource, ResourceBuilder, ResourceSetters,
};
pub use frozen::Frozen;

use crate::choice::ChoiceType;
use crate::datatypes::Extension;
use crate::error::Result;
use crate::validation::Validatable;
use crate::visitor::{Visitable, Visitor};
use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

/// Category of a node, used by the catalog to decide which generic rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Primitive datatype carrying a raw value (`boolean`, `string`, ...)
    Primitive,
    /// Complex datatype (`Coding`, `Quantity`, ...)
    Complex,
    /// Nested element defined inside a resource or datatype
    Backbone,
    /// Resource
    Resource,
}

impl NodeKind {
    /// ele-1 applies to every element, not to resources.
    pub fn requires_value_or_children(self) -> bool {
        !matches!(self, NodeKind::Resource)
    }
}

/// Object-safe view of any built node.
///
/// Visitors and choice fields work against `&dyn Node` so that traversal
/// code never needs to know the full set of concrete types.
pub trait Node: Visitable + Any + Debug + Send + Sync {
    /// FHIR type name (`"integer"`, `"CodeableConcept"`, `"Observation"`, ...)
    fn type_name(&self) -> &'static str;

    fn kind(&self) -> NodeKind;

    /// Whether a primitive carries a raw value.
    fn has_value(&self) -> bool;

    /// Whether any child (id, extension or field) is populated.
    fn has_children(&self) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn clone_node(&self) -> Box<dyn Node>;
}

impl dyn Node {
    /// True when the concrete runtime type is exactly `T`.
    pub fn is<T: Node>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl Clone for Box<dyn Node> {
    fn clone(&self) -> Self {
        self.clone_node()
    }
}

/// Static type information for a concrete node type.
pub trait NodeType: Node + Clone {
    const TYPE_NAME: &'static str;
}

/// Schema hooks implemented by the data record behind each concrete type.
pub trait NodeData: Validatable + Debug + PartialEq + Eq + Hash + Send + Sync + 'static {
    const TYPE_NAME: &'static str;
    const KIND: NodeKind;

    fn has_value(&self) -> bool {
        false
    }

    fn has_children(&self) -> bool;

    /// Visit children in declaration order: id, extensions, then fields.
    fn accept_children(&self, visitor: &mut dyn Visitor);
}

pub trait HasId {
    fn id(&self) -> Option<&str>;
}

pub trait HasExtensions: HasId {
    fn extension(&self) -> &[Extension];

    /// Extensions with the given URL, in order.
    fn extensions_by_url<'a>(&'a self, url: &'a str) -> Box<dyn Iterator<Item = &'a Extension> + 'a> {
        Box::new(self.extension().iter().filter(move |ext| ext.url() == url))
    }
}

pub trait HasModifierExtensions: HasExtensions {
    fn modifier_extension(&self) -> &[Extension];
}

/// Staged value of a scalar field: the element itself, or the error raised
/// while wrapping a native value. Errors surface at `build()`.
pub type Staged<T> = Option<Result<T>>;

/// Conversion used by scalar setters: either an already built element or a
/// native value wrapped through the element's own builder.
pub trait IntoElement<T> {
    fn into_element(self) -> Result<T>;
}

impl<T: NodeType> IntoElement<T> for T {
    fn into_element(self) -> Result<T> {
        Ok(self)
    }
}

/// Conversion used by choice setters. Any node is accepted here; membership
/// in the field's allow-list is checked at `build()`.
pub trait IntoNode {
    fn into_node(self) -> Result<Box<dyn Node>>;
}

impl<T: Node> IntoNode for T {
    fn into_node(self) -> Result<Box<dyn Node>> {
        Ok(Box::new(self))
    }
}

impl IntoNode for Box<dyn Node> {
    fn into_node(self) -> Result<Box<dyn Node>> {
        Ok(self)
    }
}

/// Delegate the capability traits of a data record to its embedded base.
macro_rules! delegate_capabilities {
    ($data:ty => $base:ident: element) => {
        impl $crate::element::HasId for $data {
            fn id(&self) -> Option<&str> {
                $crate::element::HasId::id(&self.$base)
            }
        }

        impl $crate::element::HasExtensions for $data {
            fn extension(&self) -> &[$crate::datatypes::Extension] {
                $crate::element::HasExtensions::extension(&self.$base)
            }
        }
    };
    ($data:ty => $base:ident: backbone) => {
        $crate::element::delegate_capabilities!($data => $base: element);

        impl $crate::element::HasModifierExtensions for $data {
            fn modifier_extension(&self) -> &[$crate::datatypes::Extension] {
                $crate::element::HasModifierExtensions::modifier_extension(&self.$base)
            }
        }
    };
    ($data:ty => $base:ident: resource) => {
        impl $crate::element::HasId for $data {
            fn id(&self) -> Option<&str> {
                $crate::element::HasId::id(&self.$base)
            }
        }
    };
    ($data:ty => $base:ident: domain_resource) => {
        $crate::element::delegate_capabilities!($data => $base: backbone);
    };
}

pub(crate) use delegate_capabilities;

/// `builder()`/`to_builder()` on a node type and `build()`/`build_with()` on
/// its builder. The builder supplies `stage(self) -> Result<Data>`, which
/// resolves staged fields; the catalog then runs in [`Frozen::finish`].
macro_rules! builder_lifecycle {
    ($name:ident, $builder:ident) => {
        impl $name {
            pub fn builder() -> $builder {
                $builder::default()
            }

            /// A builder seeded from this node. Sub-nodes are shared, list
            /// accumulators are fresh copies.
            pub fn to_builder(&self) -> $builder {
                $builder::from(self)
            }
        }

        impl $builder {
            pub fn build(self) -> $crate::error::Result<$name> {
                self.build_with(&$crate::config::ModelConfig::default())
            }

            pub fn build_with(
                self,
                config: &$crate::config::ModelConfig,
            ) -> $crate::error::Result<$name> {
                $crate::element::Frozen::finish(self.stage(), config)
            }
        }
    };
}

pub(crate) use builder_lifecycle;

/// Re-stage a built list for a builder.
pub fn restage<T: Clone>(values: &[T]) -> Vec<Option<T>> {
    values.iter().cloned().map(Some).collect()
}

/// Re-stage a built scalar for a builder.
pub fn restage_one<T: Clone>(value: Option<&T>) -> Staged<T> {
    value.cloned().map(Ok)
}

/// Re-stage a built choice value for a builder.
pub fn restage_choice<C: ChoiceType>(value: Option<&C>) -> Staged<Box<dyn Node>> {
    value.map(|choice| Ok(choice.to_node()))
}

impl<T: NodeData + HasId> HasId for Frozen<T> {
    fn id(&self) -> Option<&str> {
        (**self).id()
    }
}

impl<T: NodeData + HasExtensions> HasExtensions for Frozen<T> {
    fn extension(&self) -> &[Extension] {
        (**self).extension()
    }
}

impl<T: NodeData + HasModifierExtensions> HasModifierExtensions for Frozen<T> {
    fn modifier_extension(&self) -> &[Extension] {
        (**self).modifier_extension()
    }
}
