//! Choice elements (`value[x]` and friends)
//!
//! A choice element holds at most one value drawn from a closed set of
//! concrete types. Each field gets its own enum, declared with
//! [`choice_type!`], so consumers can match exhaustively over the permitted
//! kinds. The same declaration yields the runtime allow-list used when a
//! builder narrows an arbitrary staged node into the field's enum.

use crate::element::Node;
use std::fmt::Debug;
use std::hash::Hash;

pub trait ChoiceType: Sized + Clone + Debug + PartialEq + Eq + Hash + Send + Sync {
    /// FHIR type names of the permitted types, in declaration order.
    const ALLOWED: &'static [&'static str];

    /// Match the concrete runtime type of `node` against the permitted types.
    fn narrow(node: &dyn Node) -> Option<Self>;

    fn as_node(&self) -> &dyn Node;

    fn type_name(&self) -> &'static str {
        self.as_node().type_name()
    }

    /// Re-open the value, e.g. to seed a builder from an existing node.
    fn to_node(&self) -> Box<dyn Node> {
        self.as_node().clone_node()
    }
}

/// Declare the closed set of types of a choice element.
///
/// ```ignore
/// choice_type! {
///     /// Observation.effective[x]
///     pub enum ObservationEffective {
///         DateTime(DateTime),
///         Period(Period),
///     }
/// }
/// ```
#[macro_export]
macro_rules! choice_type {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $crate::choice::ChoiceType for $name {
            const ALLOWED: &'static [&'static str] =
                &[$(<$ty as $crate::element::NodeType>::TYPE_NAME),+];

            fn narrow(node: &dyn $crate::element::Node) -> Option<Self> {
                $(
                    if let Some(value) = node.downcast_ref::<$ty>() {
                        return Some(Self::$variant(value.clone()));
                    }
                )+
                None
            }

            fn as_node(&self) -> &dyn $crate::element::Node {
                match self {
                    $(Self::$variant(value) => value),+
                }
            }
        }

        impl $crate::visitor::Visitable for $name {
            fn accept(
                &self,
                name: &str,
                index: Option<usize>,
                visitor: &mut dyn $crate::visitor::Visitor,
            ) {
                $crate::choice::ChoiceType::as_node(self).accept(name, index, visitor)
            }
        }

        impl $crate::element::IntoNode for $name {
            fn into_node(
                self,
            ) -> $crate::error::Result<Box<dyn $crate::element::Node>> {
                Ok($crate::choice::ChoiceType::to_node(&self))
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{Canonical, Coding, FhirString, Integer, PositiveInt, Uri};

    crate::choice_type! {
        enum Sample {
            Integer(Integer),
            String(FhirString),
            Uri(Uri),
        }
    }

    #[test]
    fn test_allowed_follows_declaration_order() {
        assert_eq!(Sample::ALLOWED, &["integer", "string", "uri"]);
    }

    #[test]
    fn test_narrow_matches_concrete_type() {
        let integer = Integer::of(3).unwrap();
        let narrowed = Sample::narrow(&integer).unwrap();
        assert_eq!(narrowed, Sample::Integer(integer));
        assert_eq!(narrowed.type_name(), "integer");
    }

    #[test]
    fn test_narrow_rejects_subtypes_and_strangers() {
        // positiveInt and canonical specialise integer and uri, but are distinct kinds
        assert!(Sample::narrow(&PositiveInt::of(3).unwrap()).is_none());
        assert!(Sample::narrow(&Canonical::of("http://example.org/sd").unwrap()).is_none());

        let coding = Coding::builder().code("x").build().unwrap();
        assert!(Sample::narrow(&coding).is_none());
    }

    #[test]
    fn test_to_node_round_trip() {
        let value = Sample::from(FhirString::of("text").unwrap());
        let node = value.to_node();
        assert!(node.is::<FhirString>());
        assert_eq!(Sample::narrow(node.as_ref()), Some(value));
    }
}
