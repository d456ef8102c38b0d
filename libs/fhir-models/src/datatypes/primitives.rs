//! Primitive datatypes
//!
//! Every primitive is an element (id and extensions) plus an optional raw
//! value. The value may be absent when extensions carry the meaning instead,
//! e.g. a data-absent-reason.
//!
//! Specialised primitives (`positiveInt`, `code`, `canonical`, ...) are
//! separate concrete types, not refinements of their base primitive.

use super::temporal::{PartialDate, PartialDateTime};
use crate::config::ModelConfig;
use crate::element::{
    Element, ElementBuilder, ElementSetters, Frozen, IntoElement, IntoNode, Node, NodeData,
    NodeKind,
};
use crate::error::Result;
use crate::validation::{
    check_code, check_id, check_min_value, check_string, check_uri, Validatable,
};
use crate::visitor::{accept_primitive, PrimitiveValue, Visitor};
use chrono::{DateTime as ChronoDateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal as RustDecimal;

macro_rules! primitive {
    (
        $(#[$meta:meta])*
        $name:ident($data:ident, $builder:ident) = $type_name:literal {
            value: $value:ty,
            get: |$g:ident| -> $ret:ty { $get:expr },
            visit: |$v:ident| $visit:expr,
            check: |$c:ident, $config:ident| $check:expr $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $data {
            element: Element,
            value: Option<$value>,
        }

        $(#[$meta])*
        pub type $name = Frozen<$data>;

        impl $data {
            pub fn value(&self) -> Option<$ret> {
                self.value.as_ref().map(|$g| $get)
            }
        }

        crate::element::delegate_capabilities!($data => element: element);

        impl Validatable for $data {
            type Base = Element;

            fn base(&self) -> &Element {
                &self.element
            }

            #[allow(unused_variables)]
            fn check(&self, $config: &ModelConfig) -> Result<()> {
                match &self.value {
                    Some($c) => $check,
                    None => Ok(()),
                }
            }
        }

        impl NodeData for $data {
            const TYPE_NAME: &'static str = $type_name;
            const KIND: NodeKind = NodeKind::Primitive;

            fn has_value(&self) -> bool {
                self.value.is_some()
            }

            fn has_children(&self) -> bool {
                self.element.has_children()
            }

            fn accept_children(&self, visitor: &mut dyn Visitor) {
                self.element.accept_children(visitor);
                accept_primitive(self.value.as_ref().map(|$v| $visit), "value", visitor);
            }
        }

        #[derive(Debug, Clone, Default)]
        pub struct $builder {
            element: ElementBuilder,
            value: Option<$value>,
        }

        impl ElementSetters for $builder {
            fn element_builder(&mut self) -> &mut ElementBuilder {
                &mut self.element
            }
        }

        impl $builder {
            pub fn value(mut self, value: impl Into<$value>) -> Self {
                self.value = Some(value.into());
                self
            }

            pub fn build(self) -> Result<$name> {
                self.build_with(&ModelConfig::default())
            }

            pub fn build_with(self, config: &ModelConfig) -> Result<$name> {
                let value = self.value;
                let staged = self.element.freeze().map(|element| $data { element, value });
                Frozen::finish(staged, config)
            }
        }

        impl From<&$name> for $builder {
            fn from(node: &$name) -> Self {
                Self {
                    element: ElementBuilder::from(&node.element),
                    value: node.value.clone(),
                }
            }
        }

        impl $name {
            pub fn builder() -> $builder {
                $builder::default()
            }

            pub fn to_builder(&self) -> $builder {
                $builder::from(self)
            }

            /// Wrap a raw value, running the same checks as the builder.
            pub fn of(value: impl Into<$value>) -> Result<Self> {
                Self::builder().value(value).build()
            }
        }
    };
}

/// Convenience conversions from native values, used by setters that take
/// `impl IntoElement<T>`.
macro_rules! into_element {
    ($name:ident: $($native:ty),+) => {
        $(
            impl IntoElement<$name> for $native {
                fn into_element(self) -> Result<$name> {
                    $name::of(self)
                }
            }
        )+
    };
}

/// Default primitive for native values passed to choice setters.
macro_rules! into_node {
    ($name:ident: $($native:ty),+) => {
        $(
            impl IntoNode for $native {
                fn into_node(self) -> Result<Box<dyn Node>> {
                    Ok(Box::new($name::of(self)?))
                }
            }
        )+
    };
}

primitive! {
    /// `boolean`
    Boolean(BooleanData, BooleanBuilder) = "boolean" {
        value: bool,
        get: |value| -> bool { *value },
        visit: |value| PrimitiveValue::Boolean(*value),
        check: |_value, _config| Ok(()),
    }
}

primitive! {
    /// `integer`: signed 32-bit
    Integer(IntegerData, IntegerBuilder) = "integer" {
        value: i32,
        get: |value| -> i32 { *value },
        visit: |value| PrimitiveValue::Integer(*value),
        check: |_value, _config| Ok(()),
    }
}

primitive! {
    /// `unsignedInt`: 0 or greater
    UnsignedInt(UnsignedIntData, UnsignedIntBuilder) = "unsignedInt" {
        value: i32,
        get: |value| -> i32 { *value },
        visit: |value| PrimitiveValue::Integer(*value),
        check: |value, _config| check_min_value(*value, 0),
    }
}

primitive! {
    /// `positiveInt`: 1 or greater
    PositiveInt(PositiveIntData, PositiveIntBuilder) = "positiveInt" {
        value: i32,
        get: |value| -> i32 { *value },
        visit: |value| PrimitiveValue::Integer(*value),
        check: |value, _config| check_min_value(*value, 1),
    }
}

primitive! {
    /// `decimal`, keeping the scale it was written with
    Decimal(DecimalData, DecimalBuilder) = "decimal" {
        value: RustDecimal,
        get: |value| -> &RustDecimal { value },
        visit: |value| PrimitiveValue::Decimal(value),
        check: |_value, _config| Ok(()),
    }
}

primitive! {
    /// `string`
    FhirString(FhirStringData, FhirStringBuilder) = "string" {
        value: String,
        get: |value| -> &str { value.as_str() },
        visit: |value| PrimitiveValue::String(value),
        check: |value, config| check_string(value, config),
    }
}

primitive! {
    /// `code`: a token from a defined set, single spaces only
    Code(CodeData, CodeBuilder) = "code" {
        value: String,
        get: |value| -> &str { value.as_str() },
        visit: |value| PrimitiveValue::String(value),
        check: |value, config| check_code(value, config),
    }
}

primitive! {
    /// `id`: up to 64 characters of `[A-Za-z0-9\-.]`
    Id(IdData, IdBuilder) = "id" {
        value: String,
        get: |value| -> &str { value.as_str() },
        visit: |value| PrimitiveValue::String(value),
        check: |value, _config| check_id(value),
    }
}

primitive! {
    /// `uri`
    Uri(UriData, UriBuilder) = "uri" {
        value: String,
        get: |value| -> &str { value.as_str() },
        visit: |value| PrimitiveValue::String(value),
        check: |value, config| check_uri(value, config),
    }
}

primitive! {
    /// `canonical`: a uri referring to a resource by its canonical URL
    Canonical(CanonicalData, CanonicalBuilder) = "canonical" {
        value: String,
        get: |value| -> &str { value.as_str() },
        visit: |value| PrimitiveValue::String(value),
        check: |value, config| check_uri(value, config),
    }
}

primitive! {
    /// `markdown`
    Markdown(MarkdownData, MarkdownBuilder) = "markdown" {
        value: String,
        get: |value| -> &str { value.as_str() },
        visit: |value| PrimitiveValue::String(value),
        check: |value, config| check_string(value, config),
    }
}

primitive! {
    /// `date`
    Date(DateData, DateBuilder) = "date" {
        value: PartialDate,
        get: |value| -> &PartialDate { value },
        visit: |value| PrimitiveValue::Date(value),
        check: |_value, _config| Ok(()),
    }
}

primitive! {
    /// `dateTime`
    DateTime(DateTimeData, DateTimeBuilder) = "dateTime" {
        value: PartialDateTime,
        get: |value| -> &PartialDateTime { value },
        visit: |value| PrimitiveValue::DateTime(value),
        check: |_value, _config| Ok(()),
    }
}

impl Date {
    /// Parse `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub fn parse(value: &str) -> Result<Self> {
        Self::of(PartialDate::parse(value)?)
    }
}

impl DateTime {
    /// Parse a partial date or an RFC 3339 timestamp with zone offset.
    pub fn parse(value: &str) -> Result<Self> {
        Self::of(PartialDateTime::parse(value)?)
    }
}

into_element!(Boolean: bool);
into_element!(Integer: i32);
into_element!(UnsignedInt: i32);
into_element!(PositiveInt: i32);
into_element!(Decimal: RustDecimal);
into_element!(FhirString: &str, String);
into_element!(Code: &str, String);
into_element!(Id: &str, String);
into_element!(Uri: &str, String);
into_element!(Canonical: &str, String);
into_element!(Markdown: &str, String);
into_element!(Date: NaiveDate, PartialDate);
into_element!(DateTime: NaiveDate, PartialDate, PartialDateTime, ChronoDateTime<FixedOffset>);

impl IntoElement<Date> for &str {
    fn into_element(self) -> Result<Date> {
        Date::parse(self)
    }
}

impl IntoElement<DateTime> for &str {
    fn into_element(self) -> Result<DateTime> {
        DateTime::parse(self)
    }
}

into_node!(Boolean: bool);
into_node!(Integer: i32);
into_node!(Decimal: RustDecimal);
into_node!(FhirString: &str, String);
