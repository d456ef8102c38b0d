//! FHIR datatypes
//!
//! Primitives live in [`primitives`]; each complex datatype has its own
//! module. Every type is a `Frozen` alias over its data record, built through
//! the matching `*Builder`.

mod annotation;
mod codeable_concept;
mod coding;
mod extension;
mod identifier;
mod period;
mod primitives;
mod quantity;
mod range;
mod reference;
mod temporal;

pub use annotation::{Annotation, AnnotationAuthor, AnnotationBuilder, AnnotationData};
pub use codeable_concept::{CodeableConcept, CodeableConceptBuilder, CodeableConceptData};
pub use coding::{Coding, CodingBuilder, CodingData};
pub use extension::{Extension, ExtensionBuilder, ExtensionData, ExtensionValue};
pub use identifier::{Identifier, IdentifierBuilder, IdentifierData};
pub use period::{Period, PeriodBuilder, PeriodData};
pub use primitives::*;
pub use quantity::{Quantity, QuantityBuilder, QuantityData};
pub use range::{Range, RangeBuilder, RangeData};
pub use reference::{Reference, ReferenceBuilder, ReferenceData};
pub use temporal::{DatePrecision, PartialDate, PartialDateTime};
