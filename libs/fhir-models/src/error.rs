//! Error types for FHIR model construction

use thiserror::Error;

/// Construction errors raised by `build()`.
///
/// Every variant is fatal: a builder either returns a fully validated node or
/// one of these, never a partially constructed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Missing required element: '{0}'")]
    MissingRequired(String),

    #[error(
        "Invalid type: {found} for choice element: '{element}' must be one of: [{}]",
        .allowed.join(", ")
    )]
    DisallowedChoiceType {
        element: String,
        found: &'static str,
        allowed: &'static [&'static str],
    },

    #[error("Repeating element: '{0}' does not permit null elements")]
    NullListElement(String),

    #[error("ele-1: All FHIR elements must have a @value or children (type: {0})")]
    EmptyElement(&'static str),

    #[error("{key}: {description}")]
    Constraint {
        key: &'static str,
        description: &'static str,
    },

    #[error("Element: '{0}' is prohibited")]
    Prohibited(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl Error {
    /// Name of the element the error refers to, when there is one.
    pub fn element(&self) -> Option<&str> {
        match self {
            Error::MissingRequired(element)
            | Error::NullListElement(element)
            | Error::Prohibited(element) => Some(element),
            Error::DisallowedChoiceType { element, .. } => Some(element),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
