//! Structural constraint catalog
//!
//! Helpers invoked by builders while freezing staged values, and the
//! [`Validatable`] chain run against the frozen record.
//!
//! Each record type validates its own rules and names its base record;
//! [`Validatable::validate`] walks that chain root-first so every ancestor's
//! rules run before the type's own.

use crate::choice::ChoiceType;
use crate::config::ModelConfig;
use crate::datatypes::{Extension, Reference};
use crate::element::{HasExtensions, Node, Staged};
use crate::error::{Error, Result};
use crate::resource_types::is_resource_type;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_STRING_LENGTH: usize = 1;
pub const MAX_STRING_LENGTH: usize = 1_048_576;
pub const MAX_ID_LENGTH: usize = 64;

pub const DATA_ABSENT_REASON_EXTENSION_URL: &str =
    "http://hl7.org/fhir/StructureDefinition/data-absent-reason";

/// Relative literal reference: `[base/]Type/id[/_history/vid]`. Group 4 is the
/// resource type.
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((http|https)://([A-Za-z0-9\-\\.:%$]*/)+)?([A-Za-z]+)/[A-Za-z0-9\-.]{1,64}(/_history/[A-Za-z0-9\-.]{1,64})?$",
    )
    .expect("reference pattern is valid")
});

const RESOURCE_TYPE_GROUP: usize = 4;

/// Per-type rules, chained up the base records.
pub trait Validatable {
    /// The embedded base record whose rules run first. Root records use `()`.
    type Base: Validatable;

    fn base(&self) -> &Self::Base;

    /// Rules owned by this type alone.
    fn check(&self, config: &ModelConfig) -> Result<()>;

    /// Run every ancestor's rules, then this type's.
    fn validate(&self, config: &ModelConfig) -> Result<()> {
        self.base().validate(config)?;
        self.check(config)
    }
}

impl Validatable for () {
    type Base = ();

    fn base(&self) -> &() {
        self
    }

    fn check(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }

    fn validate(&self, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Cardinality
// ============================================================================

/// Resolve a staged optional element, surfacing any wrapping error.
pub fn optional<T>(staged: Staged<T>) -> Result<Option<T>> {
    staged.transpose()
}

/// Resolve a staged required element.
pub fn require_non_null<T>(staged: Staged<T>, element: &str) -> Result<T> {
    optional(staged)?.ok_or_else(|| Error::MissingRequired(element.to_string()))
}

/// Reject absent entries in a repeating element.
pub fn check_list<T>(elements: Vec<Option<T>>, element: &str) -> Result<Vec<T>> {
    elements
        .into_iter()
        .map(|item| item.ok_or_else(|| Error::NullListElement(element.to_string())))
        .collect()
}

/// Like [`check_list`], for repeating elements with a minimum cardinality of one.
pub fn check_non_empty_list<T>(elements: Vec<Option<T>>, element: &str) -> Result<Vec<T>> {
    if elements.is_empty() {
        return Err(Error::MissingRequired(element.to_string()));
    }
    check_list(elements, element)
}

pub fn prohibited<T>(value: Option<&T>, element: &str) -> Result<()> {
    match value {
        Some(_) => Err(Error::Prohibited(element.to_string())),
        None => Ok(()),
    }
}

pub fn prohibited_list<T>(values: &[T], element: &str) -> Result<()> {
    if values.is_empty() {
        Ok(())
    } else {
        Err(Error::Prohibited(element.to_string()))
    }
}

/// ele-1 for callers holding an arbitrary node.
pub fn require_value_or_children(node: &dyn Node) -> Result<()> {
    if node.has_value() || node.has_children() {
        Ok(())
    } else {
        Err(Error::EmptyElement(node.type_name()))
    }
}

/// Cross-field rule: fail with `key` unless `holds`.
pub fn check_constraint(key: &'static str, holds: bool, description: &'static str) -> Result<()> {
    if holds {
        Ok(())
    } else {
        Err(Error::Constraint { key, description })
    }
}

// ============================================================================
// Choice elements
// ============================================================================

/// Narrow a staged choice value to the field's closed set of types.
///
/// Membership is decided on the concrete runtime type: an allow-list naming
/// `integer` does not admit `positiveInt`.
pub fn choice_element<C: ChoiceType>(
    staged: Staged<Box<dyn Node>>,
    element: &str,
) -> Result<Option<C>> {
    let Some(node) = optional(staged)? else {
        return Ok(None);
    };
    let found = node.type_name();
    C::narrow(node.as_ref())
        .map(Some)
        .ok_or_else(|| Error::DisallowedChoiceType {
            element: element.to_string(),
            found,
            allowed: C::ALLOWED,
        })
}

pub fn require_choice_element<C: ChoiceType>(
    staged: Staged<Box<dyn Node>>,
    element: &str,
) -> Result<C> {
    choice_element(staged, element)?.ok_or_else(|| Error::MissingRequired(element.to_string()))
}

// ============================================================================
// Primitive lexical rules
// ============================================================================

fn is_unsupported_control_char(ch: char) -> bool {
    (ch as u32) < 32 && !matches!(ch, '\t' | '\n' | '\r')
}

/// Whitespace as the FHIR lexical rules see it: the Unicode separators
/// minus the no-break spaces, which count as `\S`, plus the ASCII
/// information separators U+001C..U+001F.
fn is_fhir_whitespace(ch: char) -> bool {
    match ch {
        '\u{1c}'..='\u{1f}' => true,
        '\u{85}' | '\u{a0}' | '\u{2007}' | '\u{202f}' => false,
        _ => ch.is_whitespace(),
    }
}

/// Lengths are counted in UTF-16 code units.
fn check_max_length(kind: &str, s: &str) -> Result<()> {
    // UTF-8 never needs fewer bytes than UTF-16 needs code units
    if s.len() <= MAX_STRING_LENGTH {
        return Ok(());
    }
    let length = s.encode_utf16().count();
    if length > MAX_STRING_LENGTH {
        return Err(Error::InvalidValue(format!(
            "{kind} value length: {length} is greater than maximum allowed length: {MAX_STRING_LENGTH}"
        )));
    }
    Ok(())
}

fn check_control_chars(kind: &str, s: &str, config: &ModelConfig) -> Result<()> {
    if config.check_control_chars && s.chars().any(is_unsupported_control_char) {
        return Err(Error::InvalidValue(format!(
            "{kind} value contains unsupported control characters: '{}'",
            s.escape_debug()
        )));
    }
    Ok(())
}

/// `[ \r\n\t\S]+`
pub fn check_string(s: &str, config: &ModelConfig) -> Result<()> {
    check_max_length("String", s)?;
    check_control_chars("String", s, config)?;
    if s.chars().any(|ch| is_fhir_whitespace(ch) && !matches!(ch, ' ' | '\t' | '\r' | '\n')) {
        return Err(Error::InvalidValue(format!(
            "String value: '{s}' is not valid with respect to pattern: [ \\r\\n\\t\\S]+"
        )));
    }
    let count = s.chars().filter(|ch| !is_fhir_whitespace(*ch)).count();
    if count < MIN_STRING_LENGTH {
        return Err(Error::InvalidValue(format!(
            "Trimmed String value length: {count} is less than minimum required length: {MIN_STRING_LENGTH}"
        )));
    }
    Ok(())
}

/// `[^\s]+(\s[^\s]+)*`
pub fn check_code(s: &str, config: &ModelConfig) -> Result<()> {
    let (Some(first), Some(last)) = (s.chars().next(), s.chars().last()) else {
        return Err(Error::InvalidValue(
            "Code value must begin with a non-whitespace character".to_string(),
        ));
    };
    if is_fhir_whitespace(first) {
        return Err(Error::InvalidValue(format!(
            "Code value: '{s}' must begin with a non-whitespace character"
        )));
    }
    if is_fhir_whitespace(last) {
        return Err(Error::InvalidValue(format!(
            "Code value: '{s}' must end with a non-whitespace character"
        )));
    }
    check_control_chars("Code", s, config)?;
    let mut previous_is_space = false;
    for ch in s.chars() {
        if is_fhir_whitespace(ch) {
            if ch != ' ' {
                return Err(Error::InvalidValue(format!(
                    "Code value: '{s}' must not contain whitespace other than a single space"
                )));
            }
            if previous_is_space {
                return Err(Error::InvalidValue(format!(
                    "Code value: '{s}' must not contain consecutive spaces"
                )));
            }
            previous_is_space = true;
        } else {
            previous_is_space = false;
        }
    }
    Ok(())
}

/// `[A-Za-z0-9\-\.]{1,64}`
pub fn check_id(s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(Error::InvalidValue("Id value must not be empty".to_string()));
    }
    if s.len() > MAX_ID_LENGTH {
        return Err(Error::InvalidValue(format!(
            "Id value length: {} is greater than maximum allowed length: {}",
            s.len(),
            MAX_ID_LENGTH
        )));
    }
    if let Some(ch) = s
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '.'))
    {
        return Err(Error::InvalidValue(format!(
            "Id value: '{s}' contains invalid character '{ch}'"
        )));
    }
    Ok(())
}

/// `\S*`
pub fn check_uri(s: &str, config: &ModelConfig) -> Result<()> {
    check_max_length("Uri", s)?;
    check_control_chars("Uri", s, config)?;
    if s.chars().any(is_fhir_whitespace) {
        return Err(Error::InvalidValue(format!(
            "Uri value: '{s}' must not contain whitespace"
        )));
    }
    Ok(())
}

pub fn check_min_value(value: i32, min_value: i32) -> Result<()> {
    if value < min_value {
        return Err(Error::InvalidValue(format!(
            "Integer value: {value} is less than minimum required value: {min_value}"
        )));
    }
    Ok(())
}

pub fn check_pattern(value: &str, pattern: &Regex) -> Result<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidValue(format!(
            "String value: '{value}' is not valid with respect to pattern: {}",
            pattern.as_str()
        )))
    }
}

// ============================================================================
// Reference targets
// ============================================================================

fn has_scheme(literal: &str) -> bool {
    matches!(literal.find(':'), Some(index) if index > 0 && literal.len() > index + 1)
}

/// Check that a reference only targets the permitted resource types.
///
/// Local (`#id`) and absolute (`scheme:...`) references are not inspected.
pub fn check_reference_type(
    reference: Option<&Reference>,
    element: &str,
    allowed: &[&str],
    config: &ModelConfig,
) -> Result<()> {
    let Some(reference) = reference else {
        return Ok(());
    };
    if !config.check_reference_types {
        return Ok(());
    }

    let mut literal_type = None;
    if let Some(literal) = reference.reference().and_then(|r| r.value()) {
        if !literal.starts_with('#') && !has_scheme(literal) {
            let resource_type = match literal.split_once('?') {
                Some((resource_type, _)) => Some(resource_type),
                None => REFERENCE_PATTERN
                    .captures(literal)
                    .and_then(|caps| caps.get(RESOURCE_TYPE_GROUP))
                    .map(|m| m.as_str()),
            };
            let Some(resource_type) = resource_type else {
                return Err(Error::InvalidReference(format!(
                    "Invalid reference value or resource type not found in reference value: '{literal}' for element: '{element}'"
                )));
            };
            if !is_resource_type(resource_type) {
                return Err(Error::InvalidReference(format!(
                    "Resource type found in reference value: '{literal}' for element: '{element}' must be a valid resource type name"
                )));
            }
            if !allowed.contains(&resource_type) {
                return Err(Error::InvalidReference(format!(
                    "Resource type found in reference value: '{literal}' for element: '{element}' must be one of: [{}]",
                    allowed.join(", ")
                )));
            }
            literal_type = Some(resource_type);
        }
    }

    if let Some(declared) = reference.type_().and_then(|t| t.value()) {
        if !is_resource_type(declared) {
            return Err(Error::InvalidReference(format!(
                "Resource type found in Reference.type: '{declared}' for element: '{element}' must be a valid resource type name"
            )));
        }
        if !allowed.contains(&declared) {
            return Err(Error::InvalidReference(format!(
                "Resource type found in Reference.type: '{declared}' for element: '{element}' must be one of: [{}]",
                allowed.join(", ")
            )));
        }
        if let Some(literal_type) = literal_type {
            if literal_type != declared {
                return Err(Error::InvalidReference(format!(
                    "Resource type found in reference value: '{literal_type}' for element: '{element}' does not match Reference.type: {declared}"
                )));
            }
        }
    }

    Ok(())
}

pub fn check_reference_types(
    references: &[Reference],
    element: &str,
    allowed: &[&str],
    config: &ModelConfig,
) -> Result<()> {
    references
        .iter()
        .try_for_each(|reference| check_reference_type(Some(reference), element, allowed, config))
}

// ============================================================================
// Data absent reason
// ============================================================================

fn has_data_absent_reason_extension(extensions: &[Extension]) -> bool {
    extensions
        .iter()
        .any(|ext| ext.url() == DATA_ABSENT_REASON_EXTENSION_URL)
}

/// True when the node's only payload is a data-absent-reason extension.
pub fn has_only_data_absent_reason_extension<T: HasExtensions + Node>(node: &T) -> bool {
    has_data_absent_reason_extension(node.extension()) && !node.has_value()
}
