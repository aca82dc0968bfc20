// crates/oscal-core/src/parser.rs
// ============================================================================
// Module: OSCAL Document Parser
// Description: Type detection, version detection, and structural validation.
// Purpose: Turn a raw JSON-shaped value into a typed, tagged document.
// Dependencies: serde_json, thiserror, crate::model, crate::xml
// ============================================================================

//! ## Overview
//! The parser is the single ingestion boundary. It detects which of the six
//! OSCAL envelopes a value carries, checks the minimum required fields with
//! narrow hand-written checks, and then types the body.
//! Invariants:
//! - Failures are returned as [`ParseError`]; nothing panics on bad input.
//! - Version detection never fails; absence yields `"unknown"`.
//! - Nested structures are not validated beyond what typing requires.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::model::Document;
use crate::model::DocumentType;
use crate::model::ParsedDocument;
use crate::xml::xml_to_json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Version reported when no `metadata.oscal-version` is present.
pub const UNKNOWN_VERSION: &str = "unknown";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Document parsing failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages are human-readable and safe to show to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input text could not be parsed as XML or JSON.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// No known document envelope was found.
    #[error(
        "unrecognized document type: expected one of catalog, profile, component-definition, \
         system-security-plan, assessment-results, plan-of-action-and-milestones"
    )]
    UnrecognizedType,
    /// A required field is absent or has the wrong shape.
    #[error("{message}")]
    MissingRequiredField {
        /// Dotted field path (for example `metadata.title`).
        field: String,
        /// Human-readable description naming the field.
        message: String,
    },
    /// The body could not be typed.
    #[error("invalid {document_type} structure: {message}")]
    InvalidStructure {
        /// Detected document type.
        document_type: DocumentType,
        /// Typing failure detail.
        message: String,
    },
}

impl ParseError {
    /// Builds a [`ParseError::MissingRequiredField`] for a dotted field path.
    fn missing(field: impl Into<String>, expectation: &str) -> Self {
        let field = field.into();
        let message = format!("missing required field: {field} ({expectation})");
        Self::MissingRequiredField {
            field,
            message,
        }
    }
}

// ============================================================================
// SECTION: Format Detection
// ============================================================================

/// Serialization format of document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// OSCAL JSON.
    Json,
    /// OSCAL XML.
    Xml,
}

impl DocumentFormat {
    /// Detects the format from the first non-whitespace character.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.trim_start_matches('\u{feff}').trim_start().starts_with('<') {
            Self::Xml
        } else {
            Self::Json
        }
    }
}

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Detects the document type from the top-level envelope.
///
/// The first key in [`DocumentType::ALL`] order whose value is an object wins.
#[must_use]
pub fn detect_document_type(value: &Value) -> Option<DocumentType> {
    let object = value.as_object()?;
    DocumentType::ALL
        .into_iter()
        .find(|kind| object.get(kind.key()).is_some_and(Value::is_object))
}

/// Detects the OSCAL version from `<type>.metadata.oscal-version`.
#[must_use]
pub fn detect_oscal_version(value: &Value) -> String {
    let Some(object) = value.as_object() else {
        return UNKNOWN_VERSION.to_string();
    };
    DocumentType::ALL
        .into_iter()
        .find_map(|kind| {
            object
                .get(kind.key())
                .and_then(|body| body.get("metadata"))
                .and_then(|metadata| metadata.get("oscal-version"))
                .and_then(Value::as_str)
        })
        .map_or_else(|| UNKNOWN_VERSION.to_string(), str::to_string)
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses OSCAL JSON text.
///
/// # Errors
///
/// Returns [`ParseError`] when the text is not JSON or the document is invalid.
pub fn parse_json_text(text: &str) -> Result<ParsedDocument, ParseError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ParseError::MalformedInput(err.to_string()))?;
    parse_document(value)
}

/// Parses OSCAL XML text through the format adapter.
///
/// # Errors
///
/// Returns [`ParseError`] when the text is not XML or the document is invalid.
pub fn parse_xml_text(text: &str) -> Result<ParsedDocument, ParseError> {
    parse_document(xml_to_json(text)?)
}

/// Parses OSCAL text in either format, detected via [`DocumentFormat::detect`].
///
/// # Errors
///
/// Returns [`ParseError`] when the text cannot be parsed or validated.
pub fn parse_document_text(text: &str) -> Result<ParsedDocument, ParseError> {
    match DocumentFormat::detect(text) {
        DocumentFormat::Json => parse_json_text(text),
        DocumentFormat::Xml => parse_xml_text(text),
    }
}

/// Validates and types a JSON-shaped document value.
///
/// # Errors
///
/// Returns [`ParseError::UnrecognizedType`] when no envelope matches,
/// [`ParseError::MissingRequiredField`] when minimum structure is absent, and
/// [`ParseError::InvalidStructure`] when the body cannot be typed.
pub fn parse_document(mut value: Value) -> Result<ParsedDocument, ParseError> {
    let document_type = detect_document_type(&value).ok_or(ParseError::UnrecognizedType)?;
    let oscal_version = detect_oscal_version(&value);
    let body = value
        .as_object_mut()
        .and_then(|object| object.remove(document_type.key()))
        .ok_or(ParseError::UnrecognizedType)?;
    let fields = body.as_object().ok_or(ParseError::UnrecognizedType)?;
    validate_required(document_type, fields)?;

    let document = match document_type {
        DocumentType::Catalog => Document::Catalog(type_body(document_type, body)?),
        DocumentType::Profile => Document::Profile(type_body(document_type, body)?),
        DocumentType::ComponentDefinition => {
            Document::ComponentDefinition(type_body(document_type, body)?)
        }
        DocumentType::SystemSecurityPlan => {
            Document::SystemSecurityPlan(type_body(document_type, body)?)
        }
        DocumentType::AssessmentResults => {
            Document::AssessmentResults(type_body(document_type, body)?)
        }
        DocumentType::PlanOfActionAndMilestones => {
            Document::PlanOfActionAndMilestones(type_body(document_type, body)?)
        }
    };
    Ok(ParsedDocument {
        document_type,
        oscal_version,
        document,
    })
}

/// Deserializes a validated body into its typed model.
fn type_body<T: DeserializeOwned>(document_type: DocumentType, body: Value) -> Result<T, ParseError> {
    serde_json::from_value(body).map_err(|err| ParseError::InvalidStructure {
        document_type,
        message: err.to_string(),
    })
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Runs the common and per-type required-field checks.
fn validate_required(
    document_type: DocumentType,
    fields: &Map<String, Value>,
) -> Result<(), ParseError> {
    require_non_empty_string(fields, "", "uuid")?;
    let metadata = require_object(fields, "", "metadata")?;
    require_non_empty_string(metadata, "metadata.", "title")?;
    require_non_empty_string(metadata, "metadata.", "oscal-version")?;

    match document_type {
        DocumentType::Catalog | DocumentType::ComponentDefinition => Ok(()),
        DocumentType::Profile => require_non_empty_array(fields, "imports"),
        DocumentType::SystemSecurityPlan => {
            for key in [
                "import-profile",
                "system-characteristics",
                "system-implementation",
                "control-implementation",
            ] {
                require_object(fields, "", key)?;
            }
            Ok(())
        }
        DocumentType::AssessmentResults => require_non_empty_array(fields, "results"),
        DocumentType::PlanOfActionAndMilestones => require_non_empty_array(fields, "poam-items"),
    }
}

/// Requires `key` to be a non-empty string.
fn require_non_empty_string(
    fields: &Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<(), ParseError> {
    match fields.get(key).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(ParseError::missing(format!("{prefix}{key}"), "expected a non-empty string")),
    }
}

/// Requires `key` to be an object and returns it.
fn require_object<'a>(
    fields: &'a Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<&'a Map<String, Value>, ParseError> {
    fields
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| ParseError::missing(format!("{prefix}{key}"), "expected an object"))
}

/// Requires `key` to be a non-empty array.
fn require_non_empty_array(fields: &Map<String, Value>, key: &str) -> Result<(), ParseError> {
    match fields.get(key).and_then(Value::as_array) {
        Some(items) if !items.is_empty() => Ok(()),
        _ => Err(ParseError::missing(key, "expected a non-empty array")),
    }
}
