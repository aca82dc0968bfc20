// crates/oscal-core/src/lib.rs
// ============================================================================
// Module: OSCAL Core Library
// Description: Document model, parsing, and pure transforms for OSCAL.
// Purpose: Provide every synchronous OSCAL operation behind one crate.
// Dependencies: regex, roxmltree, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! OSCAL Core ingests OSCAL documents in JSON or XML form, validates the
//! minimum structure of the six supported document types, and exposes the
//! pure operations that sit on top of the typed model:
//! - [`xml_to_json`] adapts OSCAL XML into the JSON shape.
//! - [`parse_document`] and friends detect, validate, and type documents.
//! - [`parse_href`] classifies reference strings.
//! - [`select_controls`] and [`apply_modifications`] implement profile
//!   selection and tailoring.
//! - [`diff_documents`] compares two same-typed documents by stable keys.
//! - [`substitute_prose`] resolves parameter placeholders in prose.
//!
//! Invariants:
//! - Nothing in this crate performs I/O.
//! - Every operation on untrusted input returns a `Result` or is total.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod diff;
pub mod href;
pub mod model;
pub mod params;
pub mod parser;
pub mod selection;
pub mod xml;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use diff::DiffEntry;
pub use diff::DiffSection;
pub use diff::DiffStatus;
pub use diff::DiffSummary;
pub use diff::DocumentDiffResult;
pub use diff::KeyedDiff;
pub use diff::MetadataDiff;
pub use diff::diff_by_key;
pub use diff::diff_documents;
pub use href::HrefKind;
pub use href::ParsedHref;
pub use href::parse_href;
pub use model::Document;
pub use model::DocumentType;
pub use model::ParsedDocument;
pub use model::catalog::count_controls;
pub use model::catalog::get_all_controls;
pub use params::ParamMap;
pub use params::ProseSegment;
pub use params::build_param_map;
pub use params::render_prose;
pub use params::substitute_prose;
pub use parser::DocumentFormat;
pub use parser::ParseError;
pub use parser::UNKNOWN_VERSION;
pub use parser::detect_document_type;
pub use parser::detect_oscal_version;
pub use parser::parse_document;
pub use parser::parse_document_text;
pub use parser::parse_json_text;
pub use parser::parse_xml_text;
pub use selection::apply_modifications;
pub use selection::select_controls;
pub use xml::xml_to_json;
