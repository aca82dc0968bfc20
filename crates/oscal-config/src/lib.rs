// crates/oscal-config/src/lib.rs
// ============================================================================
// Module: OSCAL Config Library
// Description: Configuration model and validation for the OSCAL toolkit.
// Purpose: Single source of truth for oscal.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `oscal-config` defines the TOML configuration consumed by the `oscal`
//! command-line shell: resolver limits and fetch policy plus the default
//! log level. Loading is strict: unknown fields, oversize files and non-UTF-8
//! content are rejected.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
