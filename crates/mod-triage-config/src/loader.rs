// crates/mod-triage-config/src/loader.rs
// ============================================================================
// Module: Profile Table Loader
// Description: Parses JSON profile documents into typed profile tables.
// Purpose: Provide the single entry point for profile-table input handling.
// Dependencies: mod-triage-core, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! A profile document is a JSON object keyed by profile identifier; every
//! value is one full decision tree. Parsing goes straight through serde into
//! the typed tree, so malformed bucket keys (`dot_x`, `level_x`), unknown
//! directive actions, and missing result codes are all rejected at parse
//! time with a positioned error.
//!
//! Parsing does not consult the rule registry; run
//! [`crate::validate::validate_profile_table`] on the parsed table before
//! handing it to an engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use mod_triage_core::ProfileTable;
use thiserror::Error;
use tracing::debug;

use crate::validate::ProfileValidationError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while loading or validating a profile table.
///
/// # Invariants
/// - Wrapped sources keep their original diagnostics (path positions for
///   parse errors, defect lists for validation).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The profile document could not be read.
    #[error("failed to read profile document: {0}")]
    Io(#[from] std::io::Error),
    /// The profile document was not valid JSON for the profile schema.
    #[error("failed to parse profile document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The parsed table failed startup validation.
    #[error(transparent)]
    Validation(#[from] ProfileValidationError),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Parses a profile table from a JSON document held in memory.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the document does not match the
/// profile schema.
pub fn profile_table_from_str(document: &str) -> Result<ProfileTable, ConfigError> {
    let table: ProfileTable = serde_json::from_str(document)?;
    debug!("parsed profile table with {} profile(s)", table.len());
    Ok(table)
}

/// Reads and parses a profile table from a JSON file on disk.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Parse`] when its contents do not match the profile schema.
pub fn profile_table_from_file(path: &Path) -> Result<ProfileTable, ConfigError> {
    let document = fs::read_to_string(path)?;
    profile_table_from_str(&document)
}
