// crates/mod-triage-config/src/builtin.rs
// ============================================================================
// Module: Built-in Profiles
// Description: Embedded beginner evaluation profiles.
// Purpose: Ship working profile tables so callers can evaluate without
//          authoring their own documents.
// Dependencies: mod-triage-core, tracing
// ============================================================================

//! ## Overview
//! Two beginner profiles are embedded: `beginner_speed_focus` keeps a wider
//! range of speed mods leveled, while `beginner_speed_economy` applies
//! stricter thresholds to save credits. Both cover the `dot_1-4` and `dot_5`
//! rarity buckets across all five quality colors.
//!
//! The asset is validated against the built-in rule registry at load, so a
//! table that parses here is guaranteed to resolve every rule at runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mod_triage_core::ProfileTable;
use mod_triage_core::RuleRegistry;
use mod_triage_core::WorkflowEngine;
use tracing::debug;

use crate::loader::ConfigError;
use crate::loader::profile_table_from_str;
use crate::validate::validate_profile_table;

// ============================================================================
// SECTION: Embedded Asset
// ============================================================================

/// The built-in profile document, embedded verbatim.
pub const BUILTIN_PROFILES_JSON: &str = include_str!("../assets/profiles.json");

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Parses and validates the built-in profile table.
///
/// # Errors
///
/// Returns [`ConfigError`] when the embedded asset fails to parse or
/// validate; either indicates a packaging defect in this crate.
pub fn builtin_profile_table() -> Result<ProfileTable, ConfigError> {
    let table = profile_table_from_str(BUILTIN_PROFILES_JSON)?;
    validate_profile_table(&table, &RuleRegistry::builtin())?;
    debug!("loaded {} built-in profile(s)", table.len());
    Ok(table)
}

/// Builds a workflow engine over the built-in profiles and rule library.
///
/// # Errors
///
/// Returns [`ConfigError`] when the embedded asset fails to parse or
/// validate.
pub fn builtin_engine() -> Result<WorkflowEngine, ConfigError> {
    Ok(WorkflowEngine::new(builtin_profile_table()?))
}
