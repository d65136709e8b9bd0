// crates/mod-triage-config/src/lib.rs
// ============================================================================
// Module: Mod Triage Config
// Description: Profile-table loading, startup validation, and built-in
//              profile assets.
// Purpose: Turn JSON profile documents into validated, engine-ready tables.
// Dependencies: mod-triage-core, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Profile tables are authored as JSON documents. This crate parses them into
//! the typed profile tree from `mod-triage-core`, validates every check list
//! against the rule registry before the engine ever runs, and ships the
//! built-in evaluation profiles as an embedded asset.
//!
//! Validation is fail-closed and exhaustive: a defective table reports every
//! defect at once rather than stopping at the first, so authors fix a profile
//! in one pass.

pub mod builtin;
pub mod loader;
pub mod validate;

pub use builtin::BUILTIN_PROFILES_JSON;
pub use builtin::builtin_engine;
pub use builtin::builtin_profile_table;
pub use loader::ConfigError;
pub use loader::profile_table_from_file;
pub use loader::profile_table_from_str;
pub use validate::ProfileDefect;
pub use validate::ProfileValidationError;
pub use validate::validate_profile_table;
