// crates/mod-triage-config/src/validate.rs
// ============================================================================
// Module: Profile Table Validation
// Description: Startup checks for parsed profile tables.
// Purpose: Catch authoring defects before the engine evaluates anything.
// Dependencies: mod-triage-core, thiserror
// ============================================================================

//! ## Overview
//! The executor treats an unresolvable rule as a hard `ERROR` verdict at
//! evaluation time; validation moves that discovery to startup. A table
//! passes when every referenced rule resolves in the registry, no check list
//! is empty, and every check list ends in a step whose directives cannot both
//! continue past the end.
//!
//! All defects are collected in one pass. Defect locations use the wire-form
//! keys (`dot_5/gold/level_12[2]`) so authors can find the offending step in
//! the source document directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mod_triage_core::CheckStep;
use mod_triage_core::ProfileTable;
use mod_triage_core::RuleRegistry;
use thiserror::Error;

// ============================================================================
// SECTION: Defects
// ============================================================================

/// Single authoring defect found in a profile table.
///
/// # Invariants
/// - `location` is the wire-form path `rarity/color/level[index]` into the
///   source document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileDefect {
    /// A check step references a rule the registry does not know.
    #[error("profile `{profile}`: unknown rule `{rule}` at {location}")]
    UnknownRule {
        /// Profile identifier containing the defect.
        profile: String,
        /// Wire-form path to the defective step.
        location: String,
        /// The unresolvable rule name.
        rule: String,
    },
    /// A level bucket carries an empty check list.
    #[error("profile `{profile}`: empty check list at {location}")]
    EmptyCheckList {
        /// Profile identifier containing the defect.
        profile: String,
        /// Wire-form path to the empty bucket.
        location: String,
    },
    /// The final step of a check list can continue past the end of the list.
    #[error("profile `{profile}`: final step at {location} can continue past the end")]
    NonTerminalFinalStep {
        /// Profile identifier containing the defect.
        profile: String,
        /// Wire-form path to the final step.
        location: String,
    },
}

/// Validation failure carrying every defect found in the table.
///
/// # Invariants
/// - `defects` is non-empty; an empty defect list means validation passed
///   and no error is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("profile table validation failed with {} defect(s)", defects.len())]
pub struct ProfileValidationError {
    /// Every defect found, in document order.
    pub defects: Vec<ProfileDefect>,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates every check list in a profile table against a rule registry.
///
/// # Errors
///
/// Returns [`ProfileValidationError`] listing every defect when the table
/// references unknown rules, carries empty check lists, or ends a check list
/// with a step that can continue past the end.
pub fn validate_profile_table(
    table: &ProfileTable,
    registry: &RuleRegistry,
) -> Result<(), ProfileValidationError> {
    let mut defects = Vec::new();

    for (profile_id, profile) in table {
        for (rarity, colors) in &profile.buckets {
            for (color, levels) in colors {
                for (level, checks) in levels.iter() {
                    let location = format!("{rarity}/{}/{level}", color.as_str());
                    validate_check_list(profile_id, &location, checks, registry, &mut defects);
                }
            }
        }
    }

    if defects.is_empty() {
        Ok(())
    } else {
        Err(ProfileValidationError {
            defects,
        })
    }
}

/// Validates one ordered check list, appending defects to the accumulator.
fn validate_check_list(
    profile_id: &str,
    location: &str,
    checks: &[CheckStep],
    registry: &RuleRegistry,
    defects: &mut Vec<ProfileDefect>,
) {
    let Some(last) = checks.last() else {
        defects.push(ProfileDefect::EmptyCheckList {
            profile: profile_id.to_string(),
            location: location.to_string(),
        });
        return;
    };

    for (index, step) in checks.iter().enumerate() {
        if !registry.contains(&step.rule) {
            defects.push(ProfileDefect::UnknownRule {
                profile: profile_id.to_string(),
                location: format!("{location}[{index}]"),
                rule: step.rule.to_string(),
            });
        }
    }

    // A final step that is not applicable still skips, so even two terminal
    // directives cannot make exhaustion unrepresentable; the check below
    // catches the plainly continuable case.
    if !last.on_pass.is_terminal() || !last.on_fail.is_terminal() {
        defects.push(ProfileDefect::NonTerminalFinalStep {
            profile: profile_id.to_string(),
            location: format!("{location}[{}]", checks.len() - 1),
        });
    }
}
