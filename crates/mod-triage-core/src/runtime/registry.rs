// crates/mod-triage-core/src/runtime/registry.rs
// ============================================================================
// Module: Rule Function Registry
// Description: Named three-valued predicate functions and their trace
//              description templates.
// Purpose: Resolve rule names from profile data into executable checks.
// Dependencies: crate::core, tracing
// ============================================================================

//! ## Overview
//! Rules are pure predicates over a decoded mod. Outcomes are three-valued:
//! [`RuleOutcome::NotApplicable`] makes the executor skip the step's
//! directive entirely, which is different from a failed business check.
//! Looking up an unregistered rule name is a hard workflow-level error, not a
//! `Fail`.
//!
//! The built-in library reproduces the original rule set: `isArrowPrimSpeed`
//! (alias `isSpeedArrow`), `statThreshold`, and `defaultRule`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use tracing::debug;
use tracing::warn;

use crate::core::item::ARROW_SHAPE_ID;
use crate::core::item::Mod;
use crate::core::item::SPEED_STAT_ID;
use crate::core::profile::RuleName;
use crate::core::profile::RuleParams;

// ============================================================================
// SECTION: Rule Outcomes
// ============================================================================

/// Three-valued outcome of a rule function.
///
/// # Invariants
/// - `NotApplicable` is a neutral outcome: the executor skips the step
///   without consuming its directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule's condition holds.
    Pass,
    /// The rule's condition does not hold.
    Fail,
    /// The rule does not apply to this mod.
    NotApplicable,
}

impl From<bool> for RuleOutcome {
    fn from(value: bool) -> Self {
        if value { Self::Pass } else { Self::Fail }
    }
}

/// Predicate function evaluated against a decoded mod and optional
/// parameters.
pub type RuleFn = fn(&Mod, Option<&RuleParams>) -> RuleOutcome;

/// Description template producing the human-readable rationale for a trace
/// entry.
pub type DescriptionFn = fn(Option<&RuleParams>) -> String;

// ============================================================================
// SECTION: Built-in Rules
// ============================================================================

/// Pass when the mod is an Arrow with Speed as its primary stat; `Fail` for
/// an Arrow with any other primary. Not applicable to non-Arrow shapes:
/// only arrows carry a "Speed primary" characteristic, so every other shape
/// must fall through to the next check.
fn is_arrow_prim_speed(subject: &Mod, _params: Option<&RuleParams>) -> RuleOutcome {
    if subject.shape_id != ARROW_SHAPE_ID {
        return RuleOutcome::NotApplicable;
    }
    RuleOutcome::from(subject.primary.stat_id == SPEED_STAT_ID)
}

/// Checks a secondary stat against a presence or minimum-value threshold.
///
/// Lookup is currently hardcoded to Speed regardless of `params.stat`, the
/// `stat` parameter only feeds descriptions. `max` has no evaluation branch;
/// parameter sets carrying neither `any` nor `min` fail with a warning.
fn stat_threshold(subject: &Mod, params: Option<&RuleParams>) -> RuleOutcome {
    let Some(params) = params else {
        warn!("statThreshold check called without parameters");
        return RuleOutcome::Fail;
    };
    let Some(stat_name) = params.stat.as_deref() else {
        warn!("statThreshold check called without a stat parameter");
        return RuleOutcome::Fail;
    };
    if stat_name != "Speed" {
        debug!("statThreshold resolves Speed only; ignoring stat parameter `{stat_name}`");
    }

    let Some(target) = subject.secondary(SPEED_STAT_ID) else {
        return RuleOutcome::Fail;
    };

    if params.any == Some(true) {
        return RuleOutcome::Pass;
    }
    if let Some(min) = params.min {
        return RuleOutcome::from(target.value >= min);
    }

    warn!("statThreshold check called with invalid parameters");
    RuleOutcome::Fail
}

/// Catch-all terminal rule; always passes.
fn default_rule(_subject: &Mod, _params: Option<&RuleParams>) -> RuleOutcome {
    RuleOutcome::Pass
}

// ============================================================================
// SECTION: Rule Registry
// ============================================================================

/// Named mapping from rule identifiers to predicate functions.
///
/// # Invariants
/// - Read-only during evaluation; registration happens before the engine is
///   built.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    /// Registered rules keyed by name.
    rules: BTreeMap<RuleName, RuleFn>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Creates a registry holding the built-in rule library.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("isArrowPrimSpeed", is_arrow_prim_speed);
        registry.register("isSpeedArrow", is_arrow_prim_speed);
        registry.register("statThreshold", stat_threshold);
        registry.register("defaultRule", default_rule);
        registry
    }

    /// Registers a rule under a name, replacing any existing registration.
    pub fn register(&mut self, name: impl Into<RuleName>, rule: RuleFn) {
        self.rules.insert(name.into(), rule);
    }

    /// Resolves a rule function by name.
    #[must_use]
    pub fn resolve(&self, name: &RuleName) -> Option<RuleFn> {
        self.rules.get(name).copied()
    }

    /// Returns `true` when a rule is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &RuleName) -> bool {
        self.rules.contains_key(name)
    }
}

// ============================================================================
// SECTION: Description Templates
// ============================================================================

/// Template for `isArrowPrimSpeed` steps.
fn describe_arrow_prim_speed(_params: Option<&RuleParams>) -> String {
    "Primary stat is Speed".to_string()
}

/// Template for `statThreshold` steps, covering the `any`, `min`, `max`, and
/// combined forms.
fn describe_stat_threshold(params: Option<&RuleParams>) -> String {
    let Some(params) = params else {
        return "Check for a secondary stat".to_string();
    };
    let stat = params.stat.as_deref().unwrap_or("a secondary stat");
    if params.any == Some(true) {
        return format!("Has {stat} as a secondary stat");
    }
    match (params.min, params.max) {
        (Some(min), Some(max)) => format!("{stat} is between {min} and {max}"),
        (Some(min), None) => format!("{stat} is at least {min}"),
        (None, Some(max)) => format!("{stat} is at most {max}"),
        (None, None) => format!("Check for {stat}"),
    }
}

/// Template for `defaultRule` steps.
fn describe_default_rule(_params: Option<&RuleParams>) -> String {
    "Default condition".to_string()
}

/// Rule description templates used to enrich trace entries.
///
/// # Invariants
/// - Missing entries degrade to a generic description, never an error.
#[derive(Debug, Clone, Default)]
pub struct DescriptionMap {
    /// Registered templates keyed by rule name.
    templates: BTreeMap<RuleName, DescriptionFn>,
}

impl DescriptionMap {
    /// Creates an empty template map.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Creates the template map for the built-in rule library.
    #[must_use]
    pub fn builtin() -> Self {
        let mut map = Self::empty();
        map.register("isArrowPrimSpeed", describe_arrow_prim_speed);
        map.register("isSpeedArrow", describe_arrow_prim_speed);
        map.register("statThreshold", describe_stat_threshold);
        map.register("defaultRule", describe_default_rule);
        map
    }

    /// Registers a template under a rule name, replacing any existing one.
    pub fn register(&mut self, name: impl Into<RuleName>, template: DescriptionFn) {
        self.templates.insert(name.into(), template);
    }

    /// Produces the description for a step, falling back to a generic
    /// "rule with params" string when no template is registered.
    #[must_use]
    pub fn describe(&self, rule: &RuleName, params: Option<&RuleParams>) -> String {
        if let Some(template) = self.templates.get(rule) {
            return template(params);
        }
        match params {
            Some(params) => {
                let rendered = serde_json::to_string(params)
                    .unwrap_or_else(|_| "<unprintable>".to_string());
                format!("Rule '{rule}' with params {rendered}")
            }
            None => format!("Rule '{rule}'"),
        }
    }
}
