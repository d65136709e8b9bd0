// crates/mod-triage-core/src/core/profile.rs
// ============================================================================
// Module: Evaluation Profile Tree
// Description: Nested, data-defined decision tables keyed by rarity, quality,
//              and level.
// Purpose: Provide the typed profile structures consumed by the executor.
// Dependencies: crate::core::{item, verdict}, serde
// ============================================================================

//! ## Overview
//! An evaluation profile is a named tree:
//! `profile -> rarity bucket -> quality color -> level bucket -> ordered
//! check steps`. Rarities 1-4 collapse into the shared `dot_1-4` bucket;
//! level-bucket keys are sparse and resolve with a best-fit-not-exceeding
//! search (a bucket applies from its level onward until superseded).
//!
//! Profiles are pure data. Absent profiles, rarity buckets, or quality colors
//! are a valid "not configured" state that the executor reports explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as DeError;

use crate::core::item::QualityColor;
use crate::core::verdict::ResultCode;

// ============================================================================
// SECTION: Rule Identifiers and Parameters
// ============================================================================

/// Named rule identifier resolved through the rule registry.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleName(String);

impl RuleName {
    /// Creates a new rule name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the rule name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RuleName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RuleName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Parameters passed to a rule function.
///
/// # Invariants
/// - All fields are optional; rule functions decide which combinations are
///   meaningful and fail closed on the rest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleParams {
    /// Stat name the rule targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
    /// Pass on mere presence of the stat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<bool>,
    /// Minimum stat value for a pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum stat value (description-only; see the registry notes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RuleParams {
    /// Parameters that pass on mere presence of the named stat.
    #[must_use]
    pub fn presence(stat: impl Into<String>) -> Self {
        Self {
            stat: Some(stat.into()),
            any: Some(true),
            min: None,
            max: None,
        }
    }

    /// Parameters that pass when the named stat is at least `min`.
    #[must_use]
    pub fn at_least(stat: impl Into<String>, min: f64) -> Self {
        Self {
            stat: Some(stat.into()),
            any: None,
            min: Some(min),
            max: None,
        }
    }
}

// ============================================================================
// SECTION: Directives and Check Steps
// ============================================================================

/// Control-flow directive attached to a check step outcome.
///
/// # Invariants
/// - `Continue` carries no result; `Stop` and `Error` always carry one. The
///   variant shapes make the invariant unrepresentable to violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Directive {
    /// Proceed to the next check step.
    #[serde(rename = "CONTINUE")]
    Continue,
    /// Terminate the workflow with the given verdict.
    #[serde(rename = "STOP")]
    Stop {
        /// Verdict returned to the caller.
        result: ResultCode,
    },
    /// Terminate the workflow in an explicit error state.
    #[serde(rename = "ERROR")]
    Error {
        /// Verdict returned to the caller (normally [`ResultCode::Error`]).
        result: ResultCode,
    },
}

impl Directive {
    /// Returns `true` for `Stop` and `Error` directives.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }

    /// Returns the declared result code, if any.
    #[must_use]
    pub const fn result(self) -> Option<ResultCode> {
        match self {
            Self::Continue => None,
            Self::Stop {
                result,
            }
            | Self::Error {
                result,
            } => Some(result),
        }
    }
}

/// Single entry in an ordered check list.
///
/// # Invariants
/// - `rule` must resolve in the rule registry for the step to execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckStep {
    /// Rule identifier to execute.
    pub rule: RuleName,
    /// Optional rule parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RuleParams>,
    /// Directive applied when the rule passes.
    pub on_pass: Directive,
    /// Directive applied when the rule fails.
    pub on_fail: Directive,
}

// ============================================================================
// SECTION: Rarity Buckets
// ============================================================================

/// Rarity bucket key within a profile.
///
/// # Invariants
/// - Rarities 1-4 share the collapsed `dot_1-4` bucket; every other rarity
///   maps to its own `dot_<n>` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RarityBucket {
    /// Collapsed bucket for rarities 1-4 (`dot_1-4`).
    Low,
    /// Dedicated bucket for a single rarity (`dot_<n>`).
    Dot(u8),
}

impl RarityBucket {
    /// Computes the bucket for a mod rarity.
    #[must_use]
    pub fn from_rarity(rarity: u8) -> Self {
        if (1..=4).contains(&rarity) {
            Self::Low
        } else {
            Self::Dot(rarity)
        }
    }
}

impl fmt::Display for RarityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("dot_1-4"),
            Self::Dot(rarity) => write!(f, "dot_{rarity}"),
        }
    }
}

/// Parse failure for bucket and level keys.
///
/// # Invariants
/// - Carries the rejected key verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError {
    /// The key that failed to parse.
    pub key: String,
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized bucket key `{}`", self.key)
    }
}

impl std::error::Error for KeyParseError {}

impl FromStr for RarityBucket {
    type Err = KeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "dot_1-4" {
            return Ok(Self::Low);
        }
        value
            .strip_prefix("dot_")
            .and_then(|raw| raw.parse::<u8>().ok())
            .map(Self::Dot)
            .ok_or_else(|| KeyParseError {
                key: value.to_string(),
            })
    }
}

impl Serialize for RarityBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RarityBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(DeError::custom)
    }
}

// ============================================================================
// SECTION: Level Buckets
// ============================================================================

/// Level bucket key of the form `level_<N>`.
///
/// # Invariants
/// - Ordering follows the numeric level, so range queries over a
///   [`BTreeMap`] implement the best-fit search directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelKey(u8);

impl LevelKey {
    /// Creates a level key for the given level.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level_{}", self.0)
    }
}

impl FromStr for LevelKey {
    type Err = KeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .strip_prefix("level_")
            .and_then(|raw| raw.parse::<u8>().ok())
            .map(Self)
            .ok_or_else(|| KeyParseError {
                key: value.to_string(),
            })
    }
}

impl Serialize for LevelKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LevelKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(DeError::custom)
    }
}

/// Sparse map of level buckets to ordered check lists.
///
/// # Invariants
/// - A bucket applies from its level onward until superseded by a higher
///   bucket (monotone step function over levels).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelBuckets(BTreeMap<LevelKey, Vec<CheckStep>>);

impl LevelBuckets {
    /// Creates an empty set of level buckets.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a check list for a level bucket, replacing any existing list.
    pub fn insert(&mut self, level: u8, checks: Vec<CheckStep>) {
        self.0.insert(LevelKey::new(level), checks);
    }

    /// Returns the check list stored for an exact bucket key.
    #[must_use]
    pub fn get(&self, key: LevelKey) -> Option<&[CheckStep]> {
        self.0.get(&key).map(Vec::as_slice)
    }

    /// Resolves the applicable bucket for a mod level: the largest bucket key
    /// that does not exceed `level`, or `None` when the level is below every
    /// configured bucket.
    #[must_use]
    pub fn resolve(&self, level: u8) -> Option<LevelKey> {
        self.0.range(..=LevelKey::new(level)).next_back().map(|(key, _)| *key)
    }

    /// Iterates buckets in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (LevelKey, &[CheckStep])> {
        self.0.iter().map(|(key, checks)| (*key, checks.as_slice()))
    }

    /// Returns `true` when no buckets are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// SECTION: Profiles
// ============================================================================

/// Quality-color buckets within one rarity bucket.
pub type ColorBuckets = BTreeMap<QualityColor, LevelBuckets>;

/// Named evaluation profile: the full decision tree for one strategy.
///
/// # Invariants
/// - `buckets` holds only the rarity/color combinations the profile
///   configures; absence is a reportable "not configured" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Human-readable profile name.
    pub name: String,
    /// Short description of the strategy.
    pub description: String,
    /// Decision tree keyed by rarity bucket, then quality color.
    pub buckets: BTreeMap<RarityBucket, ColorBuckets>,
}

impl Profile {
    /// Returns the level buckets configured for a rarity bucket and quality
    /// color, if any.
    #[must_use]
    pub fn level_buckets(
        &self,
        bucket: RarityBucket,
        color: QualityColor,
    ) -> Option<&LevelBuckets> {
        self.buckets.get(&bucket).and_then(|colors| colors.get(&color))
    }
}

/// Profile tables keyed by profile identifier.
pub type ProfileTable = BTreeMap<String, Profile>;
