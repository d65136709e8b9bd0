// crates/mod-triage-core/src/core/verdict.rs
// ============================================================================
// Module: Verdict Codes and Display Mapping
// Description: Result codes emitted by workflows and their display metadata.
// Purpose: Keep the verdict vocabulary and its presentation table in one place.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ResultCode`] is the engine's output classification. `ERROR` is a
//! first-class, displayable verdict like any other: partial-data and
//! misconfiguration conditions stay visible instead of crashing the caller.
//! Wire forms are the upper-case code strings (`KEEP`, `LVL_15`, ...).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as DeError;

// ============================================================================
// SECTION: Result Codes
// ============================================================================

/// Workflow result code.
///
/// # Invariants
/// - Wire forms are stable upper-case code strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResultCode {
    /// Keep the mod as-is.
    Keep,
    /// Sell the mod.
    Sell,
    /// Slice the mod to the next rarity.
    Slice,
    /// Level the mod to 3 before re-evaluating.
    LevelTo3,
    /// Level the mod to 6 before re-evaluating.
    LevelTo6,
    /// Level the mod to 9 before re-evaluating.
    LevelTo9,
    /// Level the mod to 12 before re-evaluating.
    LevelTo12,
    /// Level the mod to 15 before re-evaluating.
    LevelTo15,
    /// Evaluation failed; surfaced as a displayable verdict.
    Error,
}

impl ResultCode {
    /// Returns the stable wire form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "KEEP",
            Self::Sell => "SELL",
            Self::Slice => "SLICE",
            Self::LevelTo3 => "LVL_3",
            Self::LevelTo6 => "LVL_6",
            Self::LevelTo9 => "LVL_9",
            Self::LevelTo12 => "LVL_12",
            Self::LevelTo15 => "LVL_15",
            Self::Error => "ERROR",
        }
    }

    /// Returns the display metadata for the code.
    #[must_use]
    pub const fn display(self) -> VerdictDisplay {
        match self {
            Self::Keep => VerdictDisplay {
                category: VerdictCategory::Keep,
                text: "Keep",
                class_name: "keep",
            },
            Self::Sell => VerdictDisplay {
                category: VerdictCategory::Sell,
                text: "Sell",
                class_name: "sell",
            },
            Self::Slice => VerdictDisplay {
                category: VerdictCategory::Slice,
                text: "Slice",
                class_name: "slice",
            },
            Self::LevelTo3 => VerdictDisplay {
                category: VerdictCategory::Level,
                text: "Level to 3",
                class_name: "level",
            },
            Self::LevelTo6 => VerdictDisplay {
                category: VerdictCategory::Level,
                text: "Level to 6",
                class_name: "level",
            },
            Self::LevelTo9 => VerdictDisplay {
                category: VerdictCategory::Level,
                text: "Level to 9",
                class_name: "level",
            },
            Self::LevelTo12 => VerdictDisplay {
                category: VerdictCategory::Level,
                text: "Level to 12",
                class_name: "level",
            },
            Self::LevelTo15 => VerdictDisplay {
                category: VerdictCategory::Level,
                text: "Level to 15",
                class_name: "level",
            },
            Self::Error => VerdictDisplay {
                category: VerdictCategory::Error,
                text: "Error",
                class_name: "sell",
            },
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for result-code wire strings.
///
/// # Invariants
/// - Carries the rejected code verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCodeParseError {
    /// The code string that failed to parse.
    pub code: String,
}

impl fmt::Display for ResultCodeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized result code `{}`", self.code)
    }
}

impl std::error::Error for ResultCodeParseError {}

impl FromStr for ResultCode {
    type Err = ResultCodeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "KEEP" => Ok(Self::Keep),
            "SELL" => Ok(Self::Sell),
            "SLICE" => Ok(Self::Slice),
            "LVL_3" => Ok(Self::LevelTo3),
            "LVL_6" => Ok(Self::LevelTo6),
            "LVL_9" => Ok(Self::LevelTo9),
            "LVL_12" => Ok(Self::LevelTo12),
            "LVL_15" => Ok(Self::LevelTo15),
            "ERROR" => Ok(Self::Error),
            _ => Err(ResultCodeParseError {
                code: value.to_string(),
            }),
        }
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResultCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(DeError::custom)
    }
}

// ============================================================================
// SECTION: Display Mapping
// ============================================================================

/// Verdict category grouping result codes for presentation.
///
/// # Invariants
/// - Variants are stable for serialization and UI matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictCategory {
    /// Keep verdicts.
    Keep,
    /// Sell verdicts.
    Sell,
    /// Slice verdicts.
    Slice,
    /// Level-to-N verdicts.
    Level,
    /// Error verdicts.
    Error,
}

/// Display metadata for a result code.
///
/// # Invariants
/// - `class_name` is an opaque style token; the engine attaches no meaning
///   to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerdictDisplay {
    /// Verdict category.
    pub category: VerdictCategory,
    /// Human-readable verdict text.
    pub text: &'static str,
    /// Style token for the caller's presentation layer.
    pub class_name: &'static str,
}
