// crates/mod-triage-core/src/decode/mod.rs
// ============================================================================
// Module: Item Decoder
// Description: Decodes compact upstream mod records into semantic fields.
// Purpose: Produce the immutable `Mod` the executor and rules evaluate.
// Dependencies: crate::core::{item, reference}, serde, thiserror
// ============================================================================

//! ## Overview
//! The decoder turns a raw upstream record into a [`Mod`]: the 3-character
//! definition code splits into set, rarity, and shape digits; stat values
//! arrive pre-scaled by 10000 and format as percentages (rounded to 3
//! decimal places) or floored flat integers; secondary-stat roll
//! efficiencies normalize each raw roll against the reference roll bounds
//! for (stat, rarity).
//!
//! Missing roll bounds degrade to zero efficiency with an empty roll
//! sequence; inverted bounds (`max < min`) do the same. Only a malformed
//! definition code or an unparsable roll value fails the decode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::item::Mod;
use crate::core::item::PrimaryStat;
use crate::core::item::SecondaryStat;
use crate::core::reference::ReferenceData;
use crate::core::reference::RollBounds;

// ============================================================================
// SECTION: Raw Upstream Records
// ============================================================================

/// Raw stat value as delivered by the upstream API.
///
/// # Invariants
/// - `stat_value_decimal` is the real value scaled by 10000.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatValue {
    /// Unit stat identifier.
    pub unit_stat_id: u32,
    /// Scaled stat value (real value times 10000).
    pub stat_value_decimal: i64,
}

/// Raw primary stat wrapper, mirroring the upstream nesting.
///
/// # Invariants
/// - None. Pure wire-shape mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrimaryStat {
    /// The wrapped stat value.
    pub stat: RawStatValue,
}

/// Raw secondary stat with per-roll values.
///
/// # Invariants
/// - `unscaled_roll_values` entries are decimal strings in upstream roll
///   order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSecondaryStat {
    /// The wrapped stat value.
    pub stat: RawStatValue,
    /// Number of rolls applied to the stat.
    #[serde(rename = "statRolls")]
    pub stat_rolls: u8,
    /// Raw per-roll values as decimal strings.
    #[serde(rename = "unscaledRollValue", default)]
    pub unscaled_roll_values: Vec<String>,
}

/// Raw upstream mod record in the compact wire shape.
///
/// # Invariants
/// - `definition_id` encodes set, rarity, and shape as three decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMod {
    /// Opaque upstream identifier.
    pub id: String,
    /// Three-character encoded definition code.
    #[serde(rename = "definitionId")]
    pub definition_id: String,
    /// Current level (1-15).
    pub level: u8,
    /// Quality tier (1-5).
    pub tier: u8,
    /// Primary stat.
    #[serde(rename = "primaryStat")]
    pub primary_stat: RawPrimaryStat,
    /// Secondary stats in upstream order.
    #[serde(rename = "secondaryStat", default)]
    pub secondary_stats: Vec<RawSecondaryStat>,
}

// ============================================================================
// SECTION: Decode Errors
// ============================================================================

/// Decode failures for malformed upstream records.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The definition code was not exactly three decimal digits.
    #[error("malformed definition code `{code}`")]
    MalformedDefinitionCode {
        /// The rejected definition code.
        code: String,
    },
    /// A per-roll value string failed to parse as an integer.
    #[error("unparsable roll value `{raw}` for stat {stat_id}")]
    InvalidRollValue {
        /// Unit stat identifier carrying the bad roll value.
        stat_id: u32,
        /// The rejected roll value string.
        raw: String,
    },
}

// ============================================================================
// SECTION: Value Formatting
// ============================================================================

/// Formats a scaled stat value for display: percentage stats convert to a
/// percentage number rounded to 3 decimal places (absorbing floating-point
/// noise); flat stats floor to an integer. Stats without metadata are
/// treated as flat.
#[must_use]
pub fn format_stat_value(stat_id: u32, decimal_value: i64, reference: &ReferenceData) -> f64 {
    let real = decimal_value as f64 / 10_000.0;
    let is_percentage = reference.stat(stat_id).is_some_and(|info| info.is_percentage);
    if is_percentage {
        (real * 100.0 * 1000.0).round() / 1000.0
    } else {
        real.floor()
    }
}

// ============================================================================
// SECTION: Roll Efficiency
// ============================================================================

/// Computes the efficiency of a single roll:
/// `((value - min + 1) / (max - min + 1)) * 100`, distributing efficiency
/// evenly across the possible roll values. Inverted bounds yield 0.
#[must_use]
pub fn roll_efficiency(roll_value: i64, bounds: RollBounds) -> f64 {
    if bounds.max < bounds.min {
        return 0.0;
    }
    let range = (bounds.max - bounds.min + 1) as f64;
    (roll_value - bounds.min + 1) as f64 / range * 100.0
}

/// Computes the arithmetic mean of a slice (0 when empty).
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// ============================================================================
// SECTION: Definition Code
// ============================================================================

/// Splits a 3-character definition code into (set, rarity, shape) digits.
fn parse_definition_code(code: &str) -> Result<(u8, u8, u8), DecodeError> {
    let malformed = || DecodeError::MalformedDefinitionCode {
        code: code.to_string(),
    };
    let mut digits = code.chars().map(|ch| {
        ch.to_digit(10).and_then(|digit| u8::try_from(digit).ok())
    });
    let set_id = digits.next().flatten().ok_or_else(malformed)?;
    let rarity = digits.next().flatten().ok_or_else(malformed)?;
    let shape_id = digits.next().flatten().ok_or_else(malformed)?;
    if digits.next().is_some() {
        return Err(malformed());
    }
    Ok((set_id, rarity, shape_id))
}

// ============================================================================
// SECTION: Decoder
// ============================================================================

/// Decodes a raw upstream record into a [`Mod`] using the reference bundle.
///
/// # Errors
///
/// Returns [`DecodeError`] when the definition code is not exactly three
/// decimal digits or a per-roll value string fails to parse.
pub fn decode_mod(raw: &RawMod, reference: &ReferenceData) -> Result<Mod, DecodeError> {
    let (set_id, rarity, shape_id) = parse_definition_code(&raw.definition_id)?;

    let primary = PrimaryStat {
        stat_id: raw.primary_stat.stat.unit_stat_id,
        value: format_stat_value(
            raw.primary_stat.stat.unit_stat_id,
            raw.primary_stat.stat.stat_value_decimal,
            reference,
        ),
    };

    let mut secondaries = Vec::with_capacity(raw.secondary_stats.len());
    for raw_stat in &raw.secondary_stats {
        secondaries.push(decode_secondary(raw_stat, rarity, reference)?);
    }

    let efficiencies: Vec<f64> = secondaries.iter().map(|stat| stat.efficiency).collect();
    let overall_efficiency = mean(&efficiencies);

    Ok(Mod {
        id: raw.id.clone(),
        set_id,
        rarity,
        shape_id,
        level: raw.level,
        tier: raw.tier,
        primary,
        secondaries,
        overall_efficiency,
    })
}

/// Decodes one secondary stat, attaching per-roll and average efficiencies.
fn decode_secondary(
    raw_stat: &RawSecondaryStat,
    rarity: u8,
    reference: &ReferenceData,
) -> Result<SecondaryStat, DecodeError> {
    let stat_id = raw_stat.stat.unit_stat_id;

    let mut roll_values = Vec::with_capacity(raw_stat.unscaled_roll_values.len());
    for raw_roll in &raw_stat.unscaled_roll_values {
        let parsed = raw_roll.parse::<i64>().map_err(|_| DecodeError::InvalidRollValue {
            stat_id,
            raw: raw_roll.clone(),
        })?;
        roll_values.push(parsed);
    }

    let roll_efficiencies = match reference.roll_bounds(stat_id, rarity) {
        Some(bounds) if bounds.max >= bounds.min && !roll_values.is_empty() => {
            roll_values.iter().map(|value| roll_efficiency(*value, bounds)).collect()
        }
        _ => Vec::new(),
    };
    let efficiency = mean(&roll_efficiencies);

    Ok(SecondaryStat {
        stat_id,
        value: format_stat_value(stat_id, raw_stat.stat.stat_value_decimal, reference),
        rolls: raw_stat.stat_rolls,
        efficiency,
        roll_values,
        roll_efficiencies,
    })
}
