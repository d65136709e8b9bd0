// crates/mod-triage-core/src/core/reference.rs
// ============================================================================
// Module: Reference Data Bundle
// Description: Stat metadata and roll-bound ranges consumed by the decoder.
// Purpose: Provide the read-only lookup bundle an external hydration step loads.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The reference bundle carries stat metadata (display name, percentage flag)
//! and roll-bound ranges keyed by stat and rarity. It is loaded once by an
//! external collaborator and treated as read-only here; obtaining it is the
//! caller's responsibility, and failure to do so is the caller's
//! data-unavailable error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Stat Metadata
// ============================================================================

/// Metadata for a single unit stat.
///
/// # Invariants
/// - `is_percentage` decides display formatting; it never affects roll
///   efficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatInfo {
    /// Display name of the stat.
    pub name: String,
    /// Whether the stat value is percentage-valued.
    pub is_percentage: bool,
}

/// Roll-bound range for a stat at a given rarity.
///
/// # Invariants
/// - Bounds are raw (unscaled) roll units. `max < min` is representable and
///   treated as invalid by the efficiency calculation (0 efficiency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollBounds {
    /// Minimum raw roll value.
    pub min: i64,
    /// Maximum raw roll value.
    pub max: i64,
}

// ============================================================================
// SECTION: Reference Bundle
// ============================================================================

/// Read-only reference-data bundle for decoding.
///
/// # Invariants
/// - Never mutated after load; shared freely across concurrent decodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceData {
    /// Stat metadata keyed by unit stat identifier.
    stats: BTreeMap<u32, StatInfo>,
    /// Roll bounds keyed by (unit stat identifier, rarity).
    roll_bounds: BTreeMap<(u32, u8), RollBounds>,
}

impl ReferenceData {
    /// Creates an empty bundle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stats: BTreeMap::new(),
            roll_bounds: BTreeMap::new(),
        }
    }

    /// Registers stat metadata, replacing any existing entry.
    pub fn insert_stat(&mut self, stat_id: u32, info: StatInfo) {
        self.stats.insert(stat_id, info);
    }

    /// Registers roll bounds for a stat at a rarity.
    pub fn insert_roll_bounds(&mut self, stat_id: u32, rarity: u8, bounds: RollBounds) {
        self.roll_bounds.insert((stat_id, rarity), bounds);
    }

    /// Registers roll bounds by stat display name, resolving the identifier
    /// through the stat metadata. Returns `false` when no stat carries the
    /// name.
    pub fn insert_roll_bounds_by_name(
        &mut self,
        stat_name: &str,
        rarity: u8,
        bounds: RollBounds,
    ) -> bool {
        let resolved = self
            .stats
            .iter()
            .find(|(_, info)| info.name == stat_name)
            .map(|(stat_id, _)| *stat_id);
        match resolved {
            Some(stat_id) => {
                self.insert_roll_bounds(stat_id, rarity, bounds);
                true
            }
            None => false,
        }
    }

    /// Looks up stat metadata by unit stat identifier.
    #[must_use]
    pub fn stat(&self, stat_id: u32) -> Option<&StatInfo> {
        self.stats.get(&stat_id)
    }

    /// Looks up roll bounds for a stat at a rarity.
    #[must_use]
    pub fn roll_bounds(&self, stat_id: u32, rarity: u8) -> Option<RollBounds> {
        self.roll_bounds.get(&(stat_id, rarity)).copied()
    }
}
