// crates/mod-triage-core/src/core/item.rs
// ============================================================================
// Module: Decoded Mod Model
// Description: Decoded mod items, stats, and the fixed shape/set/color tables.
// Purpose: Provide the immutable evaluation subject consumed by rule functions.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Mod`] is the decoded form of the compact upstream item record: the
//! three-character definition code split into set, rarity, and shape, plus
//! level, quality tier, a primary stat, and up to four secondary stats with
//! per-roll efficiency data. Instances are immutable for the duration of an
//! evaluation call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Stat Constants
// ============================================================================

/// Unit stat identifier for Speed.
pub const SPEED_STAT_ID: u32 = 5;

/// Shape identifier for the Arrow slot.
pub const ARROW_SHAPE_ID: u8 = 2;

// ============================================================================
// SECTION: Shape, Set, and Quality Tables
// ============================================================================

/// Mod slot shapes, numbered as in the definition code's third character.
///
/// # Invariants
/// - Discriminants match the upstream shape identifiers (1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModShape {
    /// Square slot (transmitter).
    Square = 1,
    /// Arrow slot (receiver).
    Arrow = 2,
    /// Diamond slot (processor).
    Diamond = 3,
    /// Triangle slot (holo-array).
    Triangle = 4,
    /// Circle slot (data-bus).
    Circle = 5,
    /// Cross slot (multiplexer).
    Cross = 6,
}

impl ModShape {
    /// Resolves a shape from its upstream identifier (returns `None` when out
    /// of the 1-6 domain).
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Square),
            2 => Some(Self::Arrow),
            3 => Some(Self::Diamond),
            4 => Some(Self::Triangle),
            5 => Some(Self::Circle),
            6 => Some(Self::Cross),
            _ => None,
        }
    }
}

/// Mod set bonuses, numbered as in the definition code's first character.
///
/// # Invariants
/// - Discriminants match the upstream set identifiers (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModSet {
    /// Health set.
    Health = 1,
    /// Offense set.
    Offense = 2,
    /// Defense set.
    Defense = 3,
    /// Speed set.
    Speed = 4,
    /// Critical Chance set.
    CriticalChance = 5,
    /// Critical Damage set.
    CriticalDamage = 6,
    /// Potency set.
    Potency = 7,
    /// Tenacity set.
    Tenacity = 8,
}

impl ModSet {
    /// Resolves a set from its upstream identifier (returns `None` when out
    /// of the 1-8 domain).
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Health),
            2 => Some(Self::Offense),
            3 => Some(Self::Defense),
            4 => Some(Self::Speed),
            5 => Some(Self::CriticalChance),
            6 => Some(Self::CriticalDamage),
            7 => Some(Self::Potency),
            8 => Some(Self::Tenacity),
            _ => None,
        }
    }
}

/// Quality colors mapped from the numeric tier (1-5).
///
/// # Invariants
/// - Wire form is the lowercase color name used as a profile-table key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityColor {
    /// Tier 1.
    Grey,
    /// Tier 2.
    Green,
    /// Tier 3.
    Blue,
    /// Tier 4.
    Purple,
    /// Tier 5.
    Gold,
}

impl QualityColor {
    /// Maps a quality tier to its color name (returns `None` when the tier is
    /// outside the 1-5 domain).
    #[must_use]
    pub const fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Self::Grey),
            2 => Some(Self::Green),
            3 => Some(Self::Blue),
            4 => Some(Self::Purple),
            5 => Some(Self::Gold),
            _ => None,
        }
    }

    /// Returns the lowercase wire form of the color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grey => "grey",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Gold => "gold",
        }
    }
}

// ============================================================================
// SECTION: Stats
// ============================================================================

/// Primary stat of a mod.
///
/// # Invariants
/// - `value` is already display-formatted (percentage or floored flat value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryStat {
    /// Unit stat identifier.
    pub stat_id: u32,
    /// Formatted stat value.
    pub value: f64,
}

/// Secondary stat of a mod with roll efficiency data.
///
/// # Invariants
/// - `roll_efficiencies` is either empty (no reference bounds) or has one
///   entry per roll in `roll_values`.
/// - `efficiency` is the arithmetic mean of `roll_efficiencies` (0 if empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryStat {
    /// Unit stat identifier.
    pub stat_id: u32,
    /// Formatted stat value.
    pub value: f64,
    /// Number of rolls applied to this stat.
    pub rolls: u8,
    /// Average roll efficiency, 0-100.
    pub efficiency: f64,
    /// Raw per-roll values from the upstream record.
    pub roll_values: Vec<i64>,
    /// Per-roll efficiencies, 0-100 each.
    pub roll_efficiencies: Vec<f64>,
}

// ============================================================================
// SECTION: Decoded Mod
// ============================================================================

/// Decoded mod item, immutable per evaluation call.
///
/// # Invariants
/// - `set_id`, `rarity`, and `shape_id` are the three decimal digits of the
///   definition code, in order.
/// - `secondaries` holds 0-4 entries in upstream order.
/// - `overall_efficiency` is the mean of secondary-stat efficiencies (0 when
///   there are no secondary stats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    /// Opaque upstream identifier.
    pub id: String,
    /// Set identifier digit from the definition code.
    pub set_id: u8,
    /// Rarity in dots (1-6) from the definition code.
    pub rarity: u8,
    /// Shape identifier digit from the definition code.
    pub shape_id: u8,
    /// Current level (domain-valid range 1-15).
    pub level: u8,
    /// Quality tier (1-5, grey through gold).
    pub tier: u8,
    /// Primary stat.
    pub primary: PrimaryStat,
    /// Secondary stats in upstream order.
    pub secondaries: Vec<SecondaryStat>,
    /// Mean of secondary-stat efficiencies, 0-100.
    pub overall_efficiency: f64,
}

impl Mod {
    /// Returns the slot shape, if the shape digit is in the known domain.
    #[must_use]
    pub const fn shape(&self) -> Option<ModShape> {
        ModShape::from_id(self.shape_id)
    }

    /// Returns the set bonus, if the set digit is in the known domain.
    #[must_use]
    pub const fn set(&self) -> Option<ModSet> {
        ModSet::from_id(self.set_id)
    }

    /// Returns the quality color, if the tier is in the 1-5 domain.
    #[must_use]
    pub const fn quality(&self) -> Option<QualityColor> {
        QualityColor::from_tier(self.tier)
    }

    /// Finds a secondary stat by unit stat identifier.
    #[must_use]
    pub fn secondary(&self, stat_id: u32) -> Option<&SecondaryStat> {
        self.secondaries.iter().find(|stat| stat.stat_id == stat_id)
    }
}
