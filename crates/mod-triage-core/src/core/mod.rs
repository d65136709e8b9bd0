// crates/mod-triage-core/src/core/mod.rs
// ============================================================================
// Module: Mod Triage Core Types
// Description: Domain types shared by the decoder, registry, and executor.
// Purpose: Re-export the decoded mod model, profile tree, verdicts, and traces.
// Dependencies: crate::core::{item, profile, reference, trace, verdict}
// ============================================================================

//! ## Overview
//! Core types are plain serde data structures with stable wire forms. They
//! carry no behavior beyond construction helpers and key resolution; all
//! control flow lives in [`crate::runtime`].

pub mod item;
pub mod profile;
pub mod reference;
pub mod trace;
pub mod verdict;

pub use item::ARROW_SHAPE_ID;
pub use item::Mod;
pub use item::ModSet;
pub use item::ModShape;
pub use item::PrimaryStat;
pub use item::QualityColor;
pub use item::SPEED_STAT_ID;
pub use item::SecondaryStat;
pub use profile::CheckStep;
pub use profile::Directive;
pub use profile::LevelBuckets;
pub use profile::LevelKey;
pub use profile::Profile;
pub use profile::ProfileTable;
pub use profile::RarityBucket;
pub use profile::RuleName;
pub use profile::RuleParams;
pub use reference::ReferenceData;
pub use reference::RollBounds;
pub use reference::StatInfo;
pub use trace::EvaluationStep;
pub use trace::StepOutcome;
pub use trace::StepResult;
pub use trace::WorkflowResult;
pub use verdict::ResultCode;
pub use verdict::VerdictCategory;
pub use verdict::VerdictDisplay;
