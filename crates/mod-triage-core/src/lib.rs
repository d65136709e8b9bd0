// crates/mod-triage-core/src/lib.rs
// ============================================================================
// Module: Mod Triage Core
// Description: Rule-driven evaluation engine for equipped mod items.
// Purpose: Classify a decoded mod into an actionable verdict with a full trace.
// Dependencies: serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! Mod Triage Core classifies a mod into a verdict (keep, sell, slice,
//! level-to-N, or error) by walking a profile-specific decision table keyed by
//! the mod's rarity, quality tier, and level. Every evaluation produces the
//! final verdict plus an ordered trace of each rule that ran.
//!
//! The engine is synchronous, stateless across calls, and side-effect free
//! apart from diagnostic logging: profile tables and the rule registry are
//! read-only after construction, so evaluations may run concurrently without
//! coordination.
//!
//! Decoding of the compact upstream item record lives in [`decode`]; the
//! profile tree and verdict vocabulary live in [`core`]; the rule registry and
//! the workflow executor live in [`runtime`].

pub mod core;
pub mod decode;
pub mod runtime;

pub use crate::core::CheckStep;
pub use crate::core::Directive;
pub use crate::core::EvaluationStep;
pub use crate::core::LevelBuckets;
pub use crate::core::LevelKey;
pub use crate::core::Mod;
pub use crate::core::ModSet;
pub use crate::core::ModShape;
pub use crate::core::PrimaryStat;
pub use crate::core::Profile;
pub use crate::core::ProfileTable;
pub use crate::core::QualityColor;
pub use crate::core::RarityBucket;
pub use crate::core::ReferenceData;
pub use crate::core::ResultCode;
pub use crate::core::RollBounds;
pub use crate::core::RuleName;
pub use crate::core::RuleParams;
pub use crate::core::SecondaryStat;
pub use crate::core::StatInfo;
pub use crate::core::StepOutcome;
pub use crate::core::StepResult;
pub use crate::core::VerdictCategory;
pub use crate::core::VerdictDisplay;
pub use crate::core::WorkflowResult;
pub use crate::decode::DecodeError;
pub use crate::decode::RawMod;
pub use crate::decode::decode_mod;
pub use crate::runtime::DescriptionMap;
pub use crate::runtime::RuleOutcome;
pub use crate::runtime::RuleRegistry;
pub use crate::runtime::WorkflowEngine;
