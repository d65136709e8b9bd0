// crates/mod-triage-core/src/runtime/mod.rs
// ============================================================================
// Module: Mod Triage Runtime
// Description: Rule registry and workflow executor.
// Purpose: Turn profile data plus a decoded mod into a verdict with a trace.
// Dependencies: crate::runtime::{executor, registry}
// ============================================================================

//! ## Overview
//! The runtime owns all control flow: [`registry`] resolves named rules into
//! three-valued predicate functions, and [`executor`] walks the resolved
//! check list with CONTINUE/STOP/ERROR semantics.

pub mod executor;
pub mod registry;

pub use executor::WorkflowEngine;
pub use registry::DescriptionFn;
pub use registry::DescriptionMap;
pub use registry::RuleFn;
pub use registry::RuleOutcome;
pub use registry::RuleRegistry;
