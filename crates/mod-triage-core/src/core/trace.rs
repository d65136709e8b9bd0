// crates/mod-triage-core/src/core/trace.rs
// ============================================================================
// Module: Evaluation Trace Model
// Description: Per-step evaluation records and the final workflow result.
// Purpose: Capture the verdict and the ordered audit trail of one evaluation.
// Dependencies: crate::core::{profile, verdict}, serde
// ============================================================================

//! ## Overview
//! A [`WorkflowResult`] is constructed fresh per evaluation call and is
//! immutable once returned. Its trace lists every step the executor touched,
//! in order, with 1-based monotonically increasing step identifiers.

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

use crate::core::profile::RuleName;
use crate::core::profile::RuleParams;
use crate::core::verdict::ResultCode;

// ============================================================================
// SECTION: Step Outcomes
// ============================================================================

/// Outcome of a single evaluation step.
///
/// # Invariants
/// - `Skip` is reserved for not-applicable rules; it never consumes a
///   directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The rule passed.
    Pass,
    /// The rule failed.
    Fail,
    /// The rule was not applicable to this mod.
    Skip,
}

/// Result recorded on a trace entry.
///
/// # Invariants
/// - `Verdict` carries the directive's declared code; `NotApplicable` marks
///   skipped steps; `Continued` marks steps whose directive did not
///   terminate the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The step's directive declared this verdict code.
    Verdict(ResultCode),
    /// The rule was not applicable (`N/A` on the wire).
    NotApplicable,
    /// The step's directive continued to the next step.
    Continued,
}

impl StepResult {
    /// Returns the stable wire form of the step result.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verdict(code) => code.as_str(),
            Self::NotApplicable => "N/A",
            Self::Continued => "CONTINUE",
        }
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StepResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StepResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "N/A" => Ok(Self::NotApplicable),
            "CONTINUE" => Ok(Self::Continued),
            code => ResultCode::from_str(code).map(Self::Verdict).map_err(DeError::custom),
        }
    }
}

// ============================================================================
// SECTION: Evaluation Steps
// ============================================================================

/// Trace entry describing one evaluated step.
///
/// # Invariants
/// - `step_id` is 1-based and monotonically increasing within one
///   evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationStep {
    /// 1-based step identifier.
    pub step_id: u32,
    /// Rule that ran (or a synthetic label such as `Setup`).
    pub rule: RuleName,
    /// Parameters passed to the rule, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RuleParams>,
    /// Step outcome.
    pub outcome: StepOutcome,
    /// Result recorded for the step.
    pub result: StepResult,
    /// Human-readable rationale for the step.
    pub description: String,
}

// ============================================================================
// SECTION: Workflow Result
// ============================================================================

/// Final verdict plus the ordered evaluation trace.
///
/// # Invariants
/// - Constructed fresh per evaluation call; never persisted or mutated after
///   return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// Final verdict code.
    pub result_code: ResultCode,
    /// Ordered evaluation steps.
    pub trace: Vec<EvaluationStep>,
}
