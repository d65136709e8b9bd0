// crates/mod-triage-core/src/runtime/executor.rs
// ============================================================================
// Module: Workflow Resolver and Executor
// Description: Bucket resolution and check-list execution with
//              CONTINUE/STOP/ERROR semantics.
// Purpose: Produce a verdict and a full evaluation trace for one mod.
// Dependencies: crate::core, crate::runtime::registry, tracing
// ============================================================================

//! ## Overview
//! Execution is two phases. Resolution walks the profile tree: profile name,
//! rarity bucket (1-4 collapse into `dot_1-4`), quality color from the tier,
//! then the best-fit level bucket (largest configured level not exceeding the
//! mod's level). Any missing link terminates immediately with an `ERROR`
//! verdict and a single `Setup` trace entry.
//!
//! Execution then runs the resolved check list in order. Not-applicable
//! rules record a `Skip` entry and move on without consuming a directive;
//! pass/fail outcomes select the step's directive. `STOP` and `ERROR`
//! directives return immediately with the accumulated trace; exhausting the
//! list without a terminal directive is itself a fatal authoring bug and
//! returns `ERROR`.
//!
//! Every failure mode is a deterministic, immediate terminal `ERROR`; there
//! are no retries. The engine holds only read-only state, so evaluations may
//! run concurrently without coordination.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::core::item::Mod;
use crate::core::item::QualityColor;
use crate::core::profile::CheckStep;
use crate::core::profile::Directive;
use crate::core::profile::ProfileTable;
use crate::core::profile::RarityBucket;
use crate::core::profile::RuleName;
use crate::core::trace::EvaluationStep;
use crate::core::trace::StepOutcome;
use crate::core::trace::StepResult;
use crate::core::trace::WorkflowResult;
use crate::core::verdict::ResultCode;
use crate::runtime::registry::DescriptionMap;
use crate::runtime::registry::RuleOutcome;
use crate::runtime::registry::RuleRegistry;

// ============================================================================
// SECTION: Workflow Engine
// ============================================================================

/// Workflow engine holding the profile table, rule registry, and description
/// templates.
///
/// # Invariants
/// - All fields are read-only after construction; `execute` allocates its own
///   trace buffer and touches no shared mutable state.
#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    /// Evaluation profiles keyed by name.
    profiles: ProfileTable,
    /// Named rule functions.
    registry: RuleRegistry,
    /// Trace description templates.
    descriptions: DescriptionMap,
}

impl WorkflowEngine {
    /// Creates an engine over the given profiles with the built-in rule
    /// library and description templates.
    #[must_use]
    pub fn new(profiles: ProfileTable) -> Self {
        Self::with_parts(profiles, RuleRegistry::builtin(), DescriptionMap::builtin())
    }

    /// Creates an engine from explicit parts, for callers that register
    /// custom rules or templates.
    #[must_use]
    pub const fn with_parts(
        profiles: ProfileTable,
        registry: RuleRegistry,
        descriptions: DescriptionMap,
    ) -> Self {
        Self {
            profiles,
            registry,
            descriptions,
        }
    }

    /// Returns the profile table.
    #[must_use]
    pub const fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    /// Returns the rule registry.
    #[must_use]
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Evaluates one mod against a named profile, returning the verdict and
    /// the full evaluation trace. Every failure mode maps to the `ERROR`
    /// verdict with a descriptive trace entry; this method never panics and
    /// never returns an `Err`.
    #[must_use]
    pub fn execute(&self, subject: &Mod, profile_name: &str) -> WorkflowResult {
        debug!("executing workflow `{profile_name}` for mod {}", subject.id);

        let Some(profile) = self.profiles.get(profile_name) else {
            let message = format!("evaluation profile `{profile_name}` not found");
            error!("{message}");
            return setup_failure(message);
        };

        let rarity_bucket = RarityBucket::from_rarity(subject.rarity);
        let Some(color) = QualityColor::from_tier(subject.tier) else {
            let message =
                format!("quality color undefined for tier {} (expected 1-5)", subject.tier);
            warn!("{message}");
            return setup_failure(message);
        };
        debug!(
            "mod properties - rarity bucket: {rarity_bucket}, color: {}, level: {}",
            color.as_str(),
            subject.level
        );

        let Some(level_buckets) = profile.level_buckets(rarity_bucket, color) else {
            let message = format!(
                "no workflow configured for rarity {rarity_bucket}, color {}",
                color.as_str()
            );
            warn!("{message}");
            return setup_failure(message);
        };

        let Some(level_key) = level_buckets.resolve(subject.level) else {
            let message =
                format!("no applicable level bucket for mod at level {}", subject.level);
            warn!("{message}");
            return setup_failure(message);
        };
        debug!("using checks from bucket {level_key}");

        let Some(checks) = level_buckets.get(level_key) else {
            let message = format!("could not retrieve checks for resolved bucket {level_key}");
            error!("{message}");
            return setup_failure(message);
        };

        self.run_checks(subject, checks)
    }

    /// Executes a resolved check list, building the trace as it goes.
    fn run_checks(&self, subject: &Mod, checks: &[CheckStep]) -> WorkflowResult {
        let mut trace: Vec<EvaluationStep> = Vec::new();
        let mut step_id: u32 = 1;

        for step in checks {
            let Some(rule_fn) = self.registry.resolve(&step.rule) else {
                let message = format!("rule function `{}` not found in registry", step.rule);
                error!("{message}");
                trace.push(EvaluationStep {
                    step_id,
                    rule: step.rule.clone(),
                    params: step.params.clone(),
                    outcome: StepOutcome::Fail,
                    result: StepResult::Verdict(ResultCode::Error),
                    description: message,
                });
                return WorkflowResult {
                    result_code: ResultCode::Error,
                    trace,
                };
            };

            let outcome = rule_fn(subject, step.params.as_ref());
            if outcome == RuleOutcome::NotApplicable {
                debug!("rule `{}` was not applicable; skipping", step.rule);
                trace.push(EvaluationStep {
                    step_id,
                    rule: step.rule.clone(),
                    params: step.params.clone(),
                    outcome: StepOutcome::Skip,
                    result: StepResult::NotApplicable,
                    description: "Rule was not applicable to this mod.".to_string(),
                });
                step_id += 1;
                continue;
            }

            let passed = outcome == RuleOutcome::Pass;
            let directive = if passed { step.on_pass } else { step.on_fail };
            let step_outcome = if passed { StepOutcome::Pass } else { StepOutcome::Fail };
            let outcome_label = if passed { "Pass" } else { "Fail" };
            let step_result =
                directive.result().map_or(StepResult::Continued, StepResult::Verdict);
            debug!(
                "rule `{}` outcome: {outcome_label}, directive result: {step_result}",
                step.rule
            );

            trace.push(EvaluationStep {
                step_id,
                rule: step.rule.clone(),
                params: step.params.clone(),
                outcome: step_outcome,
                result: step_result,
                description: self.descriptions.describe(&step.rule, step.params.as_ref()),
            });
            step_id += 1;

            match directive {
                Directive::Continue => {}
                Directive::Stop {
                    result,
                } => {
                    debug!("workflow for mod {} finished with result {result}", subject.id);
                    return WorkflowResult {
                        result_code: result,
                        trace,
                    };
                }
                Directive::Error {
                    result,
                } => {
                    error!("explicit error state reached in workflow: {result}");
                    return WorkflowResult {
                        result_code: result,
                        trace,
                    };
                }
            }
        }

        let message = "workflow completed without a STOP or ERROR action".to_string();
        error!("{message}");
        trace.push(EvaluationStep {
            step_id,
            rule: RuleName::new("End of Workflow"),
            params: None,
            outcome: StepOutcome::Fail,
            result: StepResult::Verdict(ResultCode::Error),
            description: message,
        });
        WorkflowResult {
            result_code: ResultCode::Error,
            trace,
        }
    }
}

// ============================================================================
// SECTION: Setup Failures
// ============================================================================

/// Builds the `ERROR` result for a resolution failure: a single `Setup`
/// trace entry carrying the diagnostic description.
fn setup_failure(description: String) -> WorkflowResult {
    WorkflowResult {
        result_code: ResultCode::Error,
        trace: vec![EvaluationStep {
            step_id: 1,
            rule: RuleName::new("Setup"),
            params: None,
            outcome: StepOutcome::Fail,
            result: StepResult::Verdict(ResultCode::Error),
            description,
        }],
    }
}
