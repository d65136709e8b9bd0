//! Workflow executor tests for mod-triage-core.
// crates/mod-triage-core/tests/executor.rs
// =============================================================================
// Module: Workflow Executor Tests
// Description: Validate bucket resolution, directive semantics, and the
//              trace contract.
// Purpose: Ensure every failure mode maps to an ERROR verdict with a
//          diagnostic trace entry.
// =============================================================================

use std::collections::BTreeMap;

use mod_triage_core::CheckStep;
use mod_triage_core::Directive;
use mod_triage_core::LevelBuckets;
use mod_triage_core::Mod;
use mod_triage_core::PrimaryStat;
use mod_triage_core::Profile;
use mod_triage_core::ProfileTable;
use mod_triage_core::QualityColor;
use mod_triage_core::RarityBucket;
use mod_triage_core::ResultCode;
use mod_triage_core::RuleName;
use mod_triage_core::RuleParams;
use mod_triage_core::StepOutcome;
use mod_triage_core::StepResult;
use mod_triage_core::WorkflowEngine;
use mod_triage_core::WorkflowResult;

type TestResult = Result<(), String>;

const SPEED: u32 = 5;
const ARROW: u8 = 2;
const SQUARE: u8 = 1;

fn subject(rarity: u8, tier: u8, level: u8, shape_id: u8) -> Mod {
    Mod {
        id: "mod-exec".to_string(),
        set_id: 4,
        rarity,
        shape_id,
        level,
        tier,
        primary: PrimaryStat {
            stat_id: SPEED,
            value: 17.0,
        },
        secondaries: Vec::new(),
        overall_efficiency: 0.0,
    }
}

fn stop(result: ResultCode) -> Directive {
    Directive::Stop {
        result,
    }
}

fn step(rule: &str, on_pass: Directive, on_fail: Directive) -> CheckStep {
    CheckStep {
        rule: RuleName::new(rule),
        params: None,
        on_pass,
        on_fail,
    }
}

fn default_stop(result: ResultCode) -> Vec<CheckStep> {
    vec![step(
        "defaultRule",
        stop(result),
        Directive::Error {
            result: ResultCode::Error,
        },
    )]
}

/// One profile: `dot_5`/grey buckets at levels 1, 9, and 15 with distinct
/// verdicts, plus a collapsed `dot_1-4`/grey bucket that always sells.
fn table() -> ProfileTable {
    let mut levels = LevelBuckets::new();
    levels.insert(1, default_stop(ResultCode::Keep));
    levels.insert(9, default_stop(ResultCode::Sell));
    levels.insert(15, default_stop(ResultCode::Slice));

    let mut low_levels = LevelBuckets::new();
    low_levels.insert(1, default_stop(ResultCode::Sell));

    let mut dot5 = BTreeMap::new();
    dot5.insert(QualityColor::Grey, levels);
    let mut low = BTreeMap::new();
    low.insert(QualityColor::Grey, low_levels);

    let mut buckets = BTreeMap::new();
    buckets.insert(RarityBucket::Dot(5), dot5);
    buckets.insert(RarityBucket::Low, low);

    let mut profiles = ProfileTable::new();
    profiles.insert(
        "grading".to_string(),
        Profile {
            name: "Grading".to_string(),
            description: "Level-bucket fixture".to_string(),
            buckets,
        },
    );
    profiles
}

fn expect_setup_error(outcome: &WorkflowResult, context: &str) -> TestResult {
    if outcome.result_code != ResultCode::Error {
        return Err(format!("{context}: expected ERROR verdict, got {}", outcome.result_code));
    }
    if outcome.trace.len() != 1 {
        return Err(format!("{context}: expected one trace entry, got {}", outcome.trace.len()));
    }
    let entry = &outcome.trace[0];
    if entry.rule.as_str() != "Setup" || entry.outcome != StepOutcome::Fail {
        return Err(format!("{context}: expected a failed Setup entry"));
    }
    Ok(())
}

fn expect_verdict(outcome: &WorkflowResult, expected: ResultCode, context: &str) -> TestResult {
    if outcome.result_code == expected {
        Ok(())
    } else {
        Err(format!("{context}: expected {expected}, got {}", outcome.result_code))
    }
}

#[test]
fn missing_profile_reports_a_setup_error() -> TestResult {
    let engine = WorkflowEngine::new(table());
    let outcome = engine.execute(&subject(5, 1, 1, SQUARE), "no_such_profile");
    expect_setup_error(&outcome, "missing profile")
}

#[test]
fn out_of_domain_tier_reports_a_setup_error() -> TestResult {
    let engine = WorkflowEngine::new(table());
    for tier in [0, 6, 200] {
        expect_setup_error(&engine.execute(&subject(5, tier, 1, SQUARE), "grading"), "bad tier")?;
    }
    Ok(())
}

#[test]
fn unconfigured_rarity_bucket_reports_a_setup_error() -> TestResult {
    let engine = WorkflowEngine::new(table());
    let outcome = engine.execute(&subject(6, 1, 1, SQUARE), "grading");
    expect_setup_error(&outcome, "rarity 6")
}

#[test]
fn unconfigured_color_reports_a_setup_error() -> TestResult {
    let engine = WorkflowEngine::new(table());
    let outcome = engine.execute(&subject(5, 5, 1, SQUARE), "grading");
    expect_setup_error(&outcome, "gold tier")
}

#[test]
fn level_below_every_bucket_reports_a_setup_error() -> TestResult {
    let engine = WorkflowEngine::new(table());
    let outcome = engine.execute(&subject(5, 1, 0, SQUARE), "grading");
    expect_setup_error(&outcome, "level 0")
}

#[test]
fn level_buckets_resolve_best_fit_not_exceeding() -> TestResult {
    let engine = WorkflowEngine::new(table());
    let cases = [
        (1, ResultCode::Keep),
        (7, ResultCode::Keep),
        (9, ResultCode::Sell),
        (12, ResultCode::Sell),
        (15, ResultCode::Slice),
    ];
    for (level, expected) in cases {
        let outcome = engine.execute(&subject(5, 1, level, SQUARE), "grading");
        expect_verdict(&outcome, expected, &format!("level {level}"))?;
    }
    Ok(())
}

#[test]
fn low_rarities_collapse_into_the_shared_bucket() -> TestResult {
    let engine = WorkflowEngine::new(table());
    for rarity in 1..=4 {
        let outcome = engine.execute(&subject(rarity, 1, 5, SQUARE), "grading");
        expect_verdict(&outcome, ResultCode::Sell, &format!("rarity {rarity}"))?;
    }
    Ok(())
}

#[test]
fn stop_directive_records_the_verdict_on_the_trace() -> TestResult {
    let engine = WorkflowEngine::new(table());
    let outcome = engine.execute(&subject(5, 1, 1, SQUARE), "grading");
    expect_verdict(&outcome, ResultCode::Keep, "stop directive")?;
    if outcome.trace.len() != 1 {
        return Err(format!("expected one trace entry, got {}", outcome.trace.len()));
    }
    let entry = &outcome.trace[0];
    if entry.step_id != 1
        || entry.outcome != StepOutcome::Pass
        || entry.result != StepResult::Verdict(ResultCode::Keep)
        || entry.description != "Default condition"
    {
        return Err("trace entry did not record the stop verdict".to_string());
    }
    Ok(())
}

#[test]
fn unregistered_rules_are_a_hard_error() -> TestResult {
    let mut profiles = table();
    if let Some(profile) = profiles.get_mut("grading") {
        if let Some(colors) = profile.buckets.get_mut(&RarityBucket::Dot(5)) {
            if let Some(levels) = colors.get_mut(&QualityColor::Grey) {
                levels.insert(
                    1,
                    vec![step("noSuchRule", stop(ResultCode::Keep), stop(ResultCode::Sell))],
                );
            }
        }
    }
    let engine = WorkflowEngine::new(profiles);
    let outcome = engine.execute(&subject(5, 1, 1, SQUARE), "grading");
    expect_verdict(&outcome, ResultCode::Error, "unregistered rule")?;
    if outcome.trace.len() != 1 {
        return Err(format!("expected one trace entry, got {}", outcome.trace.len()));
    }
    let entry = &outcome.trace[0];
    if entry.rule.as_str() != "noSuchRule" || entry.outcome != StepOutcome::Fail {
        return Err("trace entry did not echo the unresolvable rule".to_string());
    }
    Ok(())
}

#[test]
fn not_applicable_steps_skip_without_consuming_a_directive() -> TestResult {
    let mut profiles = table();
    if let Some(profile) = profiles.get_mut("grading") {
        if let Some(colors) = profile.buckets.get_mut(&RarityBucket::Dot(5)) {
            if let Some(levels) = colors.get_mut(&QualityColor::Grey) {
                levels.insert(
                    1,
                    vec![
                        step("isArrowPrimSpeed", stop(ResultCode::Slice), Directive::Continue),
                        step(
                            "defaultRule",
                            stop(ResultCode::Keep),
                            Directive::Error {
                                result: ResultCode::Error,
                            },
                        ),
                    ],
                );
            }
        }
    }
    let engine = WorkflowEngine::new(profiles);

    // Square shape: the arrow check is not applicable and must skip.
    let outcome = engine.execute(&subject(5, 1, 1, SQUARE), "grading");
    expect_verdict(&outcome, ResultCode::Keep, "skipped arrow check")?;
    if outcome.trace.len() != 2 {
        return Err(format!("expected two trace entries, got {}", outcome.trace.len()));
    }
    let skipped = &outcome.trace[0];
    if skipped.outcome != StepOutcome::Skip
        || skipped.result != StepResult::NotApplicable
        || skipped.result.as_str() != "N/A"
    {
        return Err("skipped step was not recorded as N/A".to_string());
    }

    // Arrow shape with a Speed primary: the same list stops at step one.
    let outcome = engine.execute(&subject(5, 1, 1, ARROW), "grading");
    expect_verdict(&outcome, ResultCode::Slice, "applicable arrow check")?;
    if outcome.trace.len() != 1 {
        return Err(format!("expected one trace entry, got {}", outcome.trace.len()));
    }
    Ok(())
}

#[test]
fn exhausted_check_lists_are_an_error() -> TestResult {
    let mut profiles = table();
    if let Some(profile) = profiles.get_mut("grading") {
        if let Some(colors) = profile.buckets.get_mut(&RarityBucket::Dot(5)) {
            if let Some(levels) = colors.get_mut(&QualityColor::Grey) {
                levels.insert(
                    1,
                    vec![step("defaultRule", Directive::Continue, Directive::Continue)],
                );
            }
        }
    }
    let engine = WorkflowEngine::new(profiles);
    let outcome = engine.execute(&subject(5, 1, 1, SQUARE), "grading");
    expect_verdict(&outcome, ResultCode::Error, "exhausted list")?;
    if outcome.trace.len() != 2 {
        return Err(format!("expected two trace entries, got {}", outcome.trace.len()));
    }
    let first = &outcome.trace[0];
    if first.result != StepResult::Continued || first.result.as_str() != "CONTINUE" {
        return Err("continued step was not recorded as CONTINUE".to_string());
    }
    let last = &outcome.trace[1];
    if last.rule.as_str() != "End of Workflow" || last.outcome != StepOutcome::Fail {
        return Err("exhaustion entry was not labeled End of Workflow".to_string());
    }
    Ok(())
}

#[test]
fn evaluation_is_deterministic() -> TestResult {
    let engine = WorkflowEngine::new(table());
    let item = subject(5, 1, 9, SQUARE);
    let first = engine.execute(&item, "grading");
    let second = engine.execute(&item, "grading");
    if first != second {
        return Err("identical evaluations diverged".to_string());
    }
    Ok(())
}

#[test]
fn trace_step_ids_are_one_based_and_monotone() -> TestResult {
    let mut profiles = table();
    if let Some(profile) = profiles.get_mut("grading") {
        if let Some(colors) = profile.buckets.get_mut(&RarityBucket::Dot(5)) {
            if let Some(levels) = colors.get_mut(&QualityColor::Grey) {
                levels.insert(
                    1,
                    vec![
                        CheckStep {
                            rule: RuleName::new("statThreshold"),
                            params: Some(RuleParams::presence("Speed")),
                            on_pass: stop(ResultCode::Keep),
                            on_fail: Directive::Continue,
                        },
                        step("isArrowPrimSpeed", stop(ResultCode::Slice), Directive::Continue),
                        step("defaultRule", stop(ResultCode::Sell), Directive::Continue),
                    ],
                );
            }
        }
    }
    let engine = WorkflowEngine::new(profiles);

    // No Speed secondary and a square shape: fail, skip, then default.
    let outcome = engine.execute(&subject(5, 1, 1, SQUARE), "grading");
    expect_verdict(&outcome, ResultCode::Sell, "three-step list")?;
    let ids: Vec<u32> = outcome.trace.iter().map(|entry| entry.step_id).collect();
    if ids != vec![1, 2, 3] {
        return Err(format!("expected step ids 1-3, got {} entries", ids.len()));
    }
    Ok(())
}
