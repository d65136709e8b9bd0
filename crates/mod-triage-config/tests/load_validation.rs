//! Profile load and validation tests for mod-triage-config.
// crates/mod-triage-config/tests/load_validation.rs
// =============================================================================
// Module: Profile Load Validation Tests
// Description: Validate profile-document parsing and startup validation.
// Purpose: Ensure authoring defects are rejected before the engine runs.
// =============================================================================

use mod_triage_config::ProfileDefect;
use mod_triage_config::profile_table_from_str;
use mod_triage_config::validate_profile_table;
use mod_triage_core::Directive;
use mod_triage_core::QualityColor;
use mod_triage_core::RarityBucket;
use mod_triage_core::ResultCode;
use mod_triage_core::RuleRegistry;

type TestResult = Result<(), String>;

fn document(steps: &str) -> String {
    format!(
        r#"{{
            "fixture": {{
                "name": "Fixture",
                "description": "Validation fixture",
                "buckets": {{
                    "dot_5": {{
                        "grey": {{
                            "level_1": {steps}
                        }}
                    }}
                }}
            }}
        }}"#
    )
}

const TERMINAL_STEP: &str = r#"[{
    "rule": "defaultRule",
    "on_pass": { "action": "STOP", "result": "KEEP" },
    "on_fail": { "action": "ERROR", "result": "ERROR" }
}]"#;

#[test]
fn well_formed_documents_parse_into_typed_trees() -> TestResult {
    let table = profile_table_from_str(&document(TERMINAL_STEP)).map_err(|err| err.to_string())?;
    let Some(profile) = table.get("fixture") else {
        return Err("parsed table lost the fixture profile".to_string());
    };
    let Some(levels) = profile.level_buckets(RarityBucket::Dot(5), QualityColor::Grey) else {
        return Err("parsed table lost the dot_5/grey bucket".to_string());
    };
    let Some(key) = levels.resolve(1) else {
        return Err("parsed table lost the level_1 bucket".to_string());
    };
    let Some(checks) = levels.get(key) else {
        return Err("resolved bucket carried no checks".to_string());
    };
    if checks.len() != 1 || checks[0].rule.as_str() != "defaultRule" {
        return Err("parsed check list did not match the document".to_string());
    }
    let expected = Directive::Stop {
        result: ResultCode::Keep,
    };
    if checks[0].on_pass != expected {
        return Err("parsed directive did not match the document".to_string());
    }
    Ok(())
}

#[test]
fn malformed_bucket_keys_are_rejected_at_parse_time() -> TestResult {
    for key in ["dot_x", "d5", "level_1"] {
        let bad = document(TERMINAL_STEP).replace("dot_5", key);
        if profile_table_from_str(&bad).is_ok() {
            return Err(format!("bucket key `{key}` was not rejected"));
        }
    }
    Ok(())
}

#[test]
fn unknown_directive_actions_are_rejected_at_parse_time() -> TestResult {
    let bad = document(TERMINAL_STEP).replace("\"STOP\"", "\"HALT\"");
    if profile_table_from_str(&bad).is_ok() {
        return Err("directive action HALT was not rejected".to_string());
    }
    Ok(())
}

#[test]
fn stop_directives_require_a_result_code() -> TestResult {
    let bad = document(
        r#"[{
            "rule": "defaultRule",
            "on_pass": { "action": "STOP" },
            "on_fail": { "action": "ERROR", "result": "ERROR" }
        }]"#,
    );
    if profile_table_from_str(&bad).is_ok() {
        return Err("STOP without a result was not rejected".to_string());
    }
    Ok(())
}

#[test]
fn validation_accepts_terminal_check_lists() -> TestResult {
    let table = profile_table_from_str(&document(TERMINAL_STEP)).map_err(|err| err.to_string())?;
    validate_profile_table(&table, &RuleRegistry::builtin()).map_err(|err| err.to_string())
}

#[test]
fn validation_rejects_unknown_rules_with_their_location() -> TestResult {
    let steps = r#"[{
        "rule": "noSuchRule",
        "on_pass": { "action": "STOP", "result": "KEEP" },
        "on_fail": { "action": "ERROR", "result": "ERROR" }
    }]"#;
    let table = profile_table_from_str(&document(steps)).map_err(|err| err.to_string())?;
    let Err(error) = validate_profile_table(&table, &RuleRegistry::builtin()) else {
        return Err("unknown rule passed validation".to_string());
    };
    if error.defects.len() != 1 {
        return Err(format!("expected one defect, got {}", error.defects.len()));
    }
    match &error.defects[0] {
        ProfileDefect::UnknownRule {
            profile,
            location,
            rule,
        } if profile == "fixture" && location == "dot_5/grey/level_1[0]" && rule == "noSuchRule" => {
            Ok(())
        }
        other => Err(format!("unexpected defect: {other}")),
    }
}

#[test]
fn validation_rejects_empty_check_lists() -> TestResult {
    let table = profile_table_from_str(&document("[]")).map_err(|err| err.to_string())?;
    let Err(error) = validate_profile_table(&table, &RuleRegistry::builtin()) else {
        return Err("empty check list passed validation".to_string());
    };
    match &error.defects[..] {
        [ProfileDefect::EmptyCheckList {
            profile,
            location,
        }] if profile == "fixture" && location == "dot_5/grey/level_1" => Ok(()),
        _ => Err("expected a single empty-check-list defect".to_string()),
    }
}

#[test]
fn validation_rejects_final_steps_that_can_continue() -> TestResult {
    let steps = r#"[{
        "rule": "isArrowPrimSpeed",
        "on_pass": { "action": "STOP", "result": "LVL_15" },
        "on_fail": { "action": "CONTINUE" }
    }]"#;
    let table = profile_table_from_str(&document(steps)).map_err(|err| err.to_string())?;
    let Err(error) = validate_profile_table(&table, &RuleRegistry::builtin()) else {
        return Err("continuable final step passed validation".to_string());
    };
    match &error.defects[..] {
        [ProfileDefect::NonTerminalFinalStep {
            profile,
            location,
        }] if profile == "fixture" && location == "dot_5/grey/level_1[0]" => Ok(()),
        _ => Err("expected a single non-terminal-final-step defect".to_string()),
    }
}

#[test]
fn validation_collects_every_defect_in_one_pass() -> TestResult {
    let steps = r#"[{
        "rule": "noSuchRule",
        "on_pass": { "action": "CONTINUE" },
        "on_fail": { "action": "CONTINUE" }
    }]"#;
    let table = profile_table_from_str(&document(steps)).map_err(|err| err.to_string())?;
    let Err(error) = validate_profile_table(&table, &RuleRegistry::builtin()) else {
        return Err("defective table passed validation".to_string());
    };
    if error.defects.len() != 2 {
        return Err(format!("expected two defects, got {}", error.defects.len()));
    }
    Ok(())
}
