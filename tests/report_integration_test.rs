// Integration tests for the migration report: priorities, density,
// effort bands, and truncation signaling.

use legacymap::config::{default_exclude_patterns, ScanLimits};
use legacymap::server::tools::{dispatch, ServerState};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn state() -> ServerState {
    ServerState::new(ScanLimits::default(), default_exclude_patterns())
}

fn report_for(tmp: &TempDir) -> Value {
    let response = dispatch(&state(), "migration_report", &json!({"path": tmp.path()}));
    let value: Value = serde_json::from_str(&response.to_json()).unwrap();
    assert_eq!(value["status"], "success", "report failed: {}", value);
    value["data"].clone()
}

#[test]
fn report_orders_quick_wins_density_and_refactors() {
    let tmp = TempDir::new().unwrap();
    // Two issues in a long file: a quick win.
    fs::write(
        tmp.path().join("quick.py"),
        format!("print \"a\"\nd.has_key(1)\n{}", "x = 1\n".repeat(100)),
    )
    .unwrap();
    // Six issues packed into six lines: high density.
    fs::write(tmp.path().join("dense.py"), "print \"b\"\n".repeat(6)).unwrap();
    // Eight issues spread across a long file: the major refactor.
    fs::write(
        tmp.path().join("big.py"),
        format!("{}{}", "print \"c\"\n".repeat(8), "y = 2\n".repeat(400)),
    )
    .unwrap();

    let data = report_for(&tmp);

    assert_eq!(data["summary"]["files_requiring_changes"], 3);
    assert_eq!(data["summary"]["total_issues"], 16);

    let quick = data["recommended_order"]["quick_wins"].as_array().unwrap();
    assert_eq!(quick.len(), 1);
    assert!(quick[0]["file"].as_str().unwrap().ends_with("quick.py"));

    let dense = data["recommended_order"]["high_density"].as_array().unwrap();
    assert!(dense[0]["file"].as_str().unwrap().ends_with("dense.py"));
    assert_eq!(dense[0]["density"], 100.0);

    let major = data["recommended_order"]["major_refactors"]
        .as_array()
        .unwrap();
    assert!(major[0]["file"].as_str().unwrap().ends_with("big.py"));

    // 16 issues * 2 min = 32 minutes.
    assert_eq!(data["summary"]["estimated_effort"], "32 minutes");
}

#[test]
fn priority_listing_is_capped_with_overflow_count() {
    let tmp = TempDir::new().unwrap();
    for i in 0..23 {
        fs::write(
            tmp.path().join(format!("f{:02}.py", i)),
            "print \"x\"\n".repeat(i + 1),
        )
        .unwrap();
    }

    let data = report_for(&tmp);
    assert_eq!(data["priority_files"].as_array().unwrap().len(), 20);
    assert_eq!(data["additional_files"], 3);
    assert_eq!(data["summary"]["files_requiring_changes"], 23);
}

#[test]
fn clean_tree_reports_zero_effort_in_minutes() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("modern.py"), "print(\"fine\")\n").unwrap();

    let data = report_for(&tmp);
    assert_eq!(data["summary"]["total_issues"], 0);
    assert_eq!(data["summary"]["estimated_effort"], "0 minutes");
    assert!(data["recommended_order"]["quick_wins"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[test]
fn operation_limit_overflow_is_signaled_not_silent() {
    let tmp = TempDir::new().unwrap();
    for i in 0..6 {
        fs::write(tmp.path().join(format!("f{}.py", i)), "print \"x\"\n").unwrap();
    }

    let limits = ScanLimits {
        max_files_per_operation: 4,
        ..Default::default()
    };
    let state = ServerState::new(limits, default_exclude_patterns());
    let response = dispatch(&state, "migration_report", &json!({"path": tmp.path()}));
    let value: Value = serde_json::from_str(&response.to_json()).unwrap();
    let data = &value["data"];

    assert_eq!(data["summary"]["files_scanned"], 4);
    assert_eq!(data["skipped_count"], 2);
    assert!(data["skipped_reason"]
        .as_str()
        .unwrap()
        .contains("max_files_per_operation"));
}
