// Integration tests for the conversion workflow driven through the tool
// dispatch layer, using a stub rewriter in place of the external tool.

use legacymap::config::{default_exclude_patterns, ScanLimits};
use legacymap::convert::SyntaxRewriter;
use legacymap::core::ToolResult;
use legacymap::server::tools::{dispatch, ServerState};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

/// Deterministic stand-in for 2to3: fixes the constructs it knows about.
struct FixedRewriter {
    available: bool,
}

impl SyntaxRewriter for FixedRewriter {
    fn name(&self) -> &str {
        "stub-2to3"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn rewrite(&self, source: &str) -> ToolResult<String> {
        let converted = source
            .lines()
            .map(|line| {
                if let Some(rest) = line.strip_prefix("print ") {
                    format!("print({})", rest)
                } else {
                    line.replace("xrange", "range")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(if source.ends_with('\n') {
            converted + "\n"
        } else {
            converted
        })
    }
}

fn state_with(available: bool) -> ServerState {
    ServerState::with_rewriter(
        ScanLimits::default(),
        default_exclude_patterns(),
        Box::new(FixedRewriter { available }),
    )
}

fn call(state: &ServerState, tool: &str, args: Value) -> Value {
    serde_json::from_str(&dispatch(state, tool, &args).to_json()).unwrap()
}

#[test]
fn dry_run_then_destructive_conversion() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("legacy.py");
    let original = "print \"hello\"\nfor i in xrange(3):\n    pass\n";
    fs::write(&path, original).unwrap();
    let state = state_with(true);

    // Dry run: diff only, nothing written.
    let dry = call(
        &state,
        "convert_file",
        json!({"file_path": path, "dry_run": true}),
    );
    assert_eq!(dry["status"], "success");
    assert_eq!(dry["data"]["status"], "converted_dry_run");
    assert!(dry["data"]["diff"].as_str().unwrap().contains("+print("));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    // Destructive run: backup persisted first, then atomic replace.
    let written = call(&state, "convert_file", json!({"file_path": path}));
    assert_eq!(written["data"]["status"], "converted_written");
    let backup = written["data"]["backup_file"].as_str().unwrap();
    assert!(backup.ends_with(".py2.bak"));
    assert_eq!(fs::read_to_string(backup).unwrap(), original);
    let converted = fs::read_to_string(&path).unwrap();
    assert!(converted.contains("print(\"hello\")"));
    assert!(converted.contains("range(3)"));
    assert_eq!(written["data"]["validation"]["status"], "clean");

    // Idempotence: a second pass finds nothing left to convert.
    let again = call(&state, "convert_file", json!({"file_path": path}));
    assert_eq!(again["data"]["status"], "already_compliant");
}

#[test]
fn missing_rewriter_surfaces_as_missing_dependency() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("legacy.py");
    fs::write(&path, "print \"x\"\n").unwrap();
    let state = state_with(false);

    let value = call(&state, "convert_file", json!({"file_path": path}));
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["type"], "MissingDependency");
    assert_eq!(value["metadata"]["rewriter_available"], false);
}

#[test]
fn conversion_report_tracks_fixed_and_remaining() {
    let tmp = TempDir::new().unwrap();
    let original_path = tmp.path().join("before.py");
    let converted_path = tmp.path().join("after.py");
    // Three xrange calls fixed, one has_key left behind.
    fs::write(
        &original_path,
        "a = xrange(1)\nb = xrange(2)\nc = xrange(3)\nd.has_key(9)\n",
    )
    .unwrap();
    fs::write(
        &converted_path,
        "a = range(1)\nb = range(2)\nc = range(3)\nd.has_key(9)\n",
    )
    .unwrap();

    let state = state_with(true);
    let value = call(
        &state,
        "conversion_report",
        json!({"original_path": original_path, "converted_path": converted_path}),
    );
    let summary = &value["data"]["summary"];
    assert_eq!(summary["original_issues"], 4);
    assert_eq!(summary["issues_fixed"], 3);
    assert_eq!(summary["issues_remaining"], 1);
    assert_eq!(summary["fix_rate"], "75.0%");
    assert_eq!(value["data"]["conversion_status"], "needs_review");
    assert_eq!(
        value["data"]["needs_attention"][0]["pattern"],
        "PY2-ITER-005"
    );
}

#[test]
fn validate_conversion_reports_the_state_machine_verdict() {
    let tmp = TempDir::new().unwrap();

    let clean = tmp.path().join("clean.py");
    fs::write(&clean, "total = sum(values)\n").unwrap();
    let incomplete = tmp.path().join("incomplete.py");
    fs::write(&incomplete, "for k in d.iterkeys():\n    pass\n").unwrap();
    let broken = tmp.path().join("broken.py");
    fs::write(&broken, "def f(:\n    pass\n").unwrap();

    let state = state_with(true);
    let verdict = |path: &std::path::Path| {
        call(&state, "validate_conversion", json!({"file_path": path}))["data"]
            ["validation_status"]
            .clone()
    };

    assert_eq!(verdict(&clean), "clean");
    assert_eq!(verdict(&incomplete), "incomplete");
    assert_eq!(verdict(&broken), "failed");
}

#[test]
fn inline_print_conversion_is_always_available() {
    // The built-in print rewriter must not depend on the external tool.
    let state = state_with(false);
    let value = call(
        &state,
        "convert_print_statements",
        json!({"code": "print \"inline\"\n"}),
    );
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["converted"], "print(\"inline\")\n");
    assert_eq!(value["data"]["changed"], true);
}
