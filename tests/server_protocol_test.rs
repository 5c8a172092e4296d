// Integration tests for the stdio JSON-RPC transport and the response
// envelope contract.

use legacymap::config::{default_exclude_patterns, ScanLimits};
use legacymap::server::stdio::handle_line;
use legacymap::server::tools::{ServerState, ToolKind};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn state() -> ServerState {
    ServerState::new(ScanLimits::default(), default_exclude_patterns())
}

fn request(state: &ServerState, value: Value) -> Value {
    let reply = handle_line(state, &value.to_string()).expect("expected a reply");
    serde_json::from_str(&reply).unwrap()
}

#[test]
fn initialize_then_list_then_call() {
    let state = state();

    let init = request(
        &state,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}),
    );
    assert_eq!(init["result"]["serverInfo"]["name"], "legacymap");
    assert!(init["result"]["capabilities"]["tools"].is_object());

    let list = request(
        &state,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    );
    let tools = list["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), ToolKind::ALL.len());
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    for required in [
        "search_text",
        "find_import",
        "read_files",
        "write_files",
        "stat_files",
        "scan_compat",
        "migration_report",
        "convert_file",
        "validate_conversion",
        "conversion_report",
    ] {
        assert!(names.contains(&required), "missing tool: {}", required);
    }

    let call = request(
        &state,
        json!({
            "jsonrpc": "2.0", "id": 3, "method": "tools/call",
            "params": {"name": "analyze_code", "arguments": {"code": "d.iteritems()\n"}}
        }),
    );
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(envelope["tool"], "analyze_code");
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"]["total_issues"], 1);
    assert_eq!(envelope["metadata"]["limits"]["max_file_size_bytes"], 10 * 1024 * 1024);
}

#[test]
fn scan_compat_scenario_issues_carry_classification() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("legacy.py");
    fs::write(&path, "print \"hi\"\nd.iteritems()\n").unwrap();

    let state = state();
    let call = request(
        &state,
        json!({
            "jsonrpc": "2.0", "id": 9, "method": "tools/call",
            "params": {"name": "scan_compat", "arguments": {"files": [path]}}
        }),
    );
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    let issues = envelope["data"]["issues"].as_array().unwrap();

    let print_issue = issues.iter().find(|i| i["line"] == 1).unwrap();
    assert_eq!(print_issue["code"], "PY2-SYN-001");
    assert_eq!(print_issue["severity"], "error");
    assert_eq!(print_issue["category"], "syntax");

    let iter_issue = issues.iter().find(|i| i["line"] == 2).unwrap();
    assert_eq!(iter_issue["code"], "PY2-ITER-002");
    assert_eq!(iter_issue["severity"], "error");
    assert_eq!(iter_issue["category"], "iterators");
}

#[test]
fn search_and_import_tools_answer_over_the_wire() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("app.py"),
        "import urllib2\nresponse = urllib2.urlopen(url)\n",
    )
    .unwrap();

    let state = state();
    let search = request(
        &state,
        json!({
            "jsonrpc": "2.0", "id": 10, "method": "tools/call",
            "params": {"name": "search_text", "arguments": {"pattern": "urlopen", "path": tmp.path()}}
        }),
    );
    let text = search["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(envelope["data"]["total_matches"], 1);
    assert_eq!(envelope["data"]["matches"][0]["line"], 2);

    let imports = request(
        &state,
        json!({
            "jsonrpc": "2.0", "id": 11, "method": "tools/call",
            "params": {"name": "find_import", "arguments": {"module": "urllib2", "path": tmp.path()}}
        }),
    );
    let text = imports["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(envelope["data"]["total_imports"], 1);
    assert_eq!(envelope["data"]["files_with_imports"], 1);
}

#[test]
fn error_envelopes_still_ride_a_successful_rpc_result() {
    let state = state();
    let call = request(
        &state,
        json!({
            "jsonrpc": "2.0", "id": 12, "method": "tools/call",
            "params": {"name": "analyze_directory", "arguments": {"path": "/definitely/not/here"}}
        }),
    );
    assert_eq!(call["result"]["isError"], true);
    let text = call["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["type"], "InvalidDirectory");
}
