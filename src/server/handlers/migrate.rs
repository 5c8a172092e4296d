//! Migration tool family: scanning, reporting, conversion, validation.

use crate::comparison::reconciler::reconcile;
use crate::convert::engine::{validate_source, ConversionEngine};
use crate::convert::rewriter::convert_print_statements as rewrite_prints;
use crate::convert::syntax::check_syntax;
use crate::core::{FileScanResult, SkipReason, ToolError, ToolResult};
use crate::io::reader::read_text_lossy;
use crate::report::estimator::prioritize;
use crate::report::guides::{migration_guide, GUIDE_TOPICS};
use crate::scanner::aggregator::scan_path;
use crate::scanner::line_scanner::{scan_lines, scan_source};
use crate::server::handlers::{arg_bool, arg_str, arg_str_list};
use crate::server::tools::ServerState;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn check_code_length(code: &str, state: &ServerState) -> ToolResult<()> {
    let length = code.chars().count();
    if length > state.limits.max_code_length {
        return Err(ToolError::CodeLengthLimitExceeded {
            length,
            limit: state.limits.max_code_length,
        });
    }
    Ok(())
}

fn exclude_arg(args: &Value, state: &ServerState) -> Vec<String> {
    arg_str_list(args, "exclude").unwrap_or_else(|| state.default_exclude.clone())
}

/// `analyze_code {code}` — the informal, description-oriented view of the
/// registry. Rule keys and descriptions differ from `scan_compat`, but the
/// underlying regular expressions are the same table, so both views agree
/// on what is flagged.
pub fn analyze_code(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let code = arg_str(args, "code");
    check_code_length(&code, state)?;

    let rules = crate::patterns::legacy_rules();
    let path = Path::new("<input>");
    let mut findings = Vec::new();
    let mut by_rule: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();

    for issue in scan_lines(path, code.lines(), rules) {
        let rule = crate::patterns::rule_by_code(&issue.code)
            .expect("issue produced by a rule outside the registry");
        *by_rule.entry(rule.name.to_string()).or_insert(0) += 1;
        *by_category
            .entry(issue.category.as_str().to_string())
            .or_insert(0) += 1;
        findings.push(json!({
            "line": issue.line,
            "rule": rule.name,
            "description": rule.description,
            "source": issue.source,
        }));
    }

    let total = findings.len();
    Ok(json!({
        "issues": findings,
        "total_issues": total,
        "by_category": by_category,
        "by_rule": by_rule,
        "compatible": total == 0,
        "message": if total == 0 {
            "No Python 2 patterns detected. Code appears Python 3 compatible."
        } else {
            "Python 2 patterns detected; see issues for line-level detail."
        },
    }))
}

/// `scan_compat {files}` — the structured view: classified issues with
/// stable codes, severities, categories, and suggested fixes.
pub fn scan_compat(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let files = arg_str_list(args, "files").unwrap_or_default();
    if files.is_empty() {
        return Err(ToolError::NoFilesProvided);
    }

    let mut issues = Vec::new();
    let mut errors = Vec::new();
    let mut skipped = Vec::new();
    let mut files_scanned = 0usize;
    let mut files_with_issues = 0usize;
    let mut by_severity: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();

    for path_str in &files {
        let path = Path::new(path_str);
        match read_text_lossy(path, &state.limits) {
            Ok(outcome) => {
                files_scanned += 1;
                let found = scan_source(path, &outcome.content);
                if !found.is_empty() {
                    files_with_issues += 1;
                }
                for issue in found {
                    *by_severity
                        .entry(issue.severity.as_str().to_string())
                        .or_insert(0) += 1;
                    *by_category
                        .entry(issue.category.as_str().to_string())
                        .or_insert(0) += 1;
                    issues.push(serde_json::to_value(issue).unwrap_or_default());
                }
            }
            Err(ToolError::FileSizeLimitExceeded { .. }) => {
                skipped.push(json!({"file": path_str, "reason": "size-limit"}));
            }
            Err(err) => {
                errors.push(json!({"file": path_str, "message": err.to_string()}));
            }
        }
    }

    Ok(json!({
        "issues": issues,
        "summary": {
            "total_issues": issues.len(),
            "files_scanned": files_scanned,
            "files_with_issues": files_with_issues,
            "by_severity": by_severity,
            "by_category": by_category,
        },
        "skipped": skipped,
        "errors": errors,
    }))
}

/// `analyze_directory {path, exclude?}` — per-file counts plus corpus totals.
pub fn analyze_directory(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let root = PathBuf::from(arg_str(args, "path"));
    let exclude = exclude_arg(args, state);
    let scan = scan_path(&root, &exclude, &state.limits)?;

    // Heaviest files first, mirroring remediation priority.
    let mut with_issues: Vec<&FileScanResult> =
        scan.files.iter().filter(|f| f.total > 0).collect();
    with_issues.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.path.cmp(&b.path)));
    let file_entries: Vec<Value> = with_issues
        .iter()
        .map(|f| json!({"file": relative_to(&f.path, &root), "issues": f.total}))
        .collect();

    let mut data = Map::new();
    data.insert("path".to_string(), json!(root));
    data.insert(
        "files_scanned".to_string(),
        json!(scan.summary.files_scanned),
    );
    data.insert(
        "files_with_issues".to_string(),
        json!(scan.summary.files_with_issues),
    );
    data.insert("total_issues".to_string(), json!(scan.summary.total_issues));
    data.insert("files".to_string(), json!(file_entries));
    data.insert("errors".to_string(), json!(scan.errors));
    insert_skip_fields(&mut data, &scan, state);
    Ok(Value::Object(data))
}

/// `migration_report {path, exclude?}` — the full prioritized plan.
pub fn migration_report(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let root = PathBuf::from(arg_str(args, "path"));
    let exclude = exclude_arg(args, state);
    let scan = scan_path(&root, &exclude, &state.limits)?;
    let plan = prioritize(&scan);

    let mut data = Map::new();
    data.insert("path".to_string(), json!(root));
    data.insert(
        "summary".to_string(),
        json!({
            "files_requiring_changes": plan.files_requiring_changes,
            "files_scanned": scan.summary.files_scanned,
            "total_issues": plan.total_issues,
            "estimated_effort": plan.estimated_effort,
        }),
    );
    data.insert(
        "issues_by_category".to_string(),
        json!(scan.summary.by_category),
    );
    data.insert("priority_files".to_string(), json!(plan.priority_files));
    data.insert(
        "recommended_order".to_string(),
        json!({
            "quick_wins": plan.quick_wins,
            "high_density": plan.high_density,
            "major_refactors": plan.major_refactors,
        }),
    );
    if plan.additional_files > 0 {
        data.insert("additional_files".to_string(), json!(plan.additional_files));
    }
    insert_skip_fields(&mut data, &scan, state);
    Ok(Value::Object(data))
}

/// `convert_code {code}` — run the external rewriter on inline source.
pub fn convert_code(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let code = arg_str(args, "code");
    let engine = ConversionEngine::new(state.rewriter.as_ref(), &state.limits);
    let converted = engine.convert_source(&code)?;
    let changed = converted != code;
    let diff = crate::comparison::unified_diff(&code, &converted, "original", "converted");
    Ok(json!({
        "converted": converted,
        "changed": changed,
        "lines_changed": crate::comparison::lines_changed(&code, &converted),
        "diff": diff,
    }))
}

/// `convert_print_statements {code}` — built-in print rewrite only.
pub fn convert_print_statements(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let code = arg_str(args, "code");
    check_code_length(&code, state)?;
    let converted = rewrite_prints(&code);
    Ok(json!({
        "converted": converted,
        "changed": converted != code,
    }))
}

/// `check_syntax {code}` — Python 3 parse validity.
pub fn check_syntax_tool(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let code = arg_str(args, "code");
    check_code_length(&code, state)?;
    let check = check_syntax(&code);
    Ok(json!({
        "valid": check.valid,
        "error": check.error,
    }))
}

/// `get_migration_guide {issue}`
pub fn get_migration_guide(_state: &ServerState, args: &Value) -> ToolResult<Value> {
    let issue = arg_str(args, "issue");
    match migration_guide(&issue) {
        Some(guide) => Ok(json!({"issue": issue.to_lowercase(), "guide": guide})),
        None => Err(ToolError::InvalidPattern(format!(
            "Unknown issue type '{}'. Available guides: {}",
            issue,
            GUIDE_TOPICS.join(", ")
        ))),
    }
}

/// `convert_file {file_path, backup?, dry_run?}`
pub fn convert_file(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let path = PathBuf::from(arg_str(args, "file_path"));
    let backup = arg_bool(args, "backup", true);
    let dry_run = arg_bool(args, "dry_run", false);

    let engine = ConversionEngine::new(state.rewriter.as_ref(), &state.limits);
    let outcome = engine.convert_file(&path, backup, dry_run)?;
    serde_json::to_value(outcome).map_err(|e| ToolError::Io {
        path,
        message: e.to_string(),
    })
}

/// `validate_conversion {file_path}` — syntax, remaining patterns, and
/// runtime-risk flags for one converted file.
pub fn validate_conversion(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let path = PathBuf::from(arg_str(args, "file_path"));
    let outcome = read_text_lossy(&path, &state.limits)?;
    let report = validate_source(&path, &outcome.content);

    Ok(json!({
        "file": path,
        "validation_status": report.status,
        "syntax_valid": report.syntax_valid,
        "syntax_error": report.syntax_error,
        "remaining_py2_patterns": report.remaining_patterns,
        "needs_human_review": report.runtime_risks,
        "review_count": report.review_count,
        "test_recommendations": report.test_recommendations,
    }))
}

/// `conversion_report {original_path, converted_path}` — reconcile two
/// files around a conversion event.
pub fn conversion_report(state: &ServerState, args: &Value) -> ToolResult<Value> {
    let original_path = PathBuf::from(arg_str(args, "original_path"));
    let converted_path = PathBuf::from(arg_str(args, "converted_path"));

    let original_text = read_text_lossy(&original_path, &state.limits)?.content;
    let converted_text = read_text_lossy(&converted_path, &state.limits)?.content;

    let original = FileScanResult::new(
        original_path.clone(),
        scan_source(&original_path, &original_text),
        original_text.lines().count(),
    );
    let converted = FileScanResult::new(
        converted_path.clone(),
        scan_source(&converted_path, &converted_text),
        converted_text.lines().count(),
    );

    let delta = reconcile(&original, &converted, &original_text, &converted_text);
    let syntax_valid = check_syntax(&converted_text).valid;

    let status = if !syntax_valid {
        "failed"
    } else if delta.total_remaining > 0 {
        "needs_review"
    } else if delta.total_fixed == 0 {
        "no_changes_needed"
    } else {
        "converted"
    };

    let needs_attention: Vec<Value> = delta
        .remaining_by_rule
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(rule, count)| {
            json!({
                "pattern": rule,
                "count": count,
                "action": "Manual conversion required",
            })
        })
        .collect();

    let mut next_steps = Vec::new();
    if delta.total_remaining > 0 {
        next_steps.push("Run validate_conversion for detailed review items".to_string());
    } else {
        next_steps.push("Run test suite to verify behavior".to_string());
    }
    if delta.total_fixed > 0 {
        next_steps.push("Check division operations for int vs float".to_string());
    }
    if delta
        .fixed_by_rule
        .keys()
        .any(|rule| rule.contains("LIB") || rule.contains("BUILTIN-005"))
    {
        next_steps.push("Review file I/O for encoding issues".to_string());
    }

    Ok(json!({
        "original_file": original_path,
        "converted_file": converted_path,
        "conversion_status": status,
        "syntax_valid": syntax_valid,
        "summary": {
            "original_issues": delta.total_original,
            "issues_fixed": delta.total_fixed,
            "issues_remaining": delta.total_remaining,
            "issues_introduced": delta.total_introduced,
            "fix_rate": delta.fix_rate_display(),
            "lines_added": delta.lines_added,
            "lines_removed": delta.lines_removed,
        },
        "fixed_patterns": delta.fixed_by_rule,
        "remaining_patterns": delta.remaining_by_rule,
        "introduced_patterns": delta.introduced_by_rule,
        "needs_attention": needs_attention,
        "next_steps": next_steps,
    }))
}

fn relative_to(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

fn insert_skip_fields(
    data: &mut Map<String, Value>,
    scan: &crate::core::DirectoryScan,
    state: &ServerState,
) {
    if scan.skipped.is_empty() {
        return;
    }
    data.insert("skipped".to_string(), json!(scan.skipped));
    data.insert("skipped_count".to_string(), json!(scan.skipped.len()));
    if scan
        .skipped
        .iter()
        .any(|s| s.reason == SkipReason::OperationLimit)
    {
        data.insert(
            "skipped_reason".to_string(),
            json!(format!(
                "Exceeded max_files_per_operation limit ({})",
                state.limits.max_files_per_operation
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanLimits;
    use std::fs;
    use tempfile::TempDir;

    fn state() -> ServerState {
        ServerState::for_tests(ScanLimits::default())
    }

    #[test]
    fn analyze_code_reports_informal_rule_names() {
        let data = analyze_code(
            &state(),
            &json!({"code": "for i in xrange(10):\n    pass\n"}),
        )
        .unwrap();
        assert_eq!(data["total_issues"], 1);
        assert_eq!(data["by_rule"]["xrange"], 1);
        assert_eq!(data["compatible"], false);
        assert_eq!(data["issues"][0]["rule"], "xrange");
    }

    #[test]
    fn analyze_code_and_scan_compat_agree_on_flagged_lines() {
        let tmp = TempDir::new().unwrap();
        let code = "d.iteritems()\nx = 1\nprint \"hi\"\n";
        let path = tmp.path().join("both.py");
        fs::write(&path, code).unwrap();

        let informal = analyze_code(&state(), &json!({"code": code})).unwrap();
        let structured = scan_compat(
            &state(),
            &json!({"files": [path.to_str().unwrap()]}),
        )
        .unwrap();
        assert_eq!(
            informal["total_issues"],
            structured["summary"]["total_issues"]
        );
    }

    #[test]
    fn scan_compat_requires_files() {
        let err = scan_compat(&state(), &json!({"files": []})).unwrap_err();
        assert_eq!(err.kind(), "NoFilesProvided");
    }

    #[test]
    fn scan_compat_records_missing_files_without_aborting() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("good.py");
        fs::write(&good, "d.has_key(1)\n").unwrap();

        let data = scan_compat(
            &state(),
            &json!({"files": [good.to_str().unwrap(), "/no/such.py"]}),
        )
        .unwrap();
        assert_eq!(data["summary"]["files_scanned"], 1);
        assert_eq!(data["summary"]["total_issues"], 1);
        assert_eq!(data["errors"].as_array().unwrap().len(), 1);
        assert_eq!(data["issues"][0]["code"], "PY2-ITER-005");
        assert_eq!(data["issues"][0]["severity"], "error");
    }

    #[test]
    fn migration_report_contains_plan_sections() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("one.py"), "print \"a\"\n").unwrap();
        fs::write(
            tmp.path().join("many.py"),
            "print \"a\"\nprint \"b\"\nprint \"c\"\nprint \"d\"\nprint \"e\"\nprint \"f\"\n",
        )
        .unwrap();

        let data = migration_report(
            &state(),
            &json!({"path": tmp.path()}),
        )
        .unwrap();
        assert_eq!(data["summary"]["files_requiring_changes"], 2);
        assert_eq!(data["summary"]["total_issues"], 7);
        assert_eq!(data["issues_by_category"]["syntax"], 7);
        assert_eq!(
            data["recommended_order"]["quick_wins"][0]["issues"],
            1
        );
        assert_eq!(
            data["recommended_order"]["major_refactors"][0]["issues"],
            6
        );
    }

    #[test]
    fn guide_lookup_rejects_unknown_topics() {
        let err = get_migration_guide(&state(), &json!({"issue": "walrus"})).unwrap_err();
        assert!(err.to_string().contains("Available guides"));
    }

    #[test]
    fn conversion_report_full_fix() {
        let tmp = TempDir::new().unwrap();
        let original = tmp.path().join("orig.py");
        let converted = tmp.path().join("conv.py");
        let legacy: String = (0..10).map(|_| "n = xrange(4)\n").collect();
        fs::write(&original, &legacy).unwrap();
        fs::write(&converted, legacy.replace("xrange", "range")).unwrap();

        let data = conversion_report(
            &state(),
            &json!({
                "original_path": original.to_str().unwrap(),
                "converted_path": converted.to_str().unwrap(),
            }),
        )
        .unwrap();
        assert_eq!(data["conversion_status"], "converted");
        assert_eq!(data["summary"]["original_issues"], 10);
        assert_eq!(data["summary"]["issues_fixed"], 10);
        assert_eq!(data["summary"]["fix_rate"], "100.0%");
        assert_eq!(data["fixed_patterns"]["PY2-ITER-001"], 10);
        assert_eq!(data["remaining_patterns"]["PY2-ITER-001"], 0);
    }

    #[test]
    fn conversion_report_clean_pair_is_not_applicable() {
        let tmp = TempDir::new().unwrap();
        let original = tmp.path().join("orig.py");
        let converted = tmp.path().join("conv.py");
        fs::write(&original, "x = 1\n").unwrap();
        fs::write(&converted, "x = 1\n").unwrap();

        let data = conversion_report(
            &state(),
            &json!({
                "original_path": original.to_str().unwrap(),
                "converted_path": converted.to_str().unwrap(),
            }),
        )
        .unwrap();
        assert_eq!(data["summary"]["fix_rate"], "N/A");
        assert_eq!(data["conversion_status"], "no_changes_needed");
    }

    #[test]
    fn validate_conversion_flags_runtime_risks() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("risky.py");
        fs::write(&path, "ratio = a / b\n").unwrap();

        let data = validate_conversion(
            &state(),
            &json!({"file_path": path.to_str().unwrap()}),
        )
        .unwrap();
        assert_eq!(data["validation_status"], "needs_review");
        assert_eq!(data["review_count"]["high_severity"], 1);
        assert_eq!(data["needs_human_review"][0]["issue"], "Division operator");
    }
}
