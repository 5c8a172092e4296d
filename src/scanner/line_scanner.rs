//! Per-line application of the pattern registries to in-memory text.
//!
//! The scanner never touches the filesystem; decoding and I/O errors are the
//! aggregator's responsibility, which keeps everything here testable on
//! plain strings and deterministic for identical input.

use crate::core::{LineIssue, RuntimeRiskFlag};
use crate::patterns::{legacy_rules, runtime_risk_rules, PatternRule};
use std::path::Path;

/// Lines 1 and 2 are exempt when they look like an interpreter directive or
/// an encoding declaration, so file headers never produce false positives.
fn is_header_line(line_number: usize, line: &str) -> bool {
    line_number <= 2 && (line.starts_with("#!") || line.contains("coding"))
}

/// Scan a sequence of lines (1-indexed for reporting) against a rule set.
///
/// Rules are not mutually exclusive: each rule is tested independently, so
/// one line can yield several issues. Rules are applied in registry order,
/// which keeps output ordering stable when rules overlap.
pub fn scan_lines<'a, I>(path: &Path, lines: I, rules: &[PatternRule]) -> Vec<LineIssue>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut issues = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line_number = idx + 1;
        if is_header_line(line_number, line) {
            continue;
        }
        for rule in rules {
            if rule.pattern.is_match(line) {
                issues.push(LineIssue {
                    file: path.to_path_buf(),
                    line: line_number,
                    code: rule.code.to_string(),
                    message: rule.message.to_string(),
                    suggested_fix: rule.suggested_fix.to_string(),
                    severity: rule.severity,
                    category: rule.category,
                    source: line.trim().to_string(),
                });
            }
        }
    }
    issues
}

/// Scan full source text against the legacy registry.
pub fn scan_source(path: &Path, source: &str) -> Vec<LineIssue> {
    scan_lines(path, source.lines(), legacy_rules())
}

/// Scan full source text against the runtime-risk registry.
///
/// Header lines are not exempt here: a risk construct is a review signal
/// wherever it appears.
pub fn scan_runtime_risks(source: &str) -> Vec<RuntimeRiskFlag> {
    let mut flags = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        for rule in runtime_risk_rules() {
            if rule.pattern.is_match(line) {
                flags.push(RuntimeRiskFlag {
                    line: idx + 1,
                    issue: rule.issue.to_string(),
                    reason: rule.reason.to_string(),
                    severity: rule.severity,
                    source: line.trim().to_string(),
                });
            }
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, RiskSeverity, Severity};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn scan(source: &str) -> Vec<LineIssue> {
        scan_source(&PathBuf::from("test.py"), source)
    }

    #[test]
    fn print_statement_is_reported_with_code_and_severity() {
        let issues = scan(r#"print "hi""#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "PY2-SYN-001");
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].category, Category::Syntax);
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[0].source, r#"print "hi""#);
    }

    #[test]
    fn iteritems_is_reported() {
        let issues = scan("for k, v in d.iteritems():");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "PY2-ITER-002");
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn shebang_and_coding_header_lines_are_exempt() {
        let source = indoc! {r#"
            #!/usr/bin/python
            # -*- coding: utf-8 -*-
            x = 1
        "#};
        assert!(scan(source).is_empty());
    }

    #[test]
    fn header_exemption_only_covers_first_two_lines() {
        let source = indoc! {r#"
            x = 1
            y = 2
            #!/usr/bin/env python
            print "late shebang does not shield this file"
        "#};
        let issues = scan(source);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 4);
    }

    #[test]
    fn one_line_can_yield_multiple_issues() {
        let issues = scan("d.has_key(xrange(10))");
        let codes: Vec<&str> = issues.iter().map(|i| i.code.as_str()).collect();
        assert!(codes.contains(&"PY2-ITER-001"));
        assert!(codes.contains(&"PY2-ITER-005"));
    }

    #[test]
    fn scanning_twice_is_deterministic() {
        let source = indoc! {r#"
            print "a"
            for k in d.iterkeys():
                n = 0755
        "#};
        assert_eq!(scan(source), scan(source));
    }

    #[test]
    fn runtime_risks_carry_their_own_severity() {
        let flags = scan_runtime_risks("result = total / count");
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].issue, "Division operator");
        assert_eq!(flags[0].severity, RiskSeverity::High);
    }

    #[test]
    fn runtime_risks_are_independent_of_legacy_patterns() {
        // Legal in both dialects: no legacy issue, but a review flag.
        let source = "data = pickle.loads(blob)";
        assert!(scan(source).is_empty());
        assert!(!scan_runtime_risks(source).is_empty());
    }
}
