//! Runtime-semantic risk detectors.
//!
//! A second, independent taxonomy from the legacy registry: constructs that
//! are syntactically legal in both Python 2 and 3 but carry behavior-change
//! risk after conversion. Each rule has its own severity scale.

use crate::core::RiskSeverity;
use once_cell::sync::Lazy;
use regex::Regex;

pub struct RuntimeRiskRule {
    pub issue: &'static str,
    pub pattern: Regex,
    pub reason: &'static str,
    pub severity: RiskSeverity,
}

struct RiskSpec {
    issue: &'static str,
    pattern: &'static str,
    reason: &'static str,
    severity: RiskSeverity,
}

const RISKS: &[RiskSpec] = &[
    RiskSpec {
        issue: "exec() usage",
        pattern: r"\bexec\s*\(",
        reason: "Dynamic code execution may have different behavior in Python 3",
        severity: RiskSeverity::High,
    },
    RiskSpec {
        issue: "eval() usage",
        pattern: r"\beval\s*\(",
        reason: "Dynamic evaluation may behave differently with string/bytes",
        severity: RiskSeverity::Medium,
    },
    RiskSpec {
        issue: "Division operator",
        pattern: r"(?:^|[^/\d])/(?:$|[^/\d*])",
        reason: "Division returns float in Python 3 (was int in Python 2)",
        severity: RiskSeverity::High,
    },
    RiskSpec {
        issue: "File operations",
        pattern: r"\bopen\s*\([^)]+\)",
        reason: "Default encoding changed; may need explicit encoding parameter",
        severity: RiskSeverity::Medium,
    },
    RiskSpec {
        issue: "String encoding/decoding",
        pattern: r"\.encode\s*\(|\.decode\s*\(",
        reason: "str/bytes handling changed significantly",
        severity: RiskSeverity::Medium,
    },
    RiskSpec {
        issue: "Pickle usage",
        pattern: r"\bpickle\b",
        reason: "Pickle protocol differences between Python 2/3",
        severity: RiskSeverity::Medium,
    },
    RiskSpec {
        issue: "Socket operations",
        pattern: r"\bsocket\b",
        reason: "Socket data is bytes in Python 3",
        severity: RiskSeverity::Medium,
    },
    RiskSpec {
        issue: "Subprocess calls",
        pattern: r"\bsubprocess\b",
        reason: "Output is bytes by default in Python 3",
        severity: RiskSeverity::Low,
    },
    RiskSpec {
        issue: "Standard streams",
        pattern: r"sys\.std(?:in|out|err)",
        reason: "Standard streams handle text differently in Python 3",
        severity: RiskSeverity::Low,
    },
    RiskSpec {
        issue: "Old metaclass syntax",
        pattern: r"__metaclass__",
        reason: "Use class Foo(metaclass=Meta) in Python 3",
        severity: RiskSeverity::High,
    },
    RiskSpec {
        issue: "sort() with cmp parameter",
        pattern: r"\.sort\s*\([^)]*cmp\s*=",
        reason: "cmp parameter removed; use key with functools.cmp_to_key",
        severity: RiskSeverity::High,
    },
];

static REGISTRY: Lazy<Vec<RuntimeRiskRule>> = Lazy::new(|| {
    RISKS
        .iter()
        .map(|spec| RuntimeRiskRule {
            issue: spec.issue,
            pattern: Regex::new(spec.pattern).expect("invalid built-in risk pattern"),
            reason: spec.reason,
            severity: spec.severity,
        })
        .collect()
});

/// The runtime-risk registry in stable declaration order.
pub fn runtime_risk_rules() -> &'static [RuntimeRiskRule] {
    &REGISTRY
}
