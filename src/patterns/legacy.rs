//! The fixed table of Python 2 construct detectors.
//!
//! One registry backs both consumer views: the informal description view
//! used for free-text analysis and the structured code/category/severity
//! view used for machine-consumable scanning. A line flagged by one view is
//! flagged by the other because the regular expression is shared.

use crate::core::{Category, Severity};
use once_cell::sync::Lazy;
use regex::Regex;

/// One legacy-construct detector. Immutable; the registry is built once at
/// process start and iterated in declaration order, which keeps overlapping
/// matches deterministic.
pub struct PatternRule {
    /// Stable machine-readable code, e.g. `PY2-ITER-001`
    pub code: &'static str,
    /// Short informal name used as the rule key in free-text summaries
    pub name: &'static str,
    pub pattern: Regex,
    pub message: &'static str,
    pub suggested_fix: &'static str,
    pub severity: Severity,
    pub category: Category,
    /// One-line description for the informal analysis view
    pub description: &'static str,
}

struct RuleSpec {
    code: &'static str,
    name: &'static str,
    pattern: &'static str,
    message: &'static str,
    suggested_fix: &'static str,
    severity: Severity,
    category: Category,
    description: &'static str,
}

// The regex crate has no lookaround; where the construct must not follow a
// word character or a dot, patterns match a leading non-word guard
// (`(?:^|[^\w.])`) instead.
const RULES: &[RuleSpec] = &[
    // Iterators and dict methods
    RuleSpec {
        code: "PY2-ITER-001",
        name: "xrange",
        pattern: r"\bxrange\s*\(",
        message: "xrange() is not available in Python 3",
        suggested_fix: "Use range() instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: "xrange() (use range() in Python 3)",
    },
    RuleSpec {
        code: "PY2-ITER-002",
        name: "iteritems",
        pattern: r"\.iteritems\s*\(",
        message: "dict.iteritems() is not available in Python 3",
        suggested_fix: "Use dict.items() instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: ".iteritems() (use .items() in Python 3)",
    },
    RuleSpec {
        code: "PY2-ITER-003",
        name: "itervalues",
        pattern: r"\.itervalues\s*\(",
        message: "dict.itervalues() is not available in Python 3",
        suggested_fix: "Use dict.values() instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: ".itervalues() (use .values() in Python 3)",
    },
    RuleSpec {
        code: "PY2-ITER-004",
        name: "iterkeys",
        pattern: r"\.iterkeys\s*\(",
        message: "dict.iterkeys() is not available in Python 3",
        suggested_fix: "Use dict.keys() instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: ".iterkeys() (use .keys() in Python 3)",
    },
    RuleSpec {
        code: "PY2-ITER-005",
        name: "has_key",
        pattern: r"\.has_key\s*\(",
        message: "dict.has_key() is not available in Python 3",
        suggested_fix: "Use 'key in dict' instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: ".has_key() (use 'in' operator)",
    },
    RuleSpec {
        code: "PY2-ITER-006",
        name: "viewitems",
        pattern: r"\.viewitems\s*\(",
        message: "dict.viewitems() is not available in Python 3",
        suggested_fix: "Use dict.items() instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: ".viewitems() (use .items() in Python 3)",
    },
    RuleSpec {
        code: "PY2-ITER-007",
        name: "viewkeys",
        pattern: r"\.viewkeys\s*\(",
        message: "dict.viewkeys() is not available in Python 3",
        suggested_fix: "Use dict.keys() instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: ".viewkeys() (use .keys() in Python 3)",
    },
    RuleSpec {
        code: "PY2-ITER-008",
        name: "viewvalues",
        pattern: r"\.viewvalues\s*\(",
        message: "dict.viewvalues() is not available in Python 3",
        suggested_fix: "Use dict.values() instead",
        severity: Severity::Error,
        category: Category::Iterators,
        description: ".viewvalues() (use .values() in Python 3)",
    },
    // Obsolete text and numeric types
    RuleSpec {
        code: "PY2-TYPE-001",
        name: "unicode_type",
        pattern: r"\bunicode\s*\(",
        message: "unicode() is not available in Python 3",
        suggested_fix: "Use str() instead",
        severity: Severity::Error,
        category: Category::TextTypes,
        description: "unicode() (use str in Python 3)",
    },
    RuleSpec {
        code: "PY2-TYPE-002",
        name: "long_suffix",
        pattern: r"(?:\d+|0[xX][0-9a-fA-F]+)[lL]\b",
        message: "Long integer suffix L is not valid in Python 3",
        suggested_fix: "Remove the L suffix",
        severity: Severity::Error,
        category: Category::TextTypes,
        description: "Long integer suffix L (not needed in Python 3)",
    },
    RuleSpec {
        code: "PY2-TYPE-003",
        name: "basestring",
        pattern: r"\bbasestring\b",
        message: "basestring is not available in Python 3",
        suggested_fix: "Use str instead",
        severity: Severity::Error,
        category: Category::TextTypes,
        description: "basestring (use str in Python 3)",
    },
    RuleSpec {
        code: "PY2-TYPE-004",
        name: "unicode_literal",
        pattern: r#"\bu["']"#,
        message: "Unicode literal prefix u'' is unnecessary in Python 3",
        suggested_fix: "Remove the u prefix (all strings are unicode in Python 3)",
        severity: Severity::Info,
        category: Category::TextTypes,
        description: "Unicode literal u'' (not needed in Python 3)",
    },
    // Legacy operators
    RuleSpec {
        code: "PY2-OP-001",
        name: "old_ne",
        pattern: r"<>",
        message: "<> comparison operator is not valid in Python 3",
        suggested_fix: "Use != instead",
        severity: Severity::Error,
        category: Category::Operators,
        description: "<> operator (use !=)",
    },
    RuleSpec {
        code: "PY2-OP-002",
        name: "backticks",
        pattern: r"`[^`]+`",
        message: "Backticks for repr are not valid in Python 3",
        suggested_fix: "Use repr() instead",
        severity: Severity::Error,
        category: Category::Operators,
        description: "Backticks `x` for repr (use repr(x))",
    },
    // Outdated statement syntax
    RuleSpec {
        code: "PY2-SYN-001",
        name: "print_statement",
        pattern: r"^[^#]*\bprint\s+[^(=\s]",
        message: "Print statement syntax is not valid in Python 3",
        suggested_fix: "Use print() function instead",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "Print statement (use print() function)",
    },
    RuleSpec {
        code: "PY2-SYN-002",
        name: "except_comma",
        pattern: r"except\s+[\w.]+\s*,\s*\w+",
        message: "Old except syntax with comma is not valid in Python 3",
        suggested_fix: "Use 'except Exception as e:' instead",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "Old except syntax (use 'as' keyword)",
    },
    RuleSpec {
        code: "PY2-SYN-003",
        name: "old_raise",
        pattern: r"raise\s+[\w.]+\s*,",
        message: "Old raise syntax is not valid in Python 3",
        suggested_fix: "Use raise Exception('message') instead",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "Old raise syntax (use raise E('msg'))",
    },
    RuleSpec {
        code: "PY2-SYN-004",
        name: "exec_statement",
        pattern: r"^[^#]*\bexec\s+[^(]",
        message: "exec statement syntax is not valid in Python 3",
        suggested_fix: "Use exec() function instead",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "exec statement (use exec() function)",
    },
    RuleSpec {
        code: "PY2-SYN-005",
        name: "old_octal",
        pattern: r"(?:^|[^\w.])0\d{2,}(?:$|[^\w.])",
        message: "Old octal literal is not valid in Python 3",
        suggested_fix: "Use the 0o prefix (0o755 instead of 0755)",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "Old octal literal 0755 (use 0o755)",
    },
    // Relocated stdlib modules
    RuleSpec {
        code: "PY2-LIB-001",
        name: "ConfigParser",
        pattern: r"(?:^|[^\w.])ConfigParser\b",
        message: "ConfigParser module was renamed in Python 3",
        suggested_fix: "Use 'import configparser' instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "ConfigParser (use configparser)",
    },
    RuleSpec {
        code: "PY2-LIB-002",
        name: "StringIO",
        pattern: r"(?:^|[^\w.])StringIO\b",
        message: "StringIO module was moved in Python 3",
        suggested_fix: "Use 'from io import StringIO' instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "StringIO (use io.StringIO)",
    },
    RuleSpec {
        code: "PY2-LIB-003",
        name: "cStringIO",
        pattern: r"\bcStringIO\b",
        message: "cStringIO is not available in Python 3",
        suggested_fix: "Use 'from io import StringIO' instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "cStringIO (use io.StringIO)",
    },
    RuleSpec {
        code: "PY2-LIB-004",
        name: "cPickle",
        pattern: r"\bcPickle\b",
        message: "cPickle is not available in Python 3",
        suggested_fix: "Use 'import pickle' instead (it's fast in Python 3)",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "cPickle (use pickle)",
    },
    RuleSpec {
        code: "PY2-LIB-005",
        name: "Queue",
        pattern: r"(?:^|[^\w.])Queue\b",
        message: "Queue module was renamed in Python 3",
        suggested_fix: "Use 'import queue' instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "Queue (use queue)",
    },
    RuleSpec {
        code: "PY2-LIB-006",
        name: "urllib2",
        pattern: r"\burllib2\b",
        message: "urllib2 is not available in Python 3",
        suggested_fix: "Use urllib.request and urllib.error instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "urllib2 (use urllib.request)",
    },
    RuleSpec {
        code: "PY2-LIB-007",
        name: "urlparse",
        pattern: r"\burlparse\b",
        message: "urlparse module was moved in Python 3",
        suggested_fix: "Use urllib.parse instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "urlparse (use urllib.parse)",
    },
    RuleSpec {
        code: "PY2-LIB-008",
        name: "httplib",
        pattern: r"\bhttplib\b",
        message: "httplib was renamed in Python 3",
        suggested_fix: "Use http.client instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "httplib (use http.client)",
    },
    RuleSpec {
        code: "PY2-LIB-009",
        name: "HTMLParser",
        pattern: r"\bHTMLParser\b",
        message: "HTMLParser module was moved in Python 3",
        suggested_fix: "Use html.parser instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "HTMLParser (use html.parser)",
    },
    RuleSpec {
        code: "PY2-LIB-010",
        name: "Tkinter",
        pattern: r"(?:^|[^\w.])Tkinter\b",
        message: "Tkinter module was renamed in Python 3",
        suggested_fix: "Use 'import tkinter' instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "Tkinter (use tkinter)",
    },
    RuleSpec {
        code: "PY2-LIB-011",
        name: "cookielib",
        pattern: r"\bcookielib\b",
        message: "cookielib was moved in Python 3",
        suggested_fix: "Use http.cookiejar instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "cookielib (use http.cookiejar)",
    },
    RuleSpec {
        code: "PY2-LIB-012",
        name: "thread_module",
        pattern: r"(?:^|[^\w.])thread\b",
        message: "The thread module was renamed in Python 3",
        suggested_fix: "Use _thread or, preferably, threading instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "thread (use _thread or threading)",
    },
    RuleSpec {
        code: "PY2-LIB-013",
        name: "commands_module",
        pattern: r"\bcommands\b",
        message: "The commands module was removed in Python 3",
        suggested_fix: "Use subprocess instead",
        severity: Severity::Error,
        category: Category::StdlibMove,
        description: "commands (use subprocess)",
    },
    // Removed or relocated builtins
    RuleSpec {
        code: "PY2-BUILTIN-001",
        name: "raw_input",
        pattern: r"\braw_input\s*\(",
        message: "raw_input() is not available in Python 3",
        suggested_fix: "Use input() instead",
        severity: Severity::Error,
        category: Category::Builtins,
        description: "raw_input() (use input() in Python 3)",
    },
    RuleSpec {
        code: "PY2-BUILTIN-002",
        name: "execfile",
        pattern: r"\bexecfile\s*\(",
        message: "execfile() is not available in Python 3",
        suggested_fix: "Use exec(open(file).read()) instead",
        severity: Severity::Error,
        category: Category::Builtins,
        description: "execfile() (use exec(open().read()))",
    },
    RuleSpec {
        code: "PY2-BUILTIN-003",
        name: "reduce",
        pattern: r"(?:^|[^\w.])reduce\s*\(",
        message: "reduce() was moved to functools in Python 3",
        suggested_fix: "Use 'from functools import reduce'",
        severity: Severity::Warning,
        category: Category::Builtins,
        description: "reduce() (import from functools)",
    },
    RuleSpec {
        code: "PY2-BUILTIN-004",
        name: "apply",
        pattern: r"(?:^|[^\w.])apply\s*\(",
        message: "apply() is not available in Python 3",
        suggested_fix: "Use func(*args, **kwargs) instead",
        severity: Severity::Error,
        category: Category::Builtins,
        description: "apply() (use func(*args, **kwargs))",
    },
    RuleSpec {
        code: "PY2-BUILTIN-005",
        name: "file_builtin",
        pattern: r"(?:^|[^\w.])file\s*\(",
        message: "file() builtin is not available in Python 3",
        suggested_fix: "Use open() instead",
        severity: Severity::Error,
        category: Category::Builtins,
        description: "file() builtin (use open())",
    },
    RuleSpec {
        code: "PY2-BUILTIN-006",
        name: "cmp_func",
        pattern: r"\bcmp\s*\(",
        message: "cmp() is not available in Python 3",
        suggested_fix: "Use (a > b) - (a < b) or functools.cmp_to_key",
        severity: Severity::Error,
        category: Category::Builtins,
        description: "cmp() (removed in Python 3)",
    },
    RuleSpec {
        code: "PY2-BUILTIN-007",
        name: "coerce",
        pattern: r"\bcoerce\s*\(",
        message: "coerce() is not available in Python 3",
        suggested_fix: "Remove the call; numeric coercion is implicit",
        severity: Severity::Error,
        category: Category::Builtins,
        description: "coerce() (removed in Python 3)",
    },
    RuleSpec {
        code: "PY2-BUILTIN-008",
        name: "intern",
        pattern: r"(?:^|[^\w.])intern\s*\(",
        message: "intern() was moved in Python 3",
        suggested_fix: "Use sys.intern() instead",
        severity: Severity::Warning,
        category: Category::Builtins,
        description: "intern() (use sys.intern())",
    },
    RuleSpec {
        code: "PY2-BUILTIN-009",
        name: "buffer_builtin",
        pattern: r"(?:^|[^\w.])buffer\s*\(",
        message: "buffer() is not available in Python 3",
        suggested_fix: "Use memoryview() instead",
        severity: Severity::Error,
        category: Category::Builtins,
        description: "buffer() (use memoryview())",
    },
];

static REGISTRY: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|spec| PatternRule {
            code: spec.code,
            name: spec.name,
            pattern: Regex::new(spec.pattern).expect("invalid built-in legacy pattern"),
            message: spec.message,
            suggested_fix: spec.suggested_fix,
            severity: spec.severity,
            category: spec.category,
            description: spec.description,
        })
        .collect()
});

/// The full registry in stable declaration order.
pub fn legacy_rules() -> &'static [PatternRule] {
    &REGISTRY
}

/// Look up a single rule by its stable code.
pub fn rule_by_code(code: &str) -> Option<&'static PatternRule> {
    REGISTRY.iter().find(|rule| rule.code == code)
}
