//! Legacy-pattern and runtime-risk detection registries.
//!
//! Both registries are fixed tables built once at process start: each entry
//! pairs a compiled line-level regular expression with classification
//! metadata. The detectors are lexical and line-oriented by design; they can
//! false-positive (an intentional `u'...'` prefix in migrated code) and
//! false-negative (constructs spanning multiple lines). That trade-off is
//! inherent to the approach and is not papered over with intent guessing.

pub mod legacy;
pub mod runtime_risk;

pub use legacy::{legacy_rules, rule_by_code, PatternRule};
pub use runtime_risk::{runtime_risk_rules, RuntimeRiskRule};
