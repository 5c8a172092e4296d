//! Before/after reconciliation of scan results around a conversion event.

use crate::comparison::diff::diff_stats;
use crate::core::{ConversionDelta, FileScanResult};
use std::collections::BTreeMap;

fn counts_by_rule(result: &FileScanResult) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for issue in &result.issues {
        *counts.entry(issue.code.clone()).or_insert(0) += 1;
    }
    counts
}

/// Compare the original scan with the converted scan of the same logical
/// file, independent of how the conversion was produced.
///
/// For every rule in the original scan, `fixed = original - remaining`,
/// floored at zero, so `fixed[r] <= original[r]` always holds. Rules that
/// appear only in the converted scan are reported under `introduced` rather
/// than `remaining`, and never count against the fix rate. The fix rate is
/// undefined (`None`) when the original scan was clean.
pub fn reconcile(
    original: &FileScanResult,
    converted: &FileScanResult,
    original_text: &str,
    converted_text: &str,
) -> ConversionDelta {
    let original_counts = counts_by_rule(original);
    let converted_counts = counts_by_rule(converted);

    let mut fixed_by_rule = BTreeMap::new();
    let mut remaining_by_rule = BTreeMap::new();
    for (rule, &count) in &original_counts {
        let remaining = converted_counts.get(rule).copied().unwrap_or(0);
        let fixed = count.saturating_sub(remaining);
        if fixed > 0 {
            fixed_by_rule.insert(rule.clone(), fixed);
        }
        remaining_by_rule.insert(rule.clone(), remaining.min(count));
    }

    let mut introduced_by_rule = BTreeMap::new();
    for (rule, &count) in &converted_counts {
        let before = original_counts.get(rule).copied().unwrap_or(0);
        if count > before {
            introduced_by_rule.insert(rule.clone(), count - before);
        }
    }

    let total_original: usize = original_counts.values().sum();
    let total_fixed: usize = fixed_by_rule.values().sum();
    let total_remaining: usize = remaining_by_rule.values().sum();
    let total_introduced: usize = introduced_by_rule.values().sum();

    let fix_rate = if total_original > 0 {
        Some(total_fixed as f64 / total_original as f64)
    } else {
        None
    };

    let stats = diff_stats(original_text, converted_text);

    ConversionDelta {
        fixed_by_rule,
        remaining_by_rule,
        introduced_by_rule,
        total_original,
        total_fixed,
        total_remaining,
        total_introduced,
        fix_rate,
        lines_added: stats.lines_added,
        lines_removed: stats.lines_removed,
    }
}
