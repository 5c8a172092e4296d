//! Line-level diff statistics between original and converted text.
//!
//! Diff counts are an orthogonal signal to the pattern-based fix rate and
//! are reported alongside it, never folded into it.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub lines_added: usize,
    pub lines_removed: usize,
}

/// Count added and removed lines between two texts.
pub fn diff_stats(original: &str, converted: &str) -> DiffStats {
    let diff = TextDiff::from_lines(original, converted);
    let mut stats = DiffStats::default();
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => stats.lines_added += 1,
            ChangeTag::Delete => stats.lines_removed += 1,
            ChangeTag::Equal => {}
        }
    }
    stats
}

/// Render a unified diff with the given file labels.
pub fn unified_diff(original: &str, converted: &str, from_label: &str, to_label: &str) -> String {
    TextDiff::from_lines(original, converted)
        .unified_diff()
        .header(from_label, to_label)
        .to_string()
}

/// Count of lines that differ position-for-position, used for the
/// `lines_changed` figure in conversion summaries.
pub fn lines_changed(original: &str, converted: &str) -> usize {
    original
        .lines()
        .zip(converted.lines())
        .filter(|(a, b)| a != b)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_and_removed_lines_are_counted() {
        let original = "a\nb\nc\n";
        let converted = "a\nB\nc\nd\n";
        let stats = diff_stats(original, converted);
        assert_eq!(stats.lines_removed, 1); // b
        assert_eq!(stats.lines_added, 2); // B, d
    }

    #[test]
    fn identical_text_produces_empty_stats() {
        let stats = diff_stats("same\n", "same\n");
        assert_eq!(stats, DiffStats::default());
    }

    #[test]
    fn unified_diff_carries_labels() {
        let diff = unified_diff("x\n", "y\n", "orig.py", "conv.py");
        assert!(diff.contains("--- orig.py"));
        assert!(diff.contains("+++ conv.py"));
        assert!(diff.contains("-x"));
        assert!(diff.contains("+y"));
    }
}
