//! Legacy-pattern scanning, from single lines up to whole directory trees.

pub mod aggregator;
pub mod line_scanner;

pub use aggregator::scan_path;
pub use line_scanner::{scan_lines, scan_runtime_risks, scan_source};
