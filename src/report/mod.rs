//! Remediation planning: effort estimates, priorities, and migration guides.

pub mod estimator;
pub mod guides;

pub use estimator::{estimate_effort, prioritize, MigrationPlan, PriorityFile};
pub use guides::{migration_guide, quick_reference, GUIDE_TOPICS};
