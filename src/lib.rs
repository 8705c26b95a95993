//! Classlens - Classroom activity-log aggregation engine
//!
//! Classlens turns a flat per-frame behavior observation log into the derived
//! views a classroom dashboard renders: per-student engagement summaries, a
//! behavior-distribution breakdown, an engagement-over-time series, and a
//! class-level report.
//!
//! Control flow is one-directional and stateless: raw text → parsed records →
//! derived views. Every reducer is a pure function of an already-materialized
//! record slice; none of them feed back into each other or into the loader.

pub mod breakdown;
pub mod classifier;
pub mod error;
pub mod loader;
pub mod report;
pub mod series;
pub mod summary;
pub mod types;

pub use breakdown::breakdown;
pub use classifier::{BehaviorClassifier, Classification, ObservationFrame, SimulatedClassifier};
pub use error::AnalyticsError;
pub use loader::{load_activity_log, parse_log, scan_log};
pub use report::{class_report, ClassReport};
pub use series::engagement_over_time;
pub use summary::summarize;
pub use types::{ActivityRecord, BehaviorBreakdown, BehaviorCategory, EngagementPoint, StudentSummary};

/// Classlens version embedded in reports
pub const CLASSLENS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "classlens";
