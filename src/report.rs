//! Class-level report
//!
//! Rolls the per-student summaries and the engagement series up into a
//! single teacher-facing report: overall engagement, students needing
//! intervention, frequent sleepers, and low-engagement periods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnalyticsError;
use crate::series::engagement_over_time;
use crate::summary::summarize;
use crate::types::{ActivityRecord, EngagementPoint, StudentSummary};
use crate::{CLASSLENS_VERSION, PRODUCER_NAME};

/// Class average below this triggers the engagement alert
const CLASS_ALERT_THRESHOLD_PCT: f64 = 60.0;

/// Buckets below this count as critical low-engagement periods
const LOW_ENGAGEMENT_BUCKET_PCT: u32 = 50;

/// Students below this need immediate intervention
const INTERVENTION_THRESHOLD_PCT: u32 = 40;

/// Students with more sleeping frames than this are flagged
const FREQUENT_SLEEPER_FRAMES: u32 = 10;

/// Observed time span of a record set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Teacher-facing rollup of a session's record set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    /// Unique id of this report instance
    pub report_id: Uuid,
    /// When the report was computed
    pub generated_at: DateTime<Utc>,
    /// Producing software name
    pub producer: String,
    /// Producing software version
    pub version: String,

    /// Total records in the session
    pub total_records: u32,
    /// Distinct students observed
    pub student_count: u32,
    /// Earliest and latest observation, None when the session is empty
    pub time_range: Option<TimeRange>,

    /// Mean of the per-student engagement percentages
    pub class_engagement_pct: f64,
    /// True when the class average falls below 60%
    pub low_engagement_alert: bool,

    /// Student ids with engagement below 40%, worst first
    pub intervention_needed: Vec<u32>,
    /// Student ids with more than 10 sleeping frames
    pub frequent_sleepers: Vec<u32>,
    /// Series buckets with attentive share below 50%
    pub low_engagement_buckets: Vec<EngagementPoint>,
}

/// Build a class report from a full record set.
///
/// `interval_secs` controls the bucket width used for the low-engagement
/// period scan. An empty record set yields an empty, alert-free report.
pub fn class_report(
    records: &[ActivityRecord],
    interval_secs: u32,
) -> Result<ClassReport, AnalyticsError> {
    let summaries = summarize(records);
    let series = engagement_over_time(records, interval_secs)?;
    Ok(report_from_views(records, &summaries, &series))
}

/// Build a class report from views the caller already computed
pub fn report_from_views(
    records: &[ActivityRecord],
    summaries: &[StudentSummary],
    series: &[EngagementPoint],
) -> ClassReport {
    let class_engagement_pct = if summaries.is_empty() {
        0.0
    } else {
        summaries.iter().map(|s| s.engagement_pct as f64).sum::<f64>()
            / summaries.len() as f64
    };

    // summaries are sorted worst-last, so reversing keeps the worst first
    let intervention_needed: Vec<u32> = summaries
        .iter()
        .rev()
        .filter(|s| s.engagement_pct < INTERVENTION_THRESHOLD_PCT)
        .map(|s| s.student_id)
        .collect();

    let frequent_sleepers: Vec<u32> = summaries
        .iter()
        .filter(|s| s.sleeping_frames > FREQUENT_SLEEPER_FRAMES)
        .map(|s| s.student_id)
        .collect();

    let low_engagement_buckets: Vec<EngagementPoint> = series
        .iter()
        .filter(|p| p.attentive_pct < LOW_ENGAGEMENT_BUCKET_PCT)
        .cloned()
        .collect();

    ClassReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        producer: PRODUCER_NAME.to_string(),
        version: CLASSLENS_VERSION.to_string(),
        total_records: records.len() as u32,
        student_count: summaries.len() as u32,
        time_range: time_range(records),
        class_engagement_pct,
        low_engagement_alert: !summaries.is_empty()
            && class_engagement_pct < CLASS_ALERT_THRESHOLD_PCT,
        intervention_needed,
        frequent_sleepers,
        low_engagement_buckets,
    }
}

fn time_range(records: &[ActivityRecord]) -> Option<TimeRange> {
    let start = records.iter().map(|r| r.timestamp).min()?;
    let end = records.iter().map(|r| r.timestamp).max()?;
    Some(TimeRange { start, end })
}
