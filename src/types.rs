//! Core types for the Classlens aggregator
//!
//! This module defines the data structures that flow through the aggregation
//! pipeline: raw observation records, per-student summaries, and the two
//! read-only views derived from a record set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The sole label counted as attentive
pub const ATTENTIVE_LABEL: &str = "Studying/Attentive";

/// Recognized inattentive label: sleeping
pub const SLEEPING_LABEL: &str = "Sleeping";

/// Recognized inattentive label: talking
pub const TALKING_LABEL: &str = "Talking in Class";

/// Canonical label for the phone bucket (matched by substring)
pub const PHONE_LABEL: &str = "Phone";

/// Nominal observation rate of the detector (frames per minute of wall-clock time)
pub const FRAMES_PER_MINUTE: u32 = 30;

/// Behavior category a record's free-text label resolves to.
///
/// Matching is mutually exclusive and first-match-wins: the attentive label is
/// checked first, then the exact sleeping/talking labels, then phone by
/// substring. Everything else is inattentive but uncategorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorCategory {
    Attentive,
    Sleeping,
    Talking,
    Phone,
    Other,
}

impl BehaviorCategory {
    /// Resolve a free-text activity label to its category
    pub fn of(label: &str) -> Self {
        if label == ATTENTIVE_LABEL {
            BehaviorCategory::Attentive
        } else if label == SLEEPING_LABEL {
            BehaviorCategory::Sleeping
        } else if label == TALKING_LABEL {
            BehaviorCategory::Talking
        } else if label.contains(PHONE_LABEL) {
            BehaviorCategory::Phone
        } else {
            BehaviorCategory::Other
        }
    }
}

/// One observation frame from the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Wall-clock time of the observation (UTC)
    pub timestamp: DateTime<Utc>,
    /// Student identity; not necessarily contiguous or zero-based
    pub student_id: u32,
    /// Free-text behavior label from the detector
    pub activity: String,
    /// Detection confidence, carried through but not used in aggregation
    pub confidence: f64,
}

impl ActivityRecord {
    /// Category this record's label resolves to
    pub fn category(&self) -> BehaviorCategory {
        BehaviorCategory::of(&self.activity)
    }
}

/// One entry in a student's personal timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub timestamp: DateTime<Utc>,
    pub activity: String,
    pub confidence: f64,
}

/// Aggregated view of a single student's behavior over a record set.
///
/// Summaries only exist for students with at least one record, so the
/// engagement percentage is always well-defined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSummary {
    pub student_id: u32,

    // Raw frame counts
    /// Total frames observed for this student
    pub total_frames: u32,
    /// Frames with the attentive label
    pub attentive_frames: u32,
    /// Frames with the sleeping label
    pub sleeping_frames: u32,
    /// Frames with the talking label
    pub talking_frames: u32,
    /// Frames whose label contains "Phone"
    pub phone_frames: u32,

    // Minute conversions (frames / 30, rounded)
    pub total_minutes: u32,
    pub attentive_minutes: u32,
    pub sleeping_minutes: u32,
    pub talking_minutes: u32,
    pub phone_minutes: u32,

    /// Share of frames classified attentive, rounded to a whole percent (0-100).
    ///
    /// Computed from the raw frame counts, not the rounded minute counts.
    pub engagement_pct: u32,

    /// Mean detection confidence across this student's frames
    pub avg_confidence: f64,

    /// The student's own records in input order
    pub timeline: Vec<TimelineEntry>,
}

/// Counts of the four canonical behavior labels across a record set.
///
/// Records matching none of the four categories are dropped from the
/// breakdown, so the bucket sum may be less than the record count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorBreakdown {
    pub attentive: u32,
    pub talking: u32,
    pub sleeping: u32,
    pub phone: u32,
}

impl BehaviorBreakdown {
    /// Buckets as (label, count) pairs in the canonical display order
    pub fn rows(&self) -> [(&'static str, u32); 4] {
        [
            (ATTENTIVE_LABEL, self.attentive),
            (TALKING_LABEL, self.talking),
            (SLEEPING_LABEL, self.sleeping),
            (PHONE_LABEL, self.phone),
        ]
    }

    /// Sum of all bucket counts
    pub fn total(&self) -> u32 {
        self.attentive + self.talking + self.sleeping + self.phone
    }
}

/// Share of `part` in `total` as a whole percent, rounded.
///
/// Returns 0 for an empty total; percentage paths never divide by zero.
pub fn round_pct(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// One bucket of the classroom-wide engagement time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementPoint {
    /// Start of the bucket (timestamp floored to the interval)
    pub bucket_start: DateTime<Utc>,
    /// Display key, zero-padded `HH:MM:SS` of the bucket start
    pub bucket: String,
    /// Frames observed in this bucket
    pub total_frames: u32,
    /// Attentive frames in this bucket
    pub attentive_frames: u32,
    /// Share of attentive frames, rounded to a whole percent (0-100)
    pub attentive_pct: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_resolution() {
        assert_eq!(
            BehaviorCategory::of("Studying/Attentive"),
            BehaviorCategory::Attentive
        );
        assert_eq!(BehaviorCategory::of("Sleeping"), BehaviorCategory::Sleeping);
        assert_eq!(
            BehaviorCategory::of("Talking in Class"),
            BehaviorCategory::Talking
        );
        assert_eq!(BehaviorCategory::of("Phone"), BehaviorCategory::Phone);
        assert_eq!(
            BehaviorCategory::of("Using Phone Under Desk"),
            BehaviorCategory::Phone
        );
        assert_eq!(BehaviorCategory::of("Doodling"), BehaviorCategory::Other);
    }

    #[test]
    fn test_category_is_exact_for_named_labels() {
        // Substring matching only applies to the phone bucket
        assert_eq!(BehaviorCategory::of("Sleeping Lightly"), BehaviorCategory::Other);
        assert_eq!(BehaviorCategory::of("Talking"), BehaviorCategory::Other);
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let json = r#"{
            "timestamp": "2024-01-01T09:00:00Z",
            "student_id": 3,
            "activity": "Studying/Attentive",
            "confidence": 0.93
        }"#;

        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.student_id, 3);
        assert_eq!(record.category(), BehaviorCategory::Attentive);
        assert_eq!(record.confidence, 0.93);
    }

    #[test]
    fn test_breakdown_rows_order() {
        let breakdown = BehaviorBreakdown {
            attentive: 60,
            talking: 0,
            sleeping: 30,
            phone: 0,
        };
        let rows = breakdown.rows();
        assert_eq!(rows[0], ("Studying/Attentive", 60));
        assert_eq!(rows[1], ("Talking in Class", 0));
        assert_eq!(rows[2], ("Sleeping", 30));
        assert_eq!(rows[3], ("Phone", 0));
        assert_eq!(breakdown.total(), 90);
    }
}
