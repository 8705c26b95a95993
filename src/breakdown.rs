//! Behavior distribution breakdown
//!
//! A read-only view counting how often each of the four canonical labels
//! appears across a record set.

use crate::types::{ActivityRecord, BehaviorBreakdown, BehaviorCategory};

/// Count records per canonical behavior label.
///
/// Each record increments at most one bucket; records whose label resolves
/// to no recognized category are dropped, so the bucket sum may be less than
/// the record count.
pub fn breakdown(records: &[ActivityRecord]) -> BehaviorBreakdown {
    let mut counts = BehaviorBreakdown::default();

    for record in records {
        match record.category() {
            BehaviorCategory::Attentive => counts.attentive += 1,
            BehaviorCategory::Talking => counts.talking += 1,
            BehaviorCategory::Sleeping => counts.sleeping += 1,
            BehaviorCategory::Phone => counts.phone += 1,
            BehaviorCategory::Other => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(student_id: u32, activity: &str) -> ActivityRecord {
        ActivityRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            student_id,
            activity: activity.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_breakdown_counts() {
        let records = vec![
            record(1, "Studying/Attentive"),
            record(2, "Studying/Attentive"),
            record(3, "Sleeping"),
            record(4, "Talking in Class"),
            record(5, "Phone"),
            record(6, "Checking Phone"),
        ];

        let counts = breakdown(&records);
        assert_eq!(counts.attentive, 2);
        assert_eq!(counts.sleeping, 1);
        assert_eq!(counts.talking, 1);
        assert_eq!(counts.phone, 2);
        assert_eq!(counts.total(), records.len() as u32);
    }

    #[test]
    fn test_unrecognized_labels_are_dropped() {
        let records = vec![
            record(1, "Studying/Attentive"),
            record(2, "Staring Out Window"),
            record(3, "Doodling"),
        ];

        let counts = breakdown(&records);
        // Bucket sum stays below the record count when labels fall outside
        // the four recognized categories
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_empty_input_yields_zero_buckets() {
        let counts = breakdown(&[]);
        assert_eq!(counts, BehaviorBreakdown::default());
        for (_, count) in counts.rows() {
            assert_eq!(count, 0);
        }
    }
}
