//! Classroom-wide engagement time series
//!
//! Buckets a record set into fixed-width time intervals and computes the
//! attentive share per bucket. The reducer is parameterized over the bucket
//! width and agnostic to the caller's choice (1s, 10s, 60s and 300s are the
//! typical chart granularities).
//!
//! Buckets are ordered by actual bucket start time, not by display key, so
//! the series stays chronological across hour and midnight boundaries and
//! for out-of-order input.

use std::collections::BTreeMap;

use chrono::DateTime;

use crate::error::AnalyticsError;
use crate::types::{round_pct, ActivityRecord, BehaviorCategory, EngagementPoint};

/// Reduce a record set to an engagement-over-time series.
///
/// Each record lands in the bucket whose start is its timestamp floored to a
/// multiple of `interval_secs`; per bucket the attentive percentage is
/// `round(attentive / total * 100)`. Empty input yields an empty series.
pub fn engagement_over_time(
    records: &[ActivityRecord],
    interval_secs: u32,
) -> Result<Vec<EngagementPoint>, AnalyticsError> {
    if interval_secs == 0 {
        return Err(AnalyticsError::InvalidInterval(interval_secs));
    }

    // Keyed by bucket start (unix seconds); BTreeMap keeps buckets chronological
    let mut buckets: BTreeMap<i64, (u32, u32)> = BTreeMap::new();

    for record in records {
        let ts = record.timestamp.timestamp();
        let start = ts - ts.rem_euclid(i64::from(interval_secs));
        let entry = buckets.entry(start).or_insert((0, 0));
        entry.0 += 1;
        if record.category() == BehaviorCategory::Attentive {
            entry.1 += 1;
        }
    }

    let series = buckets
        .into_iter()
        .filter_map(|(start, (total, attentive))| {
            let bucket_start = DateTime::from_timestamp(start, 0)?;
            Some(EngagementPoint {
                bucket_start,
                bucket: bucket_start.format("%H:%M:%S").to_string(),
                total_frames: total,
                attentive_frames: attentive,
                attentive_pct: round_pct(attentive, total),
            })
        })
        .collect();

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record_at(h: u32, m: u32, s: u32, activity: &str) -> ActivityRecord {
        ActivityRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap(),
            student_id: 7,
            activity: activity.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_single_minute_bucket() {
        // 60 attentive + 30 sleeping frames inside one minute
        let mut records = Vec::new();
        for _ in 0..60 {
            records.push(record_at(9, 0, 15, "Studying/Attentive"));
        }
        for _ in 0..30 {
            records.push(record_at(9, 0, 45, "Sleeping"));
        }

        let series = engagement_over_time(&records, 60).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].bucket, "09:00:00");
        assert_eq!(series[0].total_frames, 90);
        assert_eq!(series[0].attentive_frames, 60);
        assert_eq!(series[0].attentive_pct, 67);
    }

    #[test]
    fn test_ten_second_buckets_floor_within_minute() {
        let records = vec![
            record_at(9, 0, 3, "Studying/Attentive"),
            record_at(9, 0, 9, "Sleeping"),
            record_at(9, 0, 14, "Studying/Attentive"),
        ];

        let series = engagement_over_time(&records, 10).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bucket, "09:00:00");
        assert_eq!(series[0].attentive_pct, 50);
        assert_eq!(series[1].bucket, "09:00:10");
        assert_eq!(series[1].attentive_pct, 100);
    }

    #[test]
    fn test_five_minute_buckets_span_minutes() {
        let records = vec![
            record_at(9, 1, 0, "Studying/Attentive"),
            record_at(9, 4, 59, "Sleeping"),
            record_at(9, 5, 0, "Studying/Attentive"),
        ];

        let series = engagement_over_time(&records, 300).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bucket, "09:00:00");
        assert_eq!(series[0].total_frames, 2);
        assert_eq!(series[1].bucket, "09:05:00");
        assert_eq!(series[1].total_frames, 1);
    }

    #[test]
    fn test_chronological_across_midnight() {
        // A lexicographic key sort would put 00:00:30 before 23:59:30
        let mut records = vec![record_at(23, 59, 30, "Studying/Attentive")];
        records.push(ActivityRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 30).unwrap(),
            student_id: 7,
            activity: "Sleeping".to_string(),
            confidence: 0.9,
        });

        let series = engagement_over_time(&records, 60).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bucket, "23:59:00");
        assert_eq!(series[1].bucket, "00:00:00");
        assert!(series[0].bucket_start < series[1].bucket_start);
    }

    #[test]
    fn test_out_of_order_input_still_sorted() {
        let records = vec![
            record_at(9, 5, 0, "Sleeping"),
            record_at(9, 1, 0, "Studying/Attentive"),
        ];

        let series = engagement_over_time(&records, 60).unwrap();
        assert_eq!(series[0].bucket, "09:01:00");
        assert_eq!(series[1].bucket, "09:05:00");
    }

    #[test]
    fn test_empty_input() {
        let series = engagement_over_time(&[], 60).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let result = engagement_over_time(&[], 0);
        assert!(matches!(result, Err(AnalyticsError::InvalidInterval(0))));
    }
}
