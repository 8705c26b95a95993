//! Activity log loading and parsing
//!
//! The log is flat UTF-8 CSV with a mandatory header line followed by one
//! observation per line in the fixed column order
//! `timestamp,studentId,activity,confidence`.
//!
//! Loading fails soft: an unreadable source resolves to an empty record set
//! and malformed lines are skipped, both with a diagnostic on the `log`
//! facade. Callers must treat zero records as a valid steady state, not an
//! error.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::AnalyticsError;
use crate::types::ActivityRecord;

/// Result of scanning a raw log: the records that parsed plus the lines that
/// did not.
#[derive(Debug, Default)]
pub struct LogScan {
    /// Successfully parsed records, in input order
    pub records: Vec<ActivityRecord>,
    /// One entry per malformed data line (1-based line number, reason)
    pub issues: Vec<LineIssue>,
}

/// A data line that failed to parse
#[derive(Debug, Clone, serde::Serialize)]
pub struct LineIssue {
    /// 1-based line number within the source, header included
    pub line: usize,
    pub reason: String,
}

/// Parse raw log text, keeping both records and per-line failures.
///
/// The first line is treated as the header and discarded. Blank lines are
/// ignored. Data lines must have exactly four comma-separated fields.
pub fn scan_log(text: &str) -> LogScan {
    let mut scan = LogScan::default();

    for (idx, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, idx + 1) {
            Ok(record) => scan.records.push(record),
            Err(AnalyticsError::MalformedLine { line, reason }) => {
                scan.issues.push(LineIssue { line, reason });
            }
            Err(e) => {
                scan.issues.push(LineIssue {
                    line: idx + 1,
                    reason: e.to_string(),
                });
            }
        }
    }

    scan
}

/// Parse raw log text into records, skipping malformed lines with a warning.
pub fn parse_log(text: &str) -> Vec<ActivityRecord> {
    let scan = scan_log(text);
    for issue in &scan.issues {
        log::warn!("skipping activity log line {}: {}", issue.line, issue.reason);
    }
    scan.records
}

/// Read and parse an activity log from disk.
///
/// An unreadable file is logged and resolves to an empty record set; this
/// never returns an error.
pub fn load_activity_log<P: AsRef<Path>>(path: P) -> Vec<ActivityRecord> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => parse_log(&text),
        Err(e) => {
            log::warn!("failed to read activity log {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Parse one data line into a record
fn parse_line(line: &str, line_no: usize) -> Result<ActivityRecord, AnalyticsError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 4 {
        return Err(AnalyticsError::MalformedLine {
            line: line_no,
            reason: format!("expected 4 fields, found {}", fields.len()),
        });
    }

    let timestamp = parse_timestamp(fields[0].trim()).ok_or_else(|| {
        AnalyticsError::MalformedLine {
            line: line_no,
            reason: format!("unparseable timestamp {:?}", fields[0].trim()),
        }
    })?;

    let student_id: u32 = fields[1].trim().parse().map_err(|_| {
        AnalyticsError::MalformedLine {
            line: line_no,
            reason: format!("invalid student id {:?}", fields[1].trim()),
        }
    })?;

    let confidence: f64 = fields[3].trim().parse().map_err(|_| {
        AnalyticsError::MalformedLine {
            line: line_no,
            reason: format!("invalid confidence {:?}", fields[3].trim()),
        }
    })?;

    Ok(ActivityRecord {
        timestamp,
        student_id,
        activity: fields[2].trim().to_string(),
        confidence,
    })
}

/// Parse an ISO-8601-like timestamp, accepting RFC3339 and naive
/// `YYYY-MM-DD[T ]HH:MM:SS[.fff]` forms (interpreted as UTC).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BehaviorCategory;
    use pretty_assertions::assert_eq;

    const SAMPLE_LOG: &str = "\
timestamp,studentId,activity,confidence
2024-01-01T09:00:00.000Z,3,Studying/Attentive,0.93
2024-01-01T09:00:01.000Z,3, Sleeping ,0.81
2024-01-01T09:00:02.000Z,7,Talking in Class,0.77
";

    #[test]
    fn test_parse_log_discards_header_and_trims_activity() {
        let records = parse_log(SAMPLE_LOG);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].student_id, 3);
        assert_eq!(records[0].activity, "Studying/Attentive");
        // Field 3 is whitespace-trimmed
        assert_eq!(records[1].activity, "Sleeping");
        assert_eq!(records[1].category(), BehaviorCategory::Sleeping);
        assert_eq!(records[2].student_id, 7);
    }

    #[test]
    fn test_malformed_lines_are_skipped_not_fatal() {
        let text = "\
timestamp,studentId,activity,confidence
2024-01-01T09:00:00Z,3,Studying/Attentive,0.93
not-a-timestamp,4,Sleeping,0.8
2024-01-01T09:00:01Z,five,Sleeping,0.8
2024-01-01T09:00:02Z,5,Sleeping
2024-01-01T09:00:03Z,5,Sleeping,high
2024-01-01T09:00:04Z,6,Phone,0.7
";
        let scan = scan_log(text);
        assert_eq!(scan.records.len(), 2);
        assert_eq!(scan.issues.len(), 4);
        // Line numbers are 1-based including the header
        assert_eq!(scan.issues[0].line, 3);
        assert_eq!(scan.issues[2].line, 5);
    }

    #[test]
    fn test_accepts_naive_timestamps() {
        let text = "\
Timestamp,Student_ID,Activity,Confidence
2024-01-01 09:00:00,1,Studying/Attentive,0.9
";
        let records = parse_log(text);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].timestamp.format("%H:%M:%S").to_string(),
            "09:00:00"
        );
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("timestamp,studentId,activity,confidence\n").is_empty());
    }

    #[test]
    fn test_missing_file_resolves_to_empty() {
        let records = load_activity_log("/nonexistent/classroom_ACTIVITY_LOG.csv");
        assert!(records.is_empty());
    }
}
