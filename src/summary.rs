//! Per-student summarization
//!
//! Groups a record set by student identity and derives per-student totals,
//! per-behavior minute counts, and an engagement percentage. Summaries are
//! constructed fresh from the full record set on every call; there is no
//! incremental update across calls.

use std::collections::HashMap;

use crate::types::{
    round_pct, ActivityRecord, BehaviorCategory, StudentSummary, TimelineEntry,
    FRAMES_PER_MINUTE,
};

/// Per-student running counts while partitioning the record set
#[derive(Debug, Default)]
struct StudentAccumulator {
    total: u32,
    attentive: u32,
    sleeping: u32,
    talking: u32,
    phone: u32,
    confidence_sum: f64,
    timeline: Vec<TimelineEntry>,
}

impl StudentAccumulator {
    fn observe(&mut self, record: &ActivityRecord) {
        self.total += 1;
        self.confidence_sum += record.confidence;

        // Mutually exclusive, first match wins
        match record.category() {
            BehaviorCategory::Attentive => self.attentive += 1,
            BehaviorCategory::Sleeping => self.sleeping += 1,
            BehaviorCategory::Talking => self.talking += 1,
            BehaviorCategory::Phone => self.phone += 1,
            BehaviorCategory::Other => {}
        }

        self.timeline.push(TimelineEntry {
            timestamp: record.timestamp,
            activity: record.activity.clone(),
            confidence: record.confidence,
        });
    }
}

/// Summarize a record set into one entry per distinct student, sorted
/// descending by engagement percentage.
///
/// Ties keep the relative first-appearance order of the students in the
/// input (the sort is stable). An empty record set yields an empty vec.
pub fn summarize(records: &[ActivityRecord]) -> Vec<StudentSummary> {
    let mut order: Vec<u32> = Vec::new();
    let mut groups: HashMap<u32, StudentAccumulator> = HashMap::new();

    for record in records {
        let acc = groups.entry(record.student_id).or_insert_with(|| {
            order.push(record.student_id);
            StudentAccumulator::default()
        });
        acc.observe(record);
    }

    let mut summaries: Vec<StudentSummary> = order
        .into_iter()
        .map(|student_id| {
            let acc = groups
                .remove(&student_id)
                .unwrap_or_default();
            build_summary(student_id, acc)
        })
        .collect();

    summaries.sort_by(|a, b| b.engagement_pct.cmp(&a.engagement_pct));
    summaries
}

fn build_summary(student_id: u32, acc: StudentAccumulator) -> StudentSummary {
    // Engagement uses the raw frame counts so minute rounding cannot compound
    let engagement_pct = round_pct(acc.attentive, acc.total);
    let avg_confidence = if acc.total > 0 {
        acc.confidence_sum / acc.total as f64
    } else {
        0.0
    };

    StudentSummary {
        student_id,
        total_frames: acc.total,
        attentive_frames: acc.attentive,
        sleeping_frames: acc.sleeping,
        talking_frames: acc.talking,
        phone_frames: acc.phone,
        total_minutes: frames_to_minutes(acc.total),
        attentive_minutes: frames_to_minutes(acc.attentive),
        sleeping_minutes: frames_to_minutes(acc.sleeping),
        talking_minutes: frames_to_minutes(acc.talking),
        phone_minutes: frames_to_minutes(acc.phone),
        engagement_pct,
        avg_confidence,
        timeline: acc.timeline,
    }
}

/// Convert a frame count to minutes via the fixed observation rate.
///
/// The divisor models ~30 frames per minute of wall-clock time; it is a
/// constant of the detector, not derived from real elapsed time.
fn frames_to_minutes(frames: u32) -> u32 {
    (frames as f64 / FRAMES_PER_MINUTE as f64).round() as u32
}
