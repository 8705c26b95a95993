//! Generate a synthetic activity log for demo and validation runs

use chrono::{Duration, TimeZone, Utc};
use classlens::{BehaviorClassifier, ObservationFrame, SimulatedClassifier};

fn main() {
    let classifier = SimulatedClassifier::new();
    let session_start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

    println!("timestamp,studentId,activity,confidence");

    // 20 students observed twice per second for one minute
    for tick in 0..120i64 {
        let timestamp = session_start + Duration::milliseconds(tick * 500);
        for student_id in 1..=20 {
            let record = classifier.observe(&ObservationFrame {
                student_id,
                timestamp,
            });
            println!(
                "{},{},{},{:.2}",
                record.timestamp.to_rfc3339(),
                record.student_id,
                record.activity,
                record.confidence
            );
        }
    }
}
