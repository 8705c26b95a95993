//! Pluggable behavior classification
//!
//! The aggregator consumes already-labeled records and never calls a
//! classifier itself; this seam exists so that a real detection model and
//! the demo generator both produce records through the same interface.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{
    ActivityRecord, ATTENTIVE_LABEL, PHONE_LABEL, SLEEPING_LABEL, TALKING_LABEL,
};

/// One unlabeled observation of a student, as handed to a classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationFrame {
    pub student_id: u32,
    pub timestamp: DateTime<Utc>,
}

/// A classifier's verdict for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

/// Anything that can label an observation frame.
///
/// Production implementations wrap a detection model; [`SimulatedClassifier`]
/// stands in for one during demos and testing.
pub trait BehaviorClassifier {
    fn classify(&self, frame: &ObservationFrame) -> Classification;

    /// Label a frame and package the result as an activity record
    fn observe(&self, frame: &ObservationFrame) -> ActivityRecord {
        let classification = self.classify(frame);
        ActivityRecord {
            timestamp: frame.timestamp,
            student_id: frame.student_id,
            activity: classification.label,
            confidence: classification.confidence,
        }
    }
}

/// Weighted-random stand-in for a detection model.
///
/// Draws labels from a fixed weighted set, defaulting to a plausible
/// classroom mix where attentive behavior dominates.
#[derive(Debug, Clone)]
pub struct SimulatedClassifier {
    labels: Vec<(String, f64)>,
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedClassifier {
    pub fn new() -> Self {
        Self {
            labels: vec![
                (ATTENTIVE_LABEL.to_string(), 0.6),
                (TALKING_LABEL.to_string(), 0.15),
                (SLEEPING_LABEL.to_string(), 0.1),
                (format!("Using {}", PHONE_LABEL), 0.1),
                ("Distracted".to_string(), 0.05),
            ],
        }
    }

    /// Create a classifier drawing from a custom weighted label set
    pub fn with_labels(labels: Vec<(String, f64)>) -> Self {
        Self { labels }
    }
}

impl BehaviorClassifier for SimulatedClassifier {
    fn classify(&self, _frame: &ObservationFrame) -> Classification {
        let mut rng = rand::thread_rng();

        let total_weight: f64 = self.labels.iter().map(|(_, w)| w).sum();
        let mut roll = rng.gen_range(0.0..total_weight.max(f64::MIN_POSITIVE));

        let mut label = self
            .labels
            .last()
            .map(|(l, _)| l.clone())
            .unwrap_or_else(|| ATTENTIVE_LABEL.to_string());
        for (candidate, weight) in &self.labels {
            if roll < *weight {
                label = candidate.clone();
                break;
            }
            roll -= weight;
        }

        Classification {
            label,
            confidence: rng.gen_range(0.6..0.99),
        }
    }
}
