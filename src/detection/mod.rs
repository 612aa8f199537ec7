//! Detection module - presence state machine and polling engine

mod detector;
mod engine;

pub use detector::{PollOutcome, PresenceDetector, PresenceState};
pub use engine::DetectionEngine;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a confirmed detection, reported to the telemetry endpoint.
///
/// Built at the moment the machine enters `Confirmed`; has no identity after
/// publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReport {
    /// Wall-clock time the detection was confirmed
    pub timestamp: DateTime<Utc>,

    /// Distance of the confirming sample
    pub distance: f64,

    /// Configured device identifier, when one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl StateReport {
    /// Snapshot the current moment for a confirmed detection.
    pub fn new(distance: f64, device: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            distance,
            device,
        }
    }
}
