// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! Presence state machine
//!
//! Two-phase debouncer: a single sub-threshold sample is too noisy to trust,
//! so the machine demands K consecutive sub-threshold samples before
//! committing to "present". Leaving only takes one over-threshold sample -
//! entry is conservative, exit is responsive.

/// Debounce states for one ranging input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    /// Nothing in range; polling slowly.
    Scanning,
    /// Sub-threshold samples seen; accumulating confirmation hits.
    Verifying {
        /// Consecutive sub-threshold samples so far
        hits: u32,
    },
    /// Presence confirmed; holding until the object leaves.
    Confirmed,
}

/// What the polling loop should do after feeding one sample to the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollOutcome {
    /// Still scanning: sleep one scan interval, then re-poll.
    Idle,
    /// Positive verification sample: pulse the indicator, poll again at once.
    Pulse,
    /// Confirmation window complete: presence confirmed at this distance.
    Enter(f64),
    /// Object still present: poll again at once.
    Hold,
    /// Verification aborted by an over-threshold sample.
    Abort,
    /// The confirmed object left: clear the detection.
    Clear,
}

/// The debounce/confirmation machine.
///
/// Holds no collaborators; [`DetectionEngine`](super::DetectionEngine) feeds
/// it samples and acts on the outcomes.
#[derive(Debug)]
pub struct PresenceDetector {
    threshold: f64,
    confirm_samples: u32,
    state: PresenceState,
}

impl PresenceDetector {
    /// Machine with the given threshold and confirmation window size K.
    pub fn new(threshold: f64, confirm_samples: u32) -> Self {
        Self {
            threshold,
            confirm_samples: confirm_samples.max(1),
            state: PresenceState::Scanning,
        }
    }

    /// Current state
    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Feed one sample. `None` marks a failed read, which counts as an
    /// over-threshold sample so a flaky sensor can never confirm presence.
    ///
    /// The sub-threshold sample that leaves `Scanning` is confirmation hit
    /// number one; K total consecutive hits enter `Confirmed`.
    pub fn observe(&mut self, sample: Option<f64>) -> PollOutcome {
        let hit = sample.filter(|d| *d <= self.threshold);

        match (self.state, hit) {
            (PresenceState::Scanning, None) => PollOutcome::Idle,
            (PresenceState::Scanning, Some(d)) => self.advance(1, d),
            (PresenceState::Verifying { .. }, None) => {
                self.state = PresenceState::Scanning;
                PollOutcome::Abort
            }
            (PresenceState::Verifying { hits }, Some(d)) => self.advance(hits + 1, d),
            (PresenceState::Confirmed, Some(_)) => PollOutcome::Hold,
            (PresenceState::Confirmed, None) => {
                self.state = PresenceState::Scanning;
                PollOutcome::Clear
            }
        }
    }

    fn advance(&mut self, hits: u32, distance: f64) -> PollOutcome {
        if hits >= self.confirm_samples {
            self.state = PresenceState::Confirmed;
            PollOutcome::Enter(distance)
        } else {
            self.state = PresenceState::Verifying { hits };
            PollOutcome::Pulse
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(det: &mut PresenceDetector, samples: &[f64]) -> Vec<PollOutcome> {
        samples.iter().map(|&d| det.observe(Some(d))).collect()
    }

    #[test]
    fn confirms_on_ninth_consecutive_sub_threshold_sample() {
        let mut det = PresenceDetector::new(50.0, 9);
        let outcomes = feed(
            &mut det,
            &[
                80.0, 80.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 20.0,
            ],
        );

        assert_eq!(outcomes[0], PollOutcome::Idle);
        assert_eq!(outcomes[1], PollOutcome::Idle);
        for outcome in &outcomes[2..10] {
            assert_eq!(*outcome, PollOutcome::Pulse);
        }
        assert_eq!(outcomes[10], PollOutcome::Enter(30.0));
        assert_eq!(outcomes[11], PollOutcome::Hold);
        assert_eq!(det.state(), PresenceState::Confirmed);
    }

    #[test]
    fn aborts_on_first_over_threshold_sample_during_verification() {
        let mut det = PresenceDetector::new(50.0, 9);
        let outcomes = feed(&mut det, &[30.0, 30.0, 30.0, 30.0, 60.0]);

        assert_eq!(outcomes[4], PollOutcome::Abort);
        assert_eq!(det.state(), PresenceState::Scanning);
        assert!(!outcomes.iter().any(|o| matches!(o, PollOutcome::Enter(_))));
    }

    #[test]
    fn non_consecutive_hits_never_confirm() {
        let mut det = PresenceDetector::new(50.0, 9);

        feed(&mut det, &[30.0, 30.0, 30.0, 30.0, 30.0, 60.0]);
        assert_eq!(det.state(), PresenceState::Scanning);

        // Eight fresh hits after the miss: still one short of the window.
        let outcomes = feed(&mut det, &[30.0; 8]);
        assert_eq!(det.state(), PresenceState::Verifying { hits: 8 });
        assert!(!outcomes.iter().any(|o| matches!(o, PollOutcome::Enter(_))));

        assert_eq!(det.observe(Some(30.0)), PollOutcome::Enter(30.0));
    }

    #[test]
    fn holds_until_first_over_threshold_sample() {
        let mut det = PresenceDetector::new(50.0, 9);
        feed(&mut det, &[40.0; 9]);
        assert_eq!(det.state(), PresenceState::Confirmed);

        for _ in 0..30 {
            assert_eq!(det.observe(Some(40.0)), PollOutcome::Hold);
        }

        assert_eq!(det.observe(Some(60.0)), PollOutcome::Clear);
        assert_eq!(det.state(), PresenceState::Scanning);
    }

    #[test]
    fn failed_read_is_idle_while_scanning() {
        let mut det = PresenceDetector::new(50.0, 9);
        assert_eq!(det.observe(None), PollOutcome::Idle);
        assert_eq!(det.state(), PresenceState::Scanning);
    }

    #[test]
    fn failed_read_aborts_verification() {
        let mut det = PresenceDetector::new(50.0, 9);
        feed(&mut det, &[30.0, 30.0]);
        assert_eq!(det.state(), PresenceState::Verifying { hits: 2 });

        assert_eq!(det.observe(None), PollOutcome::Abort);
        assert_eq!(det.state(), PresenceState::Scanning);
    }

    #[test]
    fn failed_read_clears_confirmed_presence() {
        let mut det = PresenceDetector::new(50.0, 3);
        feed(&mut det, &[30.0, 30.0, 30.0]);
        assert_eq!(det.state(), PresenceState::Confirmed);

        assert_eq!(det.observe(None), PollOutcome::Clear);
        assert_eq!(det.state(), PresenceState::Scanning);
    }

    #[test]
    fn sample_on_the_threshold_counts_as_a_hit() {
        let mut det = PresenceDetector::new(50.0, 1);
        assert_eq!(det.observe(Some(50.0)), PollOutcome::Enter(50.0));
    }

    #[test]
    fn window_of_one_confirms_immediately() {
        let mut det = PresenceDetector::new(50.0, 1);
        assert_eq!(det.observe(Some(10.0)), PollOutcome::Enter(10.0));
        assert_eq!(det.state(), PresenceState::Confirmed);
    }
}
