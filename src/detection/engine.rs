// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! Polling engine driving the detector against its collaborators

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, warn};

use crate::config::{DetectionConfig, DeviceConfig};
use crate::notify::Notifier;
use crate::sensors::{Indicator, RangeSensor};
use crate::telemetry::TelemetryLink;

use super::{PollOutcome, PresenceDetector, PresenceState, StateReport};

/// Owns the detection loop: polls the ranger, debounces through
/// [`PresenceDetector`], drives the indicator, and emits confirmed
/// transitions to the telemetry link and the notifier.
///
/// Everything here runs sequentially on one task; the only shared state is
/// the link's connection flag, which the loop reads without blocking.
pub struct DetectionEngine {
    detector: PresenceDetector,
    sensor: Box<dyn RangeSensor>,
    indicator: Box<dyn Indicator>,
    link: Arc<dyn TelemetryLink>,
    notifier: Arc<dyn Notifier>,
    device_id: Option<String>,
    location: String,
    scan_interval: Duration,
    offline_retry: Duration,
}

impl DetectionEngine {
    /// Build an engine from configuration and its four collaborators.
    pub fn new(
        detection: &DetectionConfig,
        device: &DeviceConfig,
        sensor: Box<dyn RangeSensor>,
        indicator: Box<dyn Indicator>,
        link: Arc<dyn TelemetryLink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            detector: PresenceDetector::new(detection.threshold_cm, detection.confirm_samples),
            sensor,
            indicator,
            link,
            notifier,
            device_id: device.id.clone(),
            location: device.location.clone(),
            scan_interval: Duration::from_millis(detection.scan_interval_ms),
            offline_retry: Duration::from_millis(detection.offline_retry_ms),
        }
    }

    /// Run until the shutdown signal fires.
    ///
    /// The indicator is forced off on the way out, whatever state the
    /// detector was in.
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        self.sensor.connect().await?;
        info!("detection engine started (sensor {})", self.sensor.id());

        loop {
            if !matches!(shutdown.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }

            // Hold before a scan pass until the telemetry link is up.
            // Reconnection is the link's own job; we only wait and re-check.
            if self.detector.state() == PresenceState::Scanning && !self.link.is_connected() {
                debug!("telemetry link offline, waiting");
                if self.pause(self.offline_retry, &mut shutdown).await {
                    break;
                }
                continue;
            }

            let sample = match self.sensor.read().await {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!("sensor read failed: {e}");
                    None
                }
            };

            match self.detector.observe(sample) {
                PollOutcome::Idle => {
                    debug!("scanning, nothing in range");
                    if self.pause(self.scan_interval, &mut shutdown).await {
                        break;
                    }
                }
                PollOutcome::Pulse => {
                    info!("possible object at {:.1} cm", sample.unwrap_or_default());
                    self.set_indicator(true);
                    self.set_indicator(false);
                }
                PollOutcome::Enter(distance) => self.on_confirmed(distance).await,
                PollOutcome::Hold => debug!("object still present"),
                PollOutcome::Abort => info!("verification aborted, back to scanning"),
                PollOutcome::Clear => self.on_cleared().await,
            }
        }

        self.set_indicator(false);
        info!("detection engine stopped");
        Ok(())
    }

    /// Sleep unless shutdown fires first; true means shut down.
    async fn pause(&self, dur: Duration, shutdown: &mut broadcast::Receiver<()>) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(dur) => false,
            _ = shutdown.recv() => true,
        }
    }

    async fn on_confirmed(&mut self, distance: f64) {
        info!("object detected at {:.1} cm", distance);
        self.set_indicator(true);
        self.notifier
            .notify(&format!("Detection at {}", self.location))
            .await;

        let report = StateReport::new(distance, self.device_id.clone());
        if self.link.is_connected() {
            match self.link.publish(&report).await {
                Ok(()) => info!("state report sent"),
                Err(e) => warn!("state report publish failed: {e}"),
            }
        } else {
            warn!("telemetry link offline, state report dropped");
        }
    }

    async fn on_cleared(&mut self) {
        info!("object no longer detected");
        self.set_indicator(false);
        self.notifier
            .notify(&format!("No more detection at {}", self.location))
            .await;
    }

    fn set_indicator(&mut self, on: bool) {
        if let Err(e) = self.indicator.set(on) {
            warn!("indicator write failed: {e}");
        }
    }
}
