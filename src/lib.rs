// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! RangeWatch - presence detection for fixed-location ranging sensors
//!
//! A small agent that polls a distance sensor, debounces noisy readings into
//! a confirmed "object present" / "object absent" state, and reports state
//! transitions to a device-shadow telemetry endpoint and a webhook
//! notification channel.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Detection Engine                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌─────────┐   ┌───────────┐   ┌───────────┐             │
//! │  │  Range  │ → │ Presence  │ → │ Indicator │             │
//! │  │ Sensor  │   │ Detector  │   └───────────┘             │
//! │  └─────────┘   └───────────┘          ↓ confirmed        │
//! │                       ┌───────────────┴────────────┐     │
//! │                       │  Telemetry Link │ Notifier │     │
//! │                       │  (MQTT shadow)  │ (webhook)│     │
//! │                       └────────────────────────────┘     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The detection loop is single-threaded by design; the only shared state is
//! the telemetry link's connection flag, maintained by the link's own
//! background task.

#![warn(missing_docs)]

pub mod config;
pub mod detection;
pub mod notify;
pub mod sensors;
pub mod telemetry;

// Re-exports for convenience
pub use config::Config;
pub use detection::{DetectionEngine, PresenceDetector, PresenceState, StateReport};
pub use notify::{Notifier, SlackNotifier};
pub use sensors::{Indicator, RangeSensor, SensorError};
pub use telemetry::{LinkError, MqttShadowLink, TelemetryLink};

/// RangeWatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// RangeWatch name
pub const NAME: &str = "RangeWatch";
