// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! Sensor traits and error types

use async_trait::async_trait;
use thiserror::Error;

/// Faults raised by the ranging input or the indicator output.
///
/// All of these are transient from the detection loop's point of view: a
/// failed read counts as "no reliable sample this tick", never as a reason
/// to stop polling.
#[derive(Debug, Error)]
pub enum SensorError {
    /// I/O fault while talking to the device
    #[error("sensor i/o fault: {0}")]
    Io(#[from] std::io::Error),

    /// The device answered with something unusable
    #[error("invalid reading: {0}")]
    Invalid(String),

    /// Operation attempted before `connect`
    #[error("sensor not connected")]
    NotConnected,
}

/// A ranging input that yields one distance sample on demand.
#[async_trait]
pub trait RangeSensor: Send + Sync {
    /// Identifier used in logs
    fn id(&self) -> &str;

    /// Open the underlying device
    async fn connect(&mut self) -> Result<(), SensorError>;

    /// Take one distance sample, in the same units as the configured threshold
    async fn read(&mut self) -> Result<f64, SensorError>;
}

/// A binary output actuator
pub trait Indicator: Send + Sync {
    /// Drive the output high or low
    fn set(&mut self, on: bool) -> Result<(), SensorError>;
}
