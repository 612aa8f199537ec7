//! Sensor module - ranging inputs and indicator outputs

mod indicator;
mod simulator;
mod traits;

#[cfg(feature = "serial")]
mod serial;

pub use indicator::LogIndicator;
pub use simulator::SimulatedRanger;
pub use traits::{Indicator, RangeSensor, SensorError};

#[cfg(feature = "serial")]
pub use serial::SerialRanger;
