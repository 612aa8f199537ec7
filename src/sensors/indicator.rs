//! Indicator implementations

use tracing::debug;

use super::{Indicator, SensorError};

/// Indicator that reports state changes through the log.
///
/// Stands in for a GPIO-driven LED when running headless or in demo mode;
/// hardware bindings implement [`Indicator`] directly.
pub struct LogIndicator {
    id: String,
    lit: bool,
}

impl LogIndicator {
    /// Create an indicator with the given log identifier, initially off.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            lit: false,
        }
    }

    /// Current output state
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl Indicator for LogIndicator {
    fn set(&mut self, on: bool) -> Result<(), SensorError> {
        if self.lit != on {
            debug!("indicator {} {}", self.id, if on { "on" } else { "off" });
        }
        self.lit = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_output_state() {
        let mut led = LogIndicator::new("test-led");
        assert!(!led.is_lit());

        led.set(true).unwrap();
        assert!(led.is_lit());

        led.set(false).unwrap();
        assert!(!led.is_lit());
    }
}
