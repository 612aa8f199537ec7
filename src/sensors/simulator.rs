// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! Simulated ranging sensor for demo/testing

use async_trait::async_trait;
use rand::prelude::*;
use rand_distr::Normal;

use super::{RangeSensor, SensorError};

/// Simulates an ultrasonic ranger watching a fixed spot.
///
/// Most samples sit near the ambient background distance; occasionally an
/// object wanders in and parks below the detection threshold for a while.
/// A small fraction of reads fail, the way a real echo sensor times out.
pub struct SimulatedRanger {
    id: String,
    rng: StdRng,
    background_cm: f64,
    object_cm: f64,
    noise: Normal<f64>,
    appear_probability: f64,
    fault_probability: f64,
    dwell_remaining: u32,
}

impl SimulatedRanger {
    /// Create a simulator with its default scene (background at 160 cm,
    /// visiting objects at 30 cm).
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            rng: StdRng::from_entropy(),
            background_cm: 160.0,
            object_cm: 30.0,
            noise: Normal::new(0.0, 2.5).unwrap(),
            appear_probability: 0.05,
            fault_probability: 0.002,
            dwell_remaining: 0,
        }
    }
}

#[async_trait]
impl RangeSensor for SimulatedRanger {
    fn id(&self) -> &str {
        &self.id
    }

    async fn connect(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    async fn read(&mut self) -> Result<f64, SensorError> {
        if self.rng.gen::<f64>() < self.fault_probability {
            return Err(SensorError::Invalid("echo timeout".to_string()));
        }

        if self.dwell_remaining == 0 && self.rng.gen::<f64>() < self.appear_probability {
            self.dwell_remaining = self.rng.gen_range(15..60);
        }

        let base = if self.dwell_remaining > 0 {
            self.dwell_remaining -= 1;
            self.object_cm
        } else {
            self.background_cm
        };

        Ok((base + self.rng.sample(self.noise)).max(0.0))
    }
}
