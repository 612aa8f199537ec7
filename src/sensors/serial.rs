// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! Serial-attached ultrasonic ranger

use std::io::{BufRead, BufReader};
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::{RangeSensor, SensorError};

/// Ultrasonic ranger speaking a line-oriented ASCII protocol over UART.
///
/// Each poll reads one line containing the distance in centimeters, the
/// format TF-Luna / US-100 style modules emit in ASCII mode.
pub struct SerialRanger {
    id: String,
    port_name: String,
    baud_rate: u32,
    read_timeout: Duration,
    reader: Option<BufReader<Box<dyn serialport::SerialPort>>>,
}

impl SerialRanger {
    /// Describe a ranger on the given port; the port is opened by `connect`.
    pub fn new(id: &str, port_name: &str, baud_rate: u32, read_timeout: Duration) -> Self {
        Self {
            id: id.to_string(),
            port_name: port_name.to_string(),
            baud_rate,
            read_timeout,
            reader: None,
        }
    }
}

#[async_trait]
impl RangeSensor for SerialRanger {
    fn id(&self) -> &str {
        &self.id
    }

    async fn connect(&mut self) -> Result<(), SensorError> {
        let port = serialport::new(&self.port_name, self.baud_rate)
            .timeout(self.read_timeout)
            .open()
            .map_err(|e| SensorError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

        info!("opened serial ranger on {}", self.port_name);
        self.reader = Some(BufReader::new(port));
        Ok(())
    }

    async fn read(&mut self) -> Result<f64, SensorError> {
        let reader = self.reader.as_mut().ok_or(SensorError::NotConnected)?;

        let mut line = String::new();
        reader.read_line(&mut line)?;

        line.trim()
            .parse::<f64>()
            .map_err(|_| SensorError::Invalid(format!("unparseable sample {:?}", line.trim())))
    }
}
