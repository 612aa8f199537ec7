// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! RangeWatch - presence detection agent
//!
//! Polls a fixed-location ranging sensor, debounces readings into a
//! confirmed present/absent state, and reports transitions to a
//! device-shadow endpoint and a webhook channel.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use rangewatch::config::Config;
use rangewatch::detection::DetectionEngine;
use rangewatch::notify::SlackNotifier;
use rangewatch::sensors::{LogIndicator, RangeSensor, SimulatedRanger};
use rangewatch::telemetry::MqttShadowLink;
use rangewatch::VERSION;

/// RangeWatch - presence detection agent for ranging sensors
#[derive(Parser, Debug)]
#[command(name = "rangewatch")]
#[command(version = VERSION)]
#[command(about = "Detects object presence with a ranging sensor and reports transitions")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Demo mode with a simulated sensor
    #[arg(long)]
    demo: bool,

    /// MQTT broker host
    #[arg(long)]
    broker: Option<String>,

    /// Device (thing) name override
    #[arg(long)]
    device: Option<String>,

    /// Detection threshold in centimeters
    #[arg(long)]
    threshold: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("RangeWatch v{VERSION}");

    // Load or create configuration
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if args.demo {
        config.demo_mode = true;
    }
    if let Some(broker) = args.broker {
        config.telemetry.host = broker;
    }
    if let Some(device) = args.device {
        config.device.name = device;
    }
    if let Some(threshold) = args.threshold {
        config.detection.threshold_cm = threshold;
    }

    info!("Configuration loaded from {:?}", config_path);
    info!(
        "Device {} watching {} (threshold {:.0} cm)",
        config.device.name, config.device.location, config.detection.threshold_cm
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))
}

/// Wire the collaborators together and run the detection loop until ctrl-c.
async fn run(config: Config) -> Result<()> {
    let link = Arc::new(MqttShadowLink::open(&config.telemetry, &config.device)?);
    let notifier = Arc::new(SlackNotifier::new(
        &config.notifier,
        config.device.id.clone(),
    ));
    let sensor = build_sensor(&config)?;
    let indicator = Box::new(LogIndicator::new("presence-led"));

    let mut engine = DetectionEngine::new(
        &config.detection,
        &config.device,
        sensor,
        indicator,
        link,
        notifier,
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let engine_task = tokio::spawn(async move { engine.run(shutdown_rx).await });

    info!("Press Ctrl+C to shutdown");
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received, cleaning up...");
    let _ = shutdown_tx.send(());
    engine_task.await??;

    info!("RangeWatch shutdown complete");
    Ok(())
}

fn build_sensor(config: &Config) -> Result<Box<dyn RangeSensor>> {
    if config.demo_mode {
        info!("Demo mode: using simulated ranger");
        return Ok(Box::new(SimulatedRanger::new("sim-ranger")));
    }

    #[cfg(feature = "serial")]
    if let Some(port) = &config.sensor.serial_port {
        return Ok(Box::new(rangewatch::sensors::SerialRanger::new(
            "serial-ranger",
            port,
            config.sensor.baud_rate,
            std::time::Duration::from_millis(config.sensor.read_timeout_ms),
        )));
    }

    anyhow::bail!("no sensor configured; set sensor.serial_port or run with --demo")
}
