// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! MQTT client backing the telemetry link

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, Key, MqttOptions, Packet, QoS, TlsConfiguration, Transport};
use tracing::{debug, info, warn};

use crate::config::DeviceConfig;
use crate::detection::StateReport;

use super::{accepted_topic, update_topic, LinkError, ShadowUpdate, TelemetryConfig, TelemetryLink};

/// MQTT-backed [`TelemetryLink`] maintaining a device-shadow connection.
///
/// A spawned eventloop task owns the network session: it keeps polling (and
/// therefore auto-reconnecting), flips the shared connection flag on ConnAck
/// and on errors, and re-subscribes to the `accepted` topic after every
/// (re)connect. The polling loop only ever reads the flag.
pub struct MqttShadowLink {
    client: AsyncClient,
    connected: Arc<AtomicBool>,
    update_topic: String,
}

impl MqttShadowLink {
    /// Open the link and spawn its background eventloop task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(config: &TelemetryConfig, device: &DeviceConfig) -> Result<Self> {
        let client_id = config
            .client_id
            .clone()
            .unwrap_or_else(|| format!("{}-agent", device.name));

        let mut options = MqttOptions::new(&client_id, &config.host, config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));

        if let Some(tls) = Self::tls_config(config)? {
            options.set_transport(Transport::Tls(tls));
        }

        let (client, mut eventloop) = AsyncClient::new(options, 64);
        let connected = Arc::new(AtomicBool::new(false));

        let flag = connected.clone();
        let subscriber = client.clone();
        let ack_topic = accepted_topic(&config.topic_root, &device.name);
        let retry = Duration::from_millis(config.reconnect_interval_ms);

        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        flag.store(true, Ordering::SeqCst);
                        info!("telemetry link connected");
                        if let Err(e) = subscriber.subscribe(ack_topic.as_str(), QoS::AtLeastOnce).await {
                            warn!("subscribe to {ack_topic} failed: {e}");
                        }
                    }
                    Ok(Event::Incoming(Packet::Publish(msg))) => {
                        debug!("shadow ack on {}", msg.topic);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        flag.store(false, Ordering::SeqCst);
                        warn!("telemetry link error: {e}");
                        tokio::time::sleep(retry).await;
                    }
                }
            }
        });

        info!(
            "telemetry link initialized for {}:{} as {}",
            config.host, config.port, client_id
        );

        Ok(Self {
            client,
            connected,
            update_topic: update_topic(&config.topic_root, &device.name),
        })
    }

    fn tls_config(config: &TelemetryConfig) -> Result<Option<TlsConfiguration>> {
        let Some(ca_path) = &config.ca_cert else {
            return Ok(None);
        };

        let ca = fs::read(ca_path)
            .with_context(|| format!("reading CA certificate {}", ca_path.display()))?;

        let client_auth = match (&config.client_cert, &config.private_key) {
            (Some(cert_path), Some(key_path)) => {
                let cert = fs::read(cert_path)
                    .with_context(|| format!("reading client certificate {}", cert_path.display()))?;
                let key = fs::read(key_path)
                    .with_context(|| format!("reading private key {}", key_path.display()))?;
                Some((cert, Key::RSA(key)))
            }
            _ => None,
        };

        Ok(Some(TlsConfiguration::Simple {
            ca,
            alpn: None,
            client_auth,
        }))
    }
}

#[async_trait]
impl TelemetryLink for MqttShadowLink {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn publish(&self, report: &StateReport) -> Result<(), LinkError> {
        let payload = serde_json::to_vec(&ShadowUpdate::reported(report.clone()))?;

        self.client
            .publish(self.update_topic.as_str(), QoS::AtLeastOnce, false, payload)
            .await?;

        Ok(())
    }
}
