//! Telemetry module - device-shadow link to the remote state-sync endpoint

mod mqtt;
mod shadow;

pub use mqtt::MqttShadowLink;
pub use shadow::{accepted_topic, update_topic, ShadowState, ShadowUpdate};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::detection::StateReport;

/// Telemetry endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Broker host name
    pub host: String,

    /// Broker port (shadow backends use 8883 with TLS)
    pub port: u16,

    /// MQTT client id; derived from the device name when unset. Must be
    /// unique per broker - shadow backends disconnect duplicate ids.
    pub client_id: Option<String>,

    /// First topic segment of the shadow topics, e.g. `$aws`
    pub topic_root: String,

    /// Keep-alive interval in seconds
    pub keep_alive_secs: u64,

    /// Wait after an eventloop error before polling again, in milliseconds
    pub reconnect_interval_ms: u64,

    /// Root CA certificate (PEM); TLS is enabled when set
    pub ca_cert: Option<PathBuf>,

    /// Client certificate (PEM) for mutual TLS
    pub client_cert: Option<PathBuf>,

    /// Client private key (PEM, RSA) for mutual TLS
    pub private_key: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: None,
            topic_root: "$aws".to_string(),
            keep_alive_secs: 30,
            reconnect_interval_ms: 5000,
            ca_cert: None,
            client_cert: None,
            private_key: None,
        }
    }
}

/// Telemetry link failures
#[derive(Debug, Error)]
pub enum LinkError {
    /// Publish attempted while the link is down
    #[error("telemetry link is offline")]
    Offline,

    /// The client rejected the publish
    #[error("publish failed: {0}")]
    Publish(#[from] rumqttc::ClientError),

    /// Payload could not be encoded
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A persistent connection to the remote state-sync endpoint.
///
/// `is_connected` must be cheap and safe to call from the polling loop while
/// the link's own background task mutates connectivity. Publishing while
/// disconnected is the caller's bug; the engine gates on the flag.
#[async_trait]
pub trait TelemetryLink: Send + Sync {
    /// Current connectivity, maintained by the link's background task
    fn is_connected(&self) -> bool;

    /// Publish a confirmed state report to the shadow-update topic
    async fn publish(&self, report: &StateReport) -> Result<(), LinkError>;
}
