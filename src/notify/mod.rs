// Copyright (c) 2026 rangewatch contributors
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/rangewatch/rangewatch-rs

//! Notifier module - best-effort webhook alerts

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

/// Webhook notifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Incoming-webhook URL; notifications are disabled when unset
    pub webhook_url: Option<String>,

    /// Channel the messages are posted to
    pub channel: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            channel: "object_detector".to_string(),
        }
    }
}

/// Fire-and-forget outbound message post.
///
/// Failures are logged, never propagated to the detection loop.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post a text message, best effort.
    async fn notify(&self, text: &str);
}

/// Slack-style incoming-webhook notifier.
///
/// Posts `{"channel":"#<name>","username":<device id>,"text":<message>}`.
pub struct SlackNotifier {
    http: reqwest::Client,
    webhook_url: Option<String>,
    channel: String,
    username: Option<String>,
}

impl SlackNotifier {
    /// Build from configuration; `username` is the configured device id.
    pub fn new(config: &NotifierConfig, username: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url: config.webhook_url.clone(),
            channel: config.channel.clone(),
            username,
        }
    }

    fn body(&self, username: &str, text: &str) -> serde_json::Value {
        json!({
            "channel": format!("#{}", self.channel),
            "username": username,
            "text": text,
        })
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, text: &str) {
        // Nothing to post under without a device identity.
        let Some(username) = &self.username else {
            debug!("notification skipped, no device id configured");
            return;
        };
        let Some(url) = &self.webhook_url else {
            debug!("notification skipped, no webhook configured");
            return;
        };

        let body = self.body(username, text);
        match self.http.post(url).json(&body).send().await {
            Ok(resp) if !resp.status().is_success() => {
                warn!("notifier responded {}", resp.status());
            }
            Ok(_) => debug!("notification posted: {text}"),
            Err(e) => warn!("notifier error: {e}"),
        }
    }
}
