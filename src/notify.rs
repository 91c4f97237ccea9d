//! Notification sink for feeding reminders and weather alerts.
//!
//! This module defines the [`Notification`] payload, the [`NotificationSink`]
//! trait both pollers deliver to, and [`WebhookNotifier`], the production sink
//! that writes every notification to the log and optionally relays it to a
//! configured webhook.

use std::fmt;

use log::{debug, error, info};
use mockall::automock;
use reqwest::Client;
use serde::Serialize;

/// How long a notification stays on screen, in milliseconds.
const NOTIFICATION_DURATION_MS: u64 = 10 * 1000; // 10 seconds

/// A single notification to surface to the owner.
///
/// Serialized in camelCase because the webhook payload follows the same
/// conventions as the records file of the record-keeping app.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Short headline of the notification
    pub title: String,
    /// Human-readable body text
    pub description: String,
    /// Display duration in milliseconds
    pub duration_ms: u64,
}

impl Notification {
    /// Create a new [Notification] with the standard display duration.
    ///
    /// # Arguments
    ///
    /// * `title` - Short headline of the notification.
    /// * `description` - Human-readable body text.
    pub fn new(title: &str, description: &str) -> Self {
        Notification {
            title: title.to_owned(),
            description: description.to_owned(),
            duration_ms: NOTIFICATION_DURATION_MS,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Trait for delivering notifications to the owner.
///
/// This trait abstracts the presentation layer for easier testing with mocks.
#[automock]
pub trait NotificationSink {
    /// Surfaces one notification. Delivery failures are handled by the sink
    /// and never propagate to the caller.
    async fn notify(&self, notification: &Notification);
}

/// [`NotificationSink`] that logs notifications and relays them to a webhook.
///
/// Every notification is written to the log at info level. When a webhook URL
/// is configured the notification is also POSTed to it as JSON; delivery
/// errors are logged and swallowed so a dead webhook never stops the pollers.
#[derive(Clone)]
pub struct WebhookNotifier {
    /// Webhook endpoint to POST notifications to, if any
    webhook_url: Option<String>,
    /// HTTP client
    client: Client,
}

impl WebhookNotifier {
    /// Create a new [WebhookNotifier].
    ///
    /// # Arguments
    ///
    /// * `webhook_url` - Endpoint to relay notifications to. `None` keeps the
    ///   sink log-only.
    pub fn new(webhook_url: Option<String>) -> Self {
        let client = reqwest::Client::new();
        WebhookNotifier {
            webhook_url,
            client,
        }
    }
}

impl NotificationSink for WebhookNotifier {
    async fn notify(&self, notification: &Notification) {
        info!("notification {}", notification);

        let Some(url) = &self.webhook_url else {
            return;
        };

        debug!("post notification to {}", url);

        match self.client.post(url).json(notification).send().await {
            Ok(response) => debug!("response from {} -> {}", url, response.status()),
            Err(e) => error!("failed to relay notification to webhook: {}", e),
        }
    }
}
