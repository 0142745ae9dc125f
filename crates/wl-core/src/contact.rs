//! Contact form submissions
//!
//! Submissions are validated here and handed to a [`Notifier`]. The default
//! notifier only records the submission in the log; forwarding to a real
//! mail or webhook service is a separate implementation of the same trait.

use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Raw request body. Every field is optional so that missing and empty
/// values are reported the same way.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// A submission with every required field present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(self) -> CoreResult<ContactSubmission> {
        fn required(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        match (required(self.name), required(self.phone), required(self.message)) {
            (Some(name), Some(phone), Some(message)) => Ok(ContactSubmission {
                name,
                phone,
                message,
            }),
            _ => Err(CoreError::Validation("Missing required fields".to_string())),
        }
    }
}

/// Outgoing notification composed from a submission
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub submission: ContactSubmission,
}

impl ContactMessage {
    pub fn compose(submission: ContactSubmission, recipient: &str) -> Self {
        let subject = format!("New Contact Form Submission from {}", submission.name);
        let body = format!(
            "Name: {}\nPhone: {}\nMessage: {}\n\n---\nThis message was sent from the website contact form.\n",
            submission.name, submission.phone, submission.message
        );

        Self {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
            to: recipient.to_string(),
            subject,
            body,
            submission,
        }
    }
}

/// What happened to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Logged,
    Forwarded,
}

impl Delivery {
    /// Human-readable note returned to the submitter
    pub fn note(&self) -> &'static str {
        match self {
            Delivery::Logged => "Submission logged. Configure a delivery service for production.",
            Delivery::Forwarded => "Submission forwarded to the delivery service.",
        }
    }
}

/// Delivery channel for contact messages
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, message: &ContactMessage) -> CoreResult<Delivery>;
}

/// Writes submissions to the log and nothing else
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn deliver(&self, message: &ContactMessage) -> CoreResult<Delivery> {
        info!(
            reference = %message.reference,
            to = %message.to,
            name = %message.submission.name,
            phone = %message.submission.phone,
            "New contact form submission: {}",
            message.submission.message
        );
        Ok(Delivery::Logged)
    }
}

/// POSTs each message as JSON to a webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> CoreResult<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Config(format!("webhook URL must be http(s): {}", url)));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CoreError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn deliver(&self, message: &ContactMessage) -> CoreResult<Delivery> {
        debug!("Forwarding contact submission {} to {}", message.reference, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| CoreError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Delivery(format!("webhook answered {}", status)));
        }

        info!("Contact submission {} forwarded", message.reference);
        Ok(Delivery::Forwarded)
    }
}
