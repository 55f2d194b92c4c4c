//! Notification dispatch — sends message text to a Discord webhook.

use async_trait::async_trait;
use daybell_core::config::AppConfig;
use daybell_core::error::{DaybellError, Result};
use daybell_core::traits::Notifier;
use serde::Serialize;

/// Body Discord expects for a plain text webhook message.
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// A Discord webhook target.
pub struct DiscordWebhook {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordWebhook {
    pub fn new(webhook_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DaybellError::Http(format!("Client error: {e}")))?;
        Ok(Self {
            webhook_url: webhook_url.to_string(),
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.discord_webhook_url, config.request_timeout())
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    fn name(&self) -> &str {
        "discord"
    }

    async fn send(&self, content: &str) -> Result<()> {
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookMessage { content })
            .send()
            .await
            .map_err(|e| DaybellError::Webhook(format!("Discord send failed: {e}")))?;

        if resp.status().is_success() {
            tracing::debug!("✅ Discord webhook accepted message");
            Ok(())
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Err(DaybellError::Webhook(format!("Discord webhook error {status}: {body}")))
        }
    }
}
