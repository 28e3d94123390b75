use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::{
    NotifyError,
    NotifyResult,
};
use crate::event::{
    Notification,
    Notifier,
};

const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    #[serde(skip_serializing_if = "is_blank")]
    channel: &'a str,
    text: &'a str,
}

fn is_blank(value: &&str) -> bool {
    value.is_empty()
}

/// Posts `{"channel": ..., "text": ...}` to a chat webhook
pub struct WebhookNotifier {
    client: Client,
    url: String,
    channel: String,
    prefix: String,
}

impl WebhookNotifier {
    pub fn new(
        url: impl Into<String>, channel: impl Into<String>, prefix: impl Into<String>,
        timeout: Duration,
    ) -> NotifyResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            channel: channel.into(),
            prefix: prefix.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> NotifyResult<()> {
        let text = notification.message(&self.prefix);
        let payload = WebhookPayload {
            channel: &self.channel,
            text: &text,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
            body.push_str("...");
        }

        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
