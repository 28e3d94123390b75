//! Notification sinks

mod logger;
mod webhook;

use std::sync::Arc;

pub use logger::LogNotifier;
pub use webhook::WebhookNotifier;

use super::config::{
    NotifierConfig,
    NotifierKind,
};
use crate::domain::{
    NotifyError,
    NotifyResult,
};
use crate::event::Notifier;

/// Builds the notifier selected in the config.
pub fn from_config(config: &NotifierConfig) -> NotifyResult<Arc<dyn Notifier>> {
    match config.kind {
        NotifierKind::Log => Ok(Arc::new(LogNotifier::new(config.message_prefix.clone()))),
        NotifierKind::Webhook => {
            let url = config
                .webhook_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .ok_or_else(|| NotifyError::InvalidConfig("Missing webhook_url".to_string()))?;

            Ok(Arc::new(WebhookNotifier::new(
                url,
                config.channel.trim(),
                config.message_prefix.clone(),
                config.request_timeout(),
            )?))
        }
    }
}
