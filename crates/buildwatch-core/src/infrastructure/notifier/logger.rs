use async_trait::async_trait;

use crate::domain::NotifyResult;
use crate::event::{
    Notification,
    Notifier,
};

/// Writes each message to the log instead of a chat channel
pub struct LogNotifier {
    prefix: String,
}

impl LogNotifier {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> NotifyResult<()> {
        tracing::info!(
            target: "buildwatch::notification",
            project = %notification.record.name,
            build = %notification.record.number,
            event = notification.event.event_name(),
            observed_at = %notification.observed_at.to_rfc3339(),
            "{}",
            notification.message(&self.prefix)
        );
        Ok(())
    }

    fn writes_to_log(&self) -> bool {
        true
    }
}
