use async_trait::async_trait;
use buildwatch_api::BuildRecord;
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::domain::NotifyResult;

/// Notification-worthy build transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildEvent {
    /// A new build failed after a non-failing one.
    Failed,
    /// A new build failed after a failing one.
    StillFailing,
    /// A new build succeeded after a failing one.
    Fixed,
}

impl BuildEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            BuildEvent::Failed => "failed",
            BuildEvent::StillFailing => "still-failing",
            BuildEvent::Fixed => "fixed",
        }
    }

    /// Chat-facing label, emoticon included.
    pub fn phrase(&self) -> &'static str {
        match self {
            BuildEvent::Failed => "(rain) Failed",
            BuildEvent::StillFailing => "(rain) Still failing",
            BuildEvent::Fixed => "(sun) Fixed",
        }
    }
}

/// One detected transition, ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub record: BuildRecord,
    pub event: BuildEvent,
    pub observed_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(record: BuildRecord, event: BuildEvent) -> Self {
        Self {
            record,
            event,
            observed_at: Utc::now(),
        }
    }

    /// `<phrase>: <name> - <webUrl><number>`
    ///
    /// URL and build label are joined without a separator; Jenkins job URLs
    /// end with `/`, which makes the result the build's own page.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} - {}{}",
            self.event.phrase(),
            self.record.name,
            self.record.web_url,
            self.record.number
        )
    }

    pub fn message(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.summary())
    }
}

/// Delivers notifications to a human-facing channel
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> NotifyResult<()>;

    /// True when delivering already writes the message to the log at info.
    fn writes_to_log(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> BuildRecord {
        BuildRecord::new("core", "http://ci:8088/job/core/", "118", status)
    }

    #[test]
    fn test_event_names() {
        assert_eq!(BuildEvent::Failed.event_name(), "failed");
        assert_eq!(BuildEvent::StillFailing.event_name(), "still-failing");
        assert_eq!(BuildEvent::Fixed.event_name(), "fixed");
    }

    #[test]
    fn test_message_format() {
        let notification = Notification::new(record("Failure"), BuildEvent::StillFailing);
        assert_eq!(
            notification.message("[Jenkins] "),
            "[Jenkins] (rain) Still failing: core - http://ci:8088/job/core/118"
        );

        let fixed = Notification::new(record("Success"), BuildEvent::Fixed);
        assert_eq!(fixed.message(""), "(sun) Fixed: core - http://ci:8088/job/core/118");
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&BuildEvent::StillFailing).unwrap();
        assert_eq!(json, "\"still-failing\"");
    }
}
