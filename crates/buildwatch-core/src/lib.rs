//! Polling engine behind buildwatch: configuration, transition detection and
//! notification delivery.

pub mod application;
pub mod domain;
pub mod event;
pub mod infrastructure;
pub mod logging;

use std::sync::Arc;

use anyhow::Context;
pub use application::{
    BuildMonitor,
    CycleOutcome,
    MonitorSettings,
};
use buildwatch_api::StatusFeed;
use buildwatch_jenkins::JenkinsFeed;
pub use domain::{
    classify,
    NotifyError,
    NotifyResult,
};
pub use event::{
    BuildEvent,
    Notification,
    Notifier,
};
pub use infrastructure::{
    BuildwatchConfig,
    ConfigLoadError,
    ConfigLoader,
};

/// Collaborators wired from a validated config, ready to become a monitor.
pub struct CoreContext {
    pub feed: Arc<dyn StatusFeed>,

    pub notifier: Arc<dyn Notifier>,

    pub settings: MonitorSettings,
}

impl CoreContext {
    pub fn from_config(config: &BuildwatchConfig) -> anyhow::Result<Self> {
        let feed = JenkinsFeed::new(config.jenkins_settings())
            .context("Failed to create Jenkins feed")?;
        let notifier = infrastructure::notifier::from_config(&config.notifier)
            .context("Failed to create notifier")?;

        tracing::info!(
            base_url = %config.jenkins.base_url,
            views = ?feed.views(),
            notifier = %config.notifier.kind,
            "Core context initialized"
        );

        Ok(Self {
            feed: Arc::new(feed),
            notifier,
            settings: MonitorSettings::new(config.interval()),
        })
    }

    pub fn into_monitor(self) -> BuildMonitor {
        BuildMonitor::new(self.feed, self.notifier, self.settings)
    }
}
