use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use buildwatch_api::{
    BuildRecord,
    BuildSet,
    FeedResult,
    StatusFeed,
};

use crate::domain::classify;
use crate::event::{
    BuildEvent,
    Notification,
    Notifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
}

impl MonitorSettings {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

/// What one successful cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// First snapshot stored; nothing to compare against yet.
    Baseline { projects: usize },
    Compared {
        projects: usize,
        transitions: usize,
        delivered: usize,
    },
}

/// Polls a [`StatusFeed`] and reports build transitions to a [`Notifier`].
///
/// The previous snapshot is owned here and only replaced after a complete
/// fetch. A failed fetch leaves it untouched.
pub struct BuildMonitor {
    feed: Arc<dyn StatusFeed>,
    notifier: Arc<dyn Notifier>,
    settings: MonitorSettings,
    previous: Option<BuildSet>,
}

impl BuildMonitor {
    pub fn new(
        feed: Arc<dyn StatusFeed>, notifier: Arc<dyn Notifier>, settings: MonitorSettings,
    ) -> Self {
        Self {
            feed,
            notifier,
            settings,
            previous: None,
        }
    }

    pub fn previous(&self) -> Option<&BuildSet> {
        self.previous.as_ref()
    }

    pub fn settings(&self) -> MonitorSettings {
        self.settings
    }

    /// Polls until `shutdown` resolves.
    ///
    /// Shutdown is honoured while fetching and while sleeping. Once a
    /// snapshot is in hand its notifications are all sent before the signal
    /// is looked at again.
    pub async fn run<S>(&mut self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        tracing::info!(
            feed = self.feed.name(),
            interval_secs = self.settings.interval.as_secs(),
            "Build monitor started"
        );

        loop {
            let fetched = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                result = self.feed.fetch_builds() => result,
            };

            match fetched {
                Ok(current) => {
                    let outcome = self.apply_snapshot(current).await;
                    tracing::debug!(?outcome, "Cycle complete");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Update failed, keeping previous snapshot");
                }
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        tracing::info!("Build monitor stopped");
    }

    /// Runs a single fetch-diff-notify cycle.
    pub async fn check_for_new_builds(&mut self) -> FeedResult<CycleOutcome> {
        let current = self.feed.fetch_builds().await?;
        Ok(self.apply_snapshot(current).await)
    }

    async fn apply_snapshot(&mut self, current: BuildSet) -> CycleOutcome {
        let outcome = match &self.previous {
            None => {
                tracing::info!(projects = current.len(), "Baseline snapshot stored");
                CycleOutcome::Baseline {
                    projects: current.len(),
                }
            }
            Some(previous) => {
                let transitions = detect_transitions(previous, &current);
                let delivered = self.deliver(&transitions).await;
                CycleOutcome::Compared {
                    projects: current.len(),
                    transitions: transitions.len(),
                    delivered,
                }
            }
        };

        self.previous = Some(current);
        outcome
    }

    async fn deliver(&self, transitions: &[(&BuildRecord, BuildEvent)]) -> usize {
        let mut delivered = 0;

        for (record, event) in transitions {
            let notification = Notification::new((*record).clone(), *event);

            match self.notifier.notify(&notification).await {
                Ok(()) => {
                    delivered += 1;
                    if self.notifier.writes_to_log() {
                        tracing::debug!(
                            project = %record.name,
                            event = event.event_name(),
                            "Notification delivered"
                        );
                    } else {
                        tracing::info!(
                            project = %record.name,
                            build = %record.number,
                            event = event.event_name(),
                            observed_at = %notification.observed_at.to_rfc3339(),
                            "{}",
                            notification.summary()
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        project = %record.name,
                        event = event.event_name(),
                        error = %e,
                        "Failed to deliver notification"
                    );
                }
            }
        }

        delivered
    }
}

/// Lists the notification-worthy changes between two snapshots, in the order
/// of `current`.
///
/// A project is only classified when its build label changed. Projects new in
/// `current` or missing from it produce nothing.
pub fn detect_transitions<'a>(
    previous: &BuildSet, current: &'a BuildSet,
) -> Vec<(&'a BuildRecord, BuildEvent)> {
    let mut transitions = Vec::new();

    for record in current {
        let previous_status = match previous.get(&record.name) {
            Some(prev) if prev.number == record.number => continue,
            Some(prev) => Some(&prev.status),
            None => None,
        };

        if let Some(event) = classify(previous_status, &record.status) {
            transitions.push((record, event));
        }
    }

    transitions
}
