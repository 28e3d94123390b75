use async_trait::async_trait;

use crate::error::FeedResult;
use crate::types::BuildSet;

/// Source of build snapshots - the CI server side of the monitor
#[async_trait]
pub trait StatusFeed: Send + Sync {
    /// Short identifier used in logs (e.g. "jenkins")
    fn name(&self) -> &str;

    /// Fetch every configured view and merge the results into one snapshot.
    ///
    /// A view answering with an error status is dropped from the snapshot.
    /// Transport and parse failures abort the whole fetch so that a partial
    /// snapshot is never returned.
    async fn fetch_builds(&self) -> FeedResult<BuildSet>;
}
