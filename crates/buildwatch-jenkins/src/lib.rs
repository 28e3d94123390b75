//! Jenkins status feed for buildwatch
//!
//! Reads the CCTray `cc.xml` document that Jenkins publishes for every view
//! and turns it into a [`buildwatch_api::BuildSet`].
//!
//! # Architecture
//!
//! - `feed` - [`JenkinsFeed`], the [`buildwatch_api::StatusFeed`] implementation
//! - `client` - HTTP access to one view
//! - `parser` - `cc.xml` parsing
//! - `types` - raw feed entries
//! - `config` - URL helpers
//!
//! # Example Usage
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use buildwatch_api::StatusFeed;
//! use buildwatch_jenkins::{
//!     JenkinsFeed,
//!     JenkinsSettings,
//! };
//!
//! # async fn run() -> buildwatch_api::FeedResult<()> {
//! let feed = JenkinsFeed::new(JenkinsSettings {
//!     server_url: "http://ci.example.com".to_string(),
//!     views: vec!["view/nightly/".to_string()],
//!     username: None,
//!     api_token: None,
//!     request_timeout: Duration::from_secs(30),
//! })?;
//! let builds = feed.fetch_builds().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod feed;
mod parser;
mod types;

pub use feed::{
    JenkinsFeed,
    JenkinsSettings,
};
pub use parser::parse_build_set;
