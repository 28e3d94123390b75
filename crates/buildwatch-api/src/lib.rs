//! Shared types for buildwatch: build records, the status feed contract and
//! its error type.

pub mod error;
pub mod feed;
pub mod types;

pub use error::{
    FeedError,
    FeedResult,
};
pub use feed::StatusFeed;
pub use types::{
    BuildRecord,
    BuildSet,
    BuildStatus,
};
