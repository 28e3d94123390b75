use thiserror::Error;

/// Errors raised while fetching or parsing a status feed
#[derive(Error, Debug)]
pub enum FeedError {
    /// Connection-level failure: refused, timed out, DNS, broken body stream.
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a 4xx/5xx status for one view.
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedError {
    /// Errors that abort a whole polling cycle rather than a single view.
    pub fn aborts_cycle(&self) -> bool {
        !matches!(self, FeedError::HttpStatus { .. })
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
