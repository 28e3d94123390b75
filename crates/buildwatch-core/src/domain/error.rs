use thiserror::Error;

/// Failure to hand a notification to its destination
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification transport error: {0}")]
    Transport(String),

    #[error("Notification rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid notifier configuration: {0}")]
    InvalidConfig(String),
}

pub type NotifyResult<T> = Result<T, NotifyError>;
