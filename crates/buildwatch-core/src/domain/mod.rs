pub mod error;
pub mod transition;

pub use error::{
    NotifyError,
    NotifyResult,
};
pub use transition::classify;
