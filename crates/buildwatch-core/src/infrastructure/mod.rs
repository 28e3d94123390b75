pub mod config;
pub mod notifier;

pub use config::{
    BuildwatchConfig,
    ConfigLoadError,
    ConfigLoader,
};
