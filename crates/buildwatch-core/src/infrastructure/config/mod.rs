pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validation;

pub use interpolation::interpolate;
pub use loader::{
    ConfigLoadError,
    ConfigLoader,
    CONFIG_PATH_ENV,
};
pub use schema::{
    BuildwatchConfig,
    JenkinsConfig,
    MonitorConfig,
    NotifierConfig,
    NotifierKind,
};
pub use validation::{
    ConfigValidator,
    ValidationResult,
};
