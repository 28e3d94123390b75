use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::{
    BuildwatchConfig,
    CONFIG_FILE_NAME,
};

pub const CONFIG_PATH_ENV: &str = "BUILDWATCH_CONFIG_PATH";

const LOCAL_CONFIG_FILE: &str = "buildwatch.toml";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

pub struct ConfigLoader;

impl ConfigLoader {
    /// `$BUILDWATCH_CONFIG_PATH`, then the user config directory, then
    /// `./buildwatch.toml`.
    pub fn discover_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            tracing::debug!("Using config path from {}: {}", CONFIG_PATH_ENV, path);
            return PathBuf::from(path);
        }

        if let Some(config_dir) = BuildwatchConfig::default_config_dir() {
            let path = config_dir.join(CONFIG_FILE_NAME);
            if path.exists() {
                tracing::debug!("Using user config path: {}", path.display());
                return path;
            }
        }

        let fallback = PathBuf::from(LOCAL_CONFIG_FILE);
        tracing::debug!("Using fallback config path: {}", fallback.display());
        fallback
    }

    pub fn load(path: &Path) -> ConfigLoadResult<BuildwatchConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads and validates; warnings are logged, errors fail the load.
    pub fn load_validated(path: &Path) -> ConfigLoadResult<BuildwatchConfig> {
        let config = Self::load(path)?;
        let validation = config.validate();

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        if !validation.is_ok() {
            let errors: Vec<String> = validation.errors.iter().map(|e| e.to_string()).collect();
            return Err(ConfigLoadError::InvalidConfig(errors.join("; ")));
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<BuildwatchConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: BuildwatchConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })?;

        tracing::debug!(
            base_url = %config.jenkins.base_url,
            views = config.jenkins.views.len(),
            notifier = %config.notifier.kind,
            "Loaded config"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::schema::NotifierKind;
    use super::*;

    const SAMPLE: &str = r##"
[jenkins]
base_url = "http://172.0.0.1:8088"
views = ["view/here/"]

[monitor]
interval_secs = 15

[notifier]
kind = "webhook"
webhook_url = "https://chat.example.com/hooks/abc"
channel = "#username/$chat"
message_prefix = "[Jenkins] "
request_timeout_secs = 5
"##;

    #[test]
    fn test_parse_full_config() {
        let config = ConfigLoader::parse(SAMPLE).unwrap();

        assert_eq!(config.jenkins.base_url, "http://172.0.0.1:8088");
        assert_eq!(config.jenkins.views, vec!["view/here/"]);
        assert_eq!(config.monitor.interval_secs, 15);
        assert_eq!(config.notifier.kind, NotifierKind::Webhook);
        assert_eq!(config.notifier.channel, "#username/$chat");
        assert_eq!(config.notifier.request_timeout_secs, 5);
        assert_eq!(config.jenkins.request_timeout_secs, 30);
    }

    #[test]
    fn test_parse_unknown_notifier_kind() {
        let result = ConfigLoader::parse("[notifier]\nkind = \"skype\"\n");
        assert!(matches!(result, Err(ConfigLoadError::InvalidConfig(_))));
    }

    #[test]
    fn test_env_var_interpolation() {
        std::env::set_var("BUILDWATCH_TEST_LOADER_URL", "http://jenkins.internal");

        let content = r#"
[jenkins]
base_url = "${BUILDWATCH_TEST_LOADER_URL}"
views = "${BUILDWATCH_TEST_LOADER_VIEW_UNSET:-view/main/}"
"#;

        let config = ConfigLoader::parse(content).unwrap();
        assert_eq!(config.jenkins.base_url, "http://jenkins.internal");
        assert_eq!(config.jenkins.views, vec!["view/main/"]);

        std::env::remove_var("BUILDWATCH_TEST_LOADER_URL");
    }

    #[test]
    fn test_missing_required_env_var() {
        let content = r#"
[jenkins]
api_token = "${BUILDWATCH_TEST_LOADER_TOKEN_UNSET}"
"#;

        let result = ConfigLoader::parse(content);
        assert!(matches!(
            result,
            Err(ConfigLoadError::InterpolationError(_))
        ));
    }

    #[test]
    fn test_load_validated_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, SAMPLE).unwrap();

        let config = ConfigLoader::load_validated(&config_path).unwrap();
        assert_eq!(config.jenkins.views.len(), 1);
    }

    #[test]
    fn test_load_validated_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[monitor]\ninterval_secs = 0\n").unwrap();

        let result = ConfigLoader::load_validated(&config_path);
        match result {
            Err(ConfigLoadError::InvalidConfig(message)) => {
                assert!(message.contains("jenkins.base_url"));
                assert!(message.contains("monitor.interval_secs"));
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::load(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_discover_config_path_env_override() {
        std::env::set_var(CONFIG_PATH_ENV, "/custom/path/buildwatch.toml");
        let path = ConfigLoader::discover_config_path();
        assert_eq!(path, PathBuf::from("/custom/path/buildwatch.toml"));
        std::env::remove_var(CONFIG_PATH_ENV);
    }
}
