use std::path::PathBuf;
use std::time::Duration;

use buildwatch_jenkins::JenkinsSettings;
use serde::{
    Deserialize,
    Deserializer,
};

pub(super) const DEFAULT_INTERVAL_SECS: u64 = 15;

pub(super) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub(super) const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

pub(super) const DEFAULT_MESSAGE_PREFIX: &str = "[Jenkins] ";

pub(super) const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BuildwatchConfig {
    #[serde(default)]
    pub jenkins: JenkinsConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl BuildwatchConfig {
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("buildwatch"))
    }

    pub fn jenkins_settings(&self) -> JenkinsSettings {
        JenkinsSettings {
            server_url: self.jenkins.base_url.trim().to_string(),
            views: self.jenkins.views.clone(),
            username: non_blank(&self.jenkins.username),
            api_token: non_blank(&self.jenkins.api_token),
            request_timeout: Duration::from_secs(self.jenkins.request_timeout_secs),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.monitor.interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JenkinsConfig {
    #[serde(default)]
    pub base_url: String,

    /// Accepts a single string or a list; always stored as a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub views: Vec<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            views: Vec::new(),
            username: None,
            api_token: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Write messages to the log only.
    #[default]
    Log,
    /// POST messages to a chat webhook.
    Webhook,
}

impl std::fmt::Display for NotifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Log => write!(f, "log"),
            Self::Webhook => write!(f, "webhook"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub kind: NotifierKind,

    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default)]
    pub channel: String,

    #[serde(default = "default_message_prefix")]
    pub message_prefix: String,

    /// Bound on one webhook delivery.
    #[serde(default = "default_notify_timeout")]
    pub request_timeout_secs: u64,
}

impl NotifierConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            kind: NotifierKind::default(),
            webhook_url: None,
            channel: String::new(),
            message_prefix: default_message_prefix(),
            request_timeout_secs: default_notify_timeout(),
        }
    }
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_notify_timeout() -> u64 {
    DEFAULT_NOTIFY_TIMEOUT_SECS
}

fn default_message_prefix() -> String {
    DEFAULT_MESSAGE_PREFIX.to_string()
}

pub(super) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(view) => vec![view],
        OneOrMany::Many(views) => views,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_view_becomes_list() {
        let config: BuildwatchConfig = toml::from_str(
            r#"
[jenkins]
base_url = "http://ci:8088"
views = "view/here/"
"#,
        )
        .unwrap();

        assert_eq!(config.jenkins.views, vec!["view/here/".to_string()]);
    }

    #[test]
    fn test_view_list_keeps_order() {
        let config: BuildwatchConfig = toml::from_str(
            r#"
[jenkins]
views = ["view/b/", "view/a/"]
"#,
        )
        .unwrap();

        assert_eq!(config.jenkins.views, vec!["view/b/", "view/a/"]);
    }

    #[test]
    fn test_defaults() {
        let config: BuildwatchConfig = toml::from_str("").unwrap();

        assert_eq!(config.monitor.interval_secs, DEFAULT_INTERVAL_SECS);
        assert_eq!(config.jenkins.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.notifier.kind, NotifierKind::Log);
        assert_eq!(config.notifier.message_prefix, "[Jenkins] ");
        assert_eq!(config.notifier.request_timeout(), Duration::from_secs(10));
        assert!(config.jenkins.views.is_empty());
    }

    #[test]
    fn test_jenkins_settings_drop_blank_credentials() {
        let mut config = BuildwatchConfig::default();
        config.jenkins.base_url = " http://ci:8088/ ".to_string();
        config.jenkins.views = vec!["view/here/".to_string()];
        config.jenkins.username = Some("  ".to_string());
        config.jenkins.api_token = Some("secret".to_string());

        let settings = config.jenkins_settings();
        assert_eq!(settings.server_url, "http://ci:8088/");
        assert_eq!(settings.username, None);
        assert_eq!(settings.api_token.as_deref(), Some("secret"));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }
}
