use super::schema::{
    non_blank,
    BuildwatchConfig,
    JenkinsConfig,
    MonitorConfig,
    NotifierConfig,
    NotifierKind,
};

const MIN_RECOMMENDED_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<ConfigWarning>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>, code: ConfigErrorCode) {
        self.errors.push(ConfigError {
            field: field.to_string(),
            message: message.into(),
            code,
        });
    }

    pub fn add_warning(
        &mut self, field: &str, message: impl Into<String>, code: ConfigWarningCode,
    ) {
        self.warnings.push(ConfigWarning {
            field: field.to_string(),
            message: message.into(),
            code,
        });
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
    pub code: ConfigErrorCode,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    MissingRequired,
    InvalidValue,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired => write!(f, "MISSING_REQUIRED"),
            Self::InvalidValue => write!(f, "INVALID_VALUE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub code: ConfigWarningCode,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarningCode {
    AggressiveInterval,
    UnusedSetting,
}

impl std::fmt::Display for ConfigWarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AggressiveInterval => write!(f, "AGGRESSIVE_INTERVAL"),
            Self::UnusedSetting => write!(f, "UNUSED"),
        }
    }
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &BuildwatchConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::validate_jenkins(&config.jenkins, &mut result);
        Self::validate_monitor(&config.monitor, &mut result);
        Self::validate_notifier(&config.notifier, &mut result);

        result
    }

    fn validate_jenkins(jenkins: &JenkinsConfig, result: &mut ValidationResult) {
        let base_url = jenkins.base_url.trim();
        if base_url.is_empty() {
            result.add_error(
                "jenkins.base_url",
                "Jenkins base URL is required",
                ConfigErrorCode::MissingRequired,
            );
        } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            result.add_error(
                "jenkins.base_url",
                format!("Expected an http(s) URL, got '{base_url}'"),
                ConfigErrorCode::InvalidValue,
            );
        }

        if jenkins.views.is_empty() {
            result.add_error(
                "jenkins.views",
                "At least one view must be configured",
                ConfigErrorCode::MissingRequired,
            );
        }
        for (idx, view) in jenkins.views.iter().enumerate() {
            if view.trim().is_empty() {
                result.add_error(
                    &format!("jenkins.views[{idx}]"),
                    "View path cannot be blank; use \"/\" for the root view",
                    ConfigErrorCode::InvalidValue,
                );
            }
        }

        match (
            non_blank(&jenkins.username).is_some(),
            non_blank(&jenkins.api_token).is_some(),
        ) {
            (true, false) => result.add_error(
                "jenkins.api_token",
                "API token is required when a username is set",
                ConfigErrorCode::MissingRequired,
            ),
            (false, true) => result.add_error(
                "jenkins.username",
                "Username is required when an API token is set",
                ConfigErrorCode::MissingRequired,
            ),
            _ => {}
        }

        if jenkins.request_timeout_secs == 0 {
            result.add_error(
                "jenkins.request_timeout_secs",
                "Request timeout must be at least one second",
                ConfigErrorCode::InvalidValue,
            );
        }
    }

    fn validate_monitor(monitor: &MonitorConfig, result: &mut ValidationResult) {
        if monitor.interval_secs == 0 {
            result.add_error(
                "monitor.interval_secs",
                "Polling interval must be a positive number of seconds",
                ConfigErrorCode::InvalidValue,
            );
        } else if monitor.interval_secs < MIN_RECOMMENDED_INTERVAL_SECS {
            result.add_warning(
                "monitor.interval_secs",
                format!(
                    "Polling every {}s puts avoidable load on the CI server",
                    monitor.interval_secs
                ),
                ConfigWarningCode::AggressiveInterval,
            );
        }
    }

    fn validate_notifier(notifier: &NotifierConfig, result: &mut ValidationResult) {
        let webhook_url = non_blank(&notifier.webhook_url);

        match notifier.kind {
            NotifierKind::Webhook => match webhook_url {
                None => result.add_error(
                    "notifier.webhook_url",
                    "Webhook URL is required when kind = 'webhook'",
                    ConfigErrorCode::MissingRequired,
                ),
                Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                    result.add_error(
                        "notifier.webhook_url",
                        format!("Expected an http(s) URL, got '{url}'"),
                        ConfigErrorCode::InvalidValue,
                    )
                }
                Some(_) => {}
            },
            NotifierKind::Log => {
                if webhook_url.is_some() {
                    result.add_warning(
                        "notifier.webhook_url",
                        "Webhook URL is ignored when kind = 'log'",
                        ConfigWarningCode::UnusedSetting,
                    );
                }
            }
        }

        if notifier.request_timeout_secs == 0 {
            result.add_error(
                "notifier.request_timeout_secs",
                "Delivery timeout must be at least one second",
                ConfigErrorCode::InvalidValue,
            );
        }

        if notifier.kind == NotifierKind::Webhook && notifier.channel.trim().is_empty() {
            result.add_warning(
                "notifier.channel",
                "No channel configured; the webhook's default channel will be used",
                ConfigWarningCode::UnusedSetting,
            );
        }
    }
}

impl BuildwatchConfig {
    pub fn validate(&self) -> ValidationResult {
        ConfigValidator::validate(self)
    }
}
