use std::env;
use std::fmt;

use crate::applications::{FieldPolicy, KeyField, OutputFormat, ParseOptionError};

/// Distinguishes runtime behavior for different stages of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub queue: QueueConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let default_key = parse_var("CARD_QUEUE_KEY_FIELD", KeyField::Name)?;
        let field_policy = parse_var("CARD_QUEUE_FIELD_POLICY", FieldPolicy::Truncate)?;
        let output = parse_var("CARD_QUEUE_OUTPUT", OutputFormat::Text)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            queue: QueueConfig {
                default_key,
                field_policy,
                output,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_var<T>(variable: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseOptionError>,
{
    match env::var(variable) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .parse()
            .map_err(|source| ConfigError::InvalidOption { variable, source }),
        _ => Ok(default),
    }
}

/// Settings controlling how the queue matches and bounds applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub default_key: KeyField,
    pub field_policy: FieldPolicy,
    pub output: OutputFormat,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            default_key: KeyField::Name,
            field_policy: FieldPolicy::Truncate,
            output: OutputFormat::Text,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidOption {
        variable: &'static str,
        source: ParseOptionError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidOption { variable, source } => {
                write!(f, "{variable} is invalid: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidOption { source, .. } => Some(source),
        }
    }
}
