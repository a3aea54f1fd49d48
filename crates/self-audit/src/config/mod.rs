use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::audit::{Locale, ScoreThresholds};

/// Distinguishes runtime behavior for different stages of the service.
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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub audit: AuditSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                show_target: environment != AppEnvironment::Production,
            },
            audit: AuditSettings::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_target: bool,
}

/// Scoring boundaries and content selection for audits.
#[derive(Debug, Clone)]
pub struct AuditSettings {
    pub thresholds: ScoreThresholds,
    pub default_locale: Locale,
    /// Replaces the built-in questionnaire content when set.
    pub content_path: Option<PathBuf>,
    /// Printed in the report metadata block.
    pub organization: Option<String>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            thresholds: ScoreThresholds::STANDARD,
            default_locale: Locale::En,
            content_path: None,
            organization: None,
        }
    }
}

impl AuditSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let standard = ScoreThresholds::STANDARD;
        let thresholds = ScoreThresholds {
            critical_below: threshold_var("AUDIT_CRITICAL_BELOW", standard.critical_below)?,
            improvement_below: threshold_var(
                "AUDIT_IMPROVEMENT_BELOW",
                standard.improvement_below,
            )?,
            excellent_from: threshold_var("AUDIT_EXCELLENT_FROM", standard.excellent_from)?,
        };
        if !thresholds.is_ordered() {
            return Err(ConfigError::InvalidThresholds(thresholds));
        }

        let default_locale = match non_empty_var("AUDIT_DEFAULT_LOCALE") {
            Some(code) => {
                Locale::from_code(&code).map_err(|_| ConfigError::InvalidLocale(code))?
            }
            None => Locale::En,
        };

        Ok(Self {
            thresholds,
            default_locale,
            content_path: non_empty_var("AUDIT_CONTENT_PATH").map(PathBuf::from),
            organization: non_empty_var("AUDIT_ORGANIZATION"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn threshold_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber { name, value: raw }),
        None => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str, value: String },
    InvalidThresholds(ScoreThresholds),
    InvalidLocale(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a number, got '{value}'")
            }
            ConfigError::InvalidThresholds(thresholds) => write!(
                f,
                "audit thresholds must satisfy 0 < critical ({}) < improvement ({}) < excellent ({}) <= 100",
                thresholds.critical_below, thresholds.improvement_below, thresholds.excellent_from
            ),
            ConfigError::InvalidLocale(code) => {
                write!(f, "AUDIT_DEFAULT_LOCALE '{code}' is not a supported language")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidThresholds(_)
            | ConfigError::InvalidLocale(_) => None,
        }
    }
}
