//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file, applies the
//! `PORT` environment override, and defines the fixed service identity,
//! Cache-Control header values and default paths. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

// =============================================================================
// Service Identity
// =============================================================================

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "personal-platform";

/// Human-readable title reported by the index descriptor
pub const SERVICE_TITLE: &str = "Personal Platform API";

/// API version reported by the index descriptor
pub const SERVICE_VERSION: &str = "1.0.0";

// =============================================================================
// Route Paths
// =============================================================================

pub const HEALTH_PATH: &str = "/health";
pub const INDEX_PATH: &str = "/";
pub const GENERATE_PATH: &str = "/api/generate";

/// Every API route, in canonical form
pub const ROUTE_PATHS: [&str; 3] = [HEALTH_PATH, INDEX_PATH, GENERATE_PATH];

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// API responses carry a fresh timestamp or echo the request, so they must never
// be served from a shared cache. Static assets revalidate on every request.

/// Static assets - always revalidate
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 0;

pub const CACHE_CONTROL_API: &str = "no-store";

pub const CACHE_CONTROL_STATIC: &str =
    formatcp!("public, max-age={}", HTTP_CACHE_STATIC_MAX_AGE);

/// Error responses (400, 404, 500)
pub const CACHE_CONTROL_ERROR: &str = "no-store";

// =============================================================================
// Defaults
// =============================================================================

/// Default configuration file path, used when it exists and no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable overriding `http.port`
pub const PORT_ENV_VAR: &str = "PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Largest accepted request body (100 KiB)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Seconds in-flight requests get to finish after a shutdown signal
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Directory for static files
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "personal_platform=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Static file serving
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Maximum request body size in bytes
    #[serde(default = "HttpServerConfig::default_body_limit")]
    pub body_limit_bytes: usize,
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            body_limit_bytes: Self::default_body_limit(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_body_limit() -> usize {
        DEFAULT_BODY_LIMIT_BYTES
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    /// Resolve host and port into a bindable socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            ConfigError::Validation(format!("Invalid http.host '{}': {}", self.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// Directory served for paths no API route matches
    #[serde(default = "StaticFilesConfig::default_dir")]
    pub dir: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

impl StaticFilesConfig {
    fn default_dir() -> String {
        DEFAULT_STATIC_DIR.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when it
    /// exists, falling back to built-in defaults. `PORT` is applied last.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        let port = std::env::var(PORT_ENV_VAR).ok();
        config.apply_port_override(port.as_deref())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Override `http.port` with a `PORT`-style value. Unset or empty values are
    /// ignored.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };

        self.http.port = raw.parse().map_err(|_| {
            ConfigError::Validation(format!("{} must be a port number, got '{}'", PORT_ENV_VAR, raw))
        })?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.http.socket_addr()?;

        if self.http.body_limit_bytes == 0 {
            return Err(ConfigError::Validation(
                "http.body_limit_bytes must be greater than zero".to_string(),
            ));
        }

        match self.logging.format.to_ascii_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_all_interfaces_on_8080() {
        let config = AppConfig::default();
        let addr = config.http.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.static_files.dir, "public");
        assert_eq!(config.http.body_limit_bytes, 102400);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.port, DEFAULT_PORT);
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.logging.format, DEFAULT_LOG_FORMAT);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [http]
            port = 3000

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.http.shutdown_grace_seconds, DEFAULT_SHUTDOWN_GRACE_SECS);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = AppConfig::from_toml("[http\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_port_override_replaces_configured_port() {
        let mut config = AppConfig::default();
        config.apply_port_override(Some("9090")).unwrap();
        assert_eq!(config.http.port, 9090);
    }

    #[test]
    fn test_port_override_ignores_unset_and_empty() {
        let mut config = AppConfig::default();
        config.apply_port_override(None).unwrap();
        config.apply_port_override(Some("")).unwrap();
        config.apply_port_override(Some("  ")).unwrap();
        assert_eq!(config.http.port, DEFAULT_PORT);
    }

    #[test]
    fn test_port_override_rejects_garbage() {
        let mut config = AppConfig::default();
        let err = config.apply_port_override(Some("eighty")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_validate_rejects_bad_host() {
        let mut config = AppConfig::default();
        config.http.host = "not-an-ip".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        std::fs::write(&path, "[static_files]\ndir = \"assets\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.static_files.dir, "assets");
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = AppConfig::from_file("/nonexistent/personal-platform.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
