//! TOML-based configuration for authgate
//!
//! Infrastructure settings live in `authgate.toml`; secrets never do. The
//! file names the environment variables that hold them (`*_env` keys), and
//! `.env` is loaded into the process environment before resolution.
//!
//! The configuration is read once at startup and is immutable afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from authgate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthgateConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub cors: CorsConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Default tracing filter; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT signing secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Connection string used when `url_env` is unset or empty.
    /// `:memory:`, a file path, or a `libsql://` URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Environment variable that overrides `url`
    #[serde(default = "default_database_url_env")]
    pub url_env: Option<String>,

    /// Environment variable holding the auth token for a remote database
    pub token_env: Option<String>,
}

fn default_database_url() -> String {
    "./data/authgate.db".to_string()
}

fn default_database_url_env() -> Option<String> {
    Some("DB_CONNECTION_STRING".to_string())
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            url_env: default_database_url_env(),
            token_env: None,
        }
    }
}

// ============= CORS Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5500".to_string(),
        "http://127.0.0.1:5500".to_string(),
    ]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl AuthgateConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load the file if present, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::FileNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: AuthgateConfig = toml::from_str(content)?;
        config.validate_structure()?;
        Ok(config)
    }

    /// Checks that need no environment access.
    fn validate_structure(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.auth.jwt_secret_env.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.jwt_secret_env must name an environment variable".to_string(),
            ));
        }
        Ok(())
    }

    /// Full validation including secret availability. The server refuses to
    /// start when this fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_structure()?;
        self.jwt_secret()?;
        Ok(())
    }

    fn require_env(&self, name: &str) -> Result<String, ConfigError> {
        self.resolve_env(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    /// Get a resolved value from an env var reference. Empty values count as
    /// unset.
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.is_empty())
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        self.require_env(&self.auth.jwt_secret_env)
    }

    /// Effective store connection string: `url_env` when set, else `url`.
    pub fn database_url(&self) -> String {
        self.database
            .url_env
            .as_deref()
            .and_then(|env| self.resolve_env(env))
            .unwrap_or_else(|| self.database.url.clone())
    }

    /// Auth token for a remote store, if one is configured.
    pub fn database_token(&self) -> Option<String> {
        self.database
            .token_env
            .as_deref()
            .and_then(|env| self.resolve_env(env))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"
log_format = "json"

[auth]
jwt_secret_env = "AUTHGATE_TEST_SECRET"

[database]
url = ":memory:"
url_env = "AUTHGATE_TEST_DB_URL"

[cors]
allowed_origins = ["https://app.example.com"]
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = AuthgateConfig::parse(&create_test_config()).expect("should parse");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.auth.jwt_secret_env, "AUTHGATE_TEST_SECRET");
        assert_eq!(config.database.url, ":memory:");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://app.example.com".to_string()]
        );
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults() {
        let config = AuthgateConfig::parse("").expect("empty config is valid");

        assert_eq!(config, AuthgateConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(config.database.url, "./data/authgate.db");
        assert_eq!(
            config.database.url_env.as_deref(),
            Some("DB_CONNECTION_STRING")
        );
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn test_empty_secret_env_name_rejected() {
        let result = AuthgateConfig::parse("[auth]\njwt_secret_env = \"\"\n");

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let result = AuthgateConfig::parse("[server]\nlog_format = \"xml\"\n");

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_secret_fails_validation() {
        let mut config = AuthgateConfig::default();
        config.auth.jwt_secret_env = "AUTHGATE_TEST_SECRET_DEFINITELY_UNSET".to_string();

        let result = config.validate();

        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(name)) if name == "AUTHGATE_TEST_SECRET_DEFINITELY_UNSET")
        );
    }

    #[test]
    fn test_database_url_falls_back_when_env_unset() {
        let mut config = AuthgateConfig::default();
        config.database.url = ":memory:".to_string();
        config.database.url_env = Some("AUTHGATE_TEST_DB_URL_DEFINITELY_UNSET".to_string());

        assert_eq!(config.database_url(), ":memory:");
        assert_eq!(config.database_token(), None);
    }

    #[test]
    fn test_load_file_and_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("authgate.toml");

        assert!(matches!(
            AuthgateConfig::load(&path),
            Err(ConfigError::FileNotFound(_))
        ));
        assert_eq!(
            AuthgateConfig::load_or_default(&path).unwrap(),
            AuthgateConfig::default()
        );

        let mut file = fs::File::create(&path).unwrap();
        file.write_all(create_test_config().as_bytes()).unwrap();

        let config = AuthgateConfig::load(&path).expect("should load");
        assert_eq!(config.server.port, 8080);
    }
}
