//! Client configuration
//!
//! Settings are layered: built-in defaults, then the environment
//! (`PROPMAN_API_URL`, `PROPMAN_TIMEOUT_SECS`), then an optional YAML file,
//! then whatever the caller sets on the builder.

use crate::error::{Error, Result};
use crate::http::UserMessages;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Deployment host used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://propman-api.onrender.com/api";

/// Environment variable holding the API base URL
pub const BASE_URL_ENV: &str = "PROPMAN_API_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "PROPMAN_TIMEOUT_SECS";

/// Location of the login screen
pub const DEFAULT_LOGIN_PATH: &str = "/login";

// ============================================================================
// Retry Config
// ============================================================================

/// Settings for the rate-limit retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on every further retry
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is appended to (includes `/api`)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// UI location of the login screen
    pub login_path: String,
    /// Rate-limit retry settings
    pub retry: RetryConfig,
    /// Catalogue of user-facing failure messages
    pub messages: UserMessages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("propman-client/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            retry: RetryConfig::default(),
            messages: UserMessages::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.try_build()
    }

    /// Defaults overlaid with variables from `lookup`
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::builder().with_vars(lookup)?.try_build()
    }

    /// Environment config overlaid with a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().with_env()?.with_yaml_file(path)?.try_build()
    }

    /// Parse YAML text on top of the defaults (environment is ignored)
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::builder().with_yaml_str(yaml)?.try_build()
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::invalid_value("timeout", "must be greater than zero"));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::invalid_value("retry.max_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

/// On-disk shape of the YAML config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    user_agent: Option<String>,
    #[serde(default)]
    login_path: Option<String>,
    #[serde(default)]
    headers: HashMap<String, String>,
    #[serde(default)]
    retry: Option<RetryFile>,
    #[serde(default)]
    messages: Option<UserMessages>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RetryFile {
    #[serde(default)]
    max_attempts: Option<u32>,
    #[serde(default)]
    base_delay_ms: Option<u64>,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for client config
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Start from an existing config instead of the defaults
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Overlay `PROPMAN_API_URL` and `PROPMAN_TIMEOUT_SECS` from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Overlay environment-style variables from `lookup`; blank values are ignored
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        if let Some(url) = var(BASE_URL_ENV) {
            self.config.base_url = url.trim().to_string();
        }

        if let Some(raw) = var(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(TIMEOUT_ENV, format!("not a number: {raw}")))?;
            self.config.timeout = Duration::from_secs(secs);
        }

        Ok(self)
    }

    /// Overlay a YAML config file
    pub fn with_yaml_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        self.with_yaml_str(&contents)
    }

    /// Overlay YAML config text
    pub fn with_yaml_str(mut self, yaml: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        let config = &mut self.config;

        if let Some(url) = file.base_url {
            config.base_url = url;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = file.user_agent {
            config.user_agent = agent;
        }
        if let Some(login_path) = file.login_path {
            config.login_path = login_path;
        }
        config.default_headers.extend(file.headers);
        if let Some(retry) = file.retry {
            if let Some(attempts) = retry.max_attempts {
                config.retry.max_attempts = attempts;
            }
            if let Some(ms) = retry.base_delay_ms {
                config.retry.base_delay = Duration::from_millis(ms);
            }
        }
        if let Some(messages) = file.messages {
            config.messages = messages;
        }

        Ok(self)
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry policy parameters
    pub fn retry(mut self, max_attempts: u32, base_delay: Duration) -> Self {
        self.config.retry = RetryConfig {
            max_attempts,
            base_delay,
        };
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the login screen location
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.config.login_path = path.into();
        self
    }

    /// Replace the message catalogue
    pub fn messages(mut self, messages: UserMessages) -> Self {
        self.config.messages = messages;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }

    /// Build the config and validate the merged result
    pub fn try_build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(1000));
        assert_eq!(config.login_path, "/login");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:5000/api")
            .timeout(Duration::from_secs(3))
            .retry(5, Duration::from_millis(50))
            .header("X-Client", "cli")
            .user_agent("test-agent/1.0")
            .login_path("/signin")
            .build();

        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay, Duration::from_millis(50));
        assert_eq!(
            config.default_headers.get("X-Client"),
            Some(&"cli".to_string())
        );
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.login_path, "/signin");
    }

    #[test]
    fn test_from_vars_overrides_defaults() {
        let config = ClientConfig::from_vars(|key| match key {
            BASE_URL_ENV => Some("http://10.0.0.2:8080/api".to_string()),
            TIMEOUT_ENV => Some("25".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.base_url, "http://10.0.0.2:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(25));
    }

    #[test]
    fn test_from_vars_empty_url_keeps_default() {
        let config = ClientConfig::from_vars(|key| match key {
            BASE_URL_ENV => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_vars_rejects_bad_timeout() {
        let result = ClientConfig::from_vars(|key| match key {
            TIMEOUT_ENV => Some("soon".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(Error::InvalidConfigValue { .. })));
    }

    #[test]
    fn test_from_vars_blank_timeout_keeps_default() {
        let config = ClientConfig::from_vars(|key| match key {
            TIMEOUT_ENV => Some(String::new()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_vars_rejects_bad_url() {
        let result = ClientConfig::from_vars(|key| match key {
            BASE_URL_ENV => Some("not a url".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_yaml_file_overrides_bad_env_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: \"https://good.example.com/api\"").unwrap();

        let config = ClientConfig::builder()
            .with_vars(|key| match key {
                BASE_URL_ENV => Some("not a url".to_string()),
                _ => None,
            })
            .unwrap()
            .with_yaml_file(file.path())
            .unwrap()
            .try_build()
            .unwrap();

        assert_eq!(config.base_url, "https://good.example.com/api");
    }

    #[test]
    fn test_builder_overrides_bad_env_url() {
        let config = ClientConfig::builder()
            .with_vars(|key| match key {
                BASE_URL_ENV => Some("not a url".to_string()),
                TIMEOUT_ENV => Some("7".to_string()),
                _ => None,
            })
            .unwrap()
            .base_url("http://localhost:5000/api")
            .try_build()
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_yaml_overrides_env_timeout() {
        let config = ClientConfig::builder()
            .with_vars(|key| match key {
                TIMEOUT_ENV => Some("30".to_string()),
                _ => None,
            })
            .unwrap()
            .with_yaml_str("timeout_secs: 5\n")
            .unwrap()
            .try_build()
            .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_try_build_validates_merged_config() {
        let result = ClientConfig::builder()
            .base_url("ftp://host/api")
            .try_build();
        assert!(matches!(result, Err(Error::InvalidConfigValue { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig::builder().base_url("not a url").build();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig::builder().base_url("ftp://host/api").build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = ClientConfig::builder()
            .retry(0, Duration::from_millis(10))
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_yaml_str() {
        let config = ClientConfig::from_yaml_str(
            r#"
base_url: "http://localhost:5000/api"
timeout_secs: 4
headers:
  X-Tenant: "north"
retry:
  max_attempts: 2
  base_delay_ms: 250
messages:
  not_found: "Recurso no encontrado"
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(4));
        assert_eq!(config.default_headers.get("X-Tenant").unwrap(), "north");
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.base_delay, Duration::from_millis(250));
        assert_eq!(config.messages.not_found, "Recurso no encontrado");
        // Unset messages keep their defaults
        assert_eq!(
            config.messages.forbidden,
            UserMessages::default().forbidden
        );
    }

    #[test]
    fn test_from_yaml_rejects_unknown_keys() {
        let result = ClientConfig::from_yaml_str("base_urll: http://x/api\n");
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: \"https://staging.example.com/api\"").unwrap();

        let config = ClientConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://staging.example.com/api");
    }
}
