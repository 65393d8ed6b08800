use crate::utils::error::{RankingError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_LINK_BASE: &str = "https://www.amazon.co.jp";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://images-na.ssl-images-amazon.com/images/I/71h6PpGaz9L._AC_UL600_SR600,600_.jpg";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub lookup: LookupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_body_bytes: usize,
    /// Origin used in share links; the browser's origin is used when unset.
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_body_bytes: 64 * 1024,
            public_base_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    #[default]
    Stub,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub mode: LookupMode,
    pub endpoint: Option<String>,
    pub timeout_seconds: u64,
    pub link_base: String,
    pub placeholder_image: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            mode: LookupMode::Stub,
            endpoint: None,
            timeout_seconds: 5,
            link_base: DEFAULT_LINK_BASE.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RankingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RankingError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind", &self.server.bind)
    }

    pub fn validate_config(&self) -> Result<()> {
        self.bind_addr()?;
        validation::validate_positive_number("server.max_body_bytes", self.server.max_body_bytes, 1024)?;
        if let Some(base) = &self.server.public_base_url {
            validation::validate_url("server.public_base_url", base)?;
        }

        validation::validate_range("lookup.timeout_seconds", self.lookup.timeout_seconds, 1, 60)?;
        validation::validate_url("lookup.link_base", &self.lookup.link_base)?;
        validation::validate_url("lookup.placeholder_image", &self.lookup.placeholder_image)?;

        if self.lookup.mode == LookupMode::Http {
            let endpoint =
                self.lookup
                    .endpoint
                    .as_deref()
                    .ok_or_else(|| RankingError::ConfigError {
                        message: "lookup.endpoint is required when lookup.mode = \"http\""
                            .to_string(),
                    })?;
            validation::validate_url("lookup.endpoint", endpoint)?;
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.lookup.mode, LookupMode::Stub);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:8080"
max_body_bytes = 4096
public_base_url = "https://rank.example.com"

[logging]
format = "json"

[lookup]
mode = "http"
endpoint = "https://catalog.example.com/items"
timeout_seconds = 3
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.lookup.mode, LookupMode::Http);
        assert_eq!(config.lookup.timeout(), Duration::from_secs(3));
        assert_eq!(config.lookup.link_base, DEFAULT_LINK_BASE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_mode_requires_endpoint() {
        let config = AppConfig::from_toml_str("[lookup]\nmode = \"http\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(RankingError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = AppConfig::from_toml_str("[server]\nbind = \"nowhere\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[lookup]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());

        assert!(AppConfig::from_toml_str("[logging]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RANKIT_TEST_CATALOG", "https://env.example.com/catalog");
        let config = AppConfig::from_toml_str(
            "[lookup]\nmode = \"http\"\nendpoint = \"${RANKIT_TEST_CATALOG}\"\n",
        )
        .unwrap();
        assert_eq!(
            config.lookup.endpoint.as_deref(),
            Some("https://env.example.com/catalog")
        );
        std::env::remove_var("RANKIT_TEST_CATALOG");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = \"127.0.0.1:4000\"").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:4000");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            AppConfig::from_file("/definitely/not/here.toml"),
            Err(RankingError::IoError(_))
        ));
    }
}
