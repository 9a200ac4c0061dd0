use std::{env, fmt, path::PathBuf, time::Duration};

use url::Url;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const PMS_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub enum ConfigError {
    Missing(String),
    Invalid { key: String, message: String },
    Io { path: String, source: std::io::Error },
    Parse { path: String, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, message } => write!(f, "Invalid {}: {}", key, message),
            ConfigError::Io { path, source } => write!(f, "Failed to read {}: {}", path, source),
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Which pricing data set to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn default_pricing_path(&self) -> PathBuf {
        match self {
            Environment::Development => PathBuf::from("config/pricing.dev.json"),
            Environment::Production => PathBuf::from("config/pricing.prod.json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub pricing_config_path: PathBuf,
    pub pms_base_url: Url,
    pub pms_api_key: Option<String>,
    pub pms_timeout: Duration,
    /// Origin the booking front end is served from. Any origin when unset.
    pub cors_origin: Option<String>,
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_name(&optional("APP_ENV").unwrap_or_default());

        let port = match optional("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT".to_string(),
                message: format!("'{}' is not a port number", port),
            })?,
            None => PORT,
        };

        let raw_url = optional("PMS_BASE_URL").ok_or_else(|| ConfigError::Missing("PMS_BASE_URL".to_string()))?;
        let pms_base_url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            key: "PMS_BASE_URL".to_string(),
            message: e.to_string(),
        })?;

        let pms_timeout = optional("PMS_TIMEOUT_SECS")
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(PMS_TIMEOUT_SECS));

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            environment,
            pricing_config_path: optional("PRICING_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| environment.default_pricing_path()),
            pms_base_url,
            pms_api_key: optional("PMS_API_KEY"),
            pms_timeout,
            cors_origin: optional("CORS_ALLOWED_ORIGIN"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 8] = [
        "APP_ENV",
        "HOST",
        "PORT",
        "PMS_BASE_URL",
        "PMS_API_KEY",
        "PMS_TIMEOUT_SECS",
        "PRICING_CONFIG_PATH",
        "CORS_ALLOWED_ORIGIN",
    ];

    fn clear() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_environment_names() {
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name("PROD"), Environment::Production);
        assert_eq!(Environment::from_name("staging"), Environment::Development);
        assert_eq!(Environment::from_name(""), Environment::Development);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear();
        env::set_var("PMS_BASE_URL", "https://pms.example.com/api/");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.host, HOST);
        assert_eq!(config.port, PORT);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.pricing_config_path, PathBuf::from("config/pricing.dev.json"));
        assert_eq!(config.pms_timeout, Duration::from_secs(PMS_TIMEOUT_SECS));
        assert!(config.pms_api_key.is_none());
        clear();
    }

    #[test]
    #[serial]
    fn test_from_env_production_and_overrides() {
        clear();
        env::set_var("APP_ENV", "production");
        env::set_var("PORT", "9090");
        env::set_var("PMS_BASE_URL", "https://pms.example.com/");
        env::set_var("PMS_API_KEY", "secret");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.pricing_config_path, PathBuf::from("config/pricing.prod.json"));
        assert_eq!(config.pms_api_key.as_deref(), Some("secret"));

        env::set_var("PRICING_CONFIG_PATH", "/etc/pricing.json");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.pricing_config_path, PathBuf::from("/etc/pricing.json"));
        clear();
    }

    #[test]
    #[serial]
    fn test_from_env_errors() {
        clear();
        assert!(matches!(AppConfig::from_env(), Err(ConfigError::Missing(_))));

        env::set_var("PMS_BASE_URL", "not a url");
        assert!(matches!(AppConfig::from_env(), Err(ConfigError::Invalid { .. })));

        env::set_var("PMS_BASE_URL", "https://pms.example.com/");
        env::set_var("PORT", "eighty");
        assert!(matches!(AppConfig::from_env(), Err(ConfigError::Invalid { .. })));
        clear();
    }
}
