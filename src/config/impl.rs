use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error, warn};

use super::AppConfig;
use crate::errors::{Result, ScangateError};
use crate::utils::url_validator::validate_url;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = [
            "config.toml",
            "scangate.toml",
            "config/config.toml",
            "/etc/scangate/config.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<AppConfig>(&content) {
                        Ok(config) => return config,
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn override_with_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            } else {
                error!("Invalid SERVER_PORT: {}", port);
            }
        }
        if let Ok(cors) = env::var("CORS_ENABLED") {
            self.server.cors_enabled = cors == "true";
        }

        if let Ok(backend) = env::var("DATABASE_BACKEND") {
            self.database.backend = backend;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(base_url) = env::var("PUBLIC_BASE_URL") {
            self.app.public_base_url = base_url;
        }
        if let Ok(destination) = env::var("DESTINATION_URL") {
            self.app.destination_url = destination;
        }
        if let Ok(length) = env::var("CODE_SUFFIX_LENGTH") {
            if let Ok(length) = length.parse() {
                self.app.code_suffix_length = length;
            } else {
                error!("Invalid CODE_SUFFIX_LENGTH: {}", length);
            }
        }
        if let Ok(token) = env::var("ADMIN_TOKEN") {
            self.app.admin_token = token;
        }

        if let Ok(level) = env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Check the values that have no usable default.
    ///
    /// A missing database URL or public base URL is fatal at startup.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ScangateError::configuration(
                "database.url is not set (DATABASE_URL)",
            ));
        }
        if self.app.public_base_url.is_empty() {
            return Err(ScangateError::configuration(
                "app.public_base_url is not set (PUBLIC_BASE_URL)",
            ));
        }
        if let Err(e) = validate_url(&self.app.public_base_url) {
            return Err(ScangateError::configuration(format!(
                "app.public_base_url is not a valid URL: {}",
                e
            )));
        }
        if let Err(e) = validate_url(&self.app.destination_url) {
            return Err(ScangateError::configuration(format!(
                "app.destination_url is not a valid URL: {}",
                e
            )));
        }
        if self.app.code_suffix_length == 0 {
            return Err(ScangateError::configuration(
                "app.code_suffix_length must be at least 1",
            ));
        }
        Ok(())
    }

    /// Generate a sample TOML configuration file
    pub fn generate_sample_config() -> String {
        let sample_config = AppConfig::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// Save current configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ScangateError::serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Get the global configuration instance
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::load)
}

/// Initialize the global configuration
pub fn init_config() {
    CONFIG.get_or_init(AppConfig::load);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.app.code_suffix_length, 7);
        assert!(!config.server.cors_enabled);
        assert!(config.app.admin_token.is_empty());
    }

    #[test]
    fn test_validate_requires_database_url() {
        let mut config = AppConfig::default();
        config.app.public_base_url = "https://go.example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.message().contains("database.url"));
    }

    #[test]
    fn test_validate_requires_public_base_url() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite://scangate.db?mode=rwc".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.message().contains("public_base_url"));
    }

    #[test]
    fn test_validate_rejects_bad_destination() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite://scangate.db?mode=rwc".to_string();
        config.app.public_base_url = "https://go.example.com".to_string();
        config.app.destination_url = "javascript:alert(1)".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite://scangate.db?mode=rwc".to_string();
        config.app.public_base_url = "https://go.example.com".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_config_roundtrip() {
        let sample = AppConfig::generate_sample_config();
        let parsed: AppConfig = toml::from_str(&sample).expect("sample config should parse");
        assert_eq!(parsed.server.port, 8080);
    }
}
