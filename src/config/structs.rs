use serde::{Deserialize, Serialize};

/// Application configuration
///
/// Loaded from a TOML file with environment variable overrides. Two values
/// have no usable default and are checked by [`AppConfig::validate`]:
/// the database URL and the public base URL the shareable links are built on.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 允许跨域访问 API（默认同源）
    #[serde(default)]
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlite | mysql | postgres | mariadb
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL the registration links embed, e.g. `https://go.example.com`.
    #[serde(default)]
    pub public_base_url: String,
    /// Destination every issued code redirects to after registration.
    #[serde(default = "default_destination_url")]
    pub destination_url: String,
    /// Length of the random suffix appended to generated codes.
    #[serde(default = "default_code_suffix_length")]
    pub code_suffix_length: usize,
    /// Bearer token protecting the registry API. Empty leaves it open.
    #[serde(default)]
    pub admin_token: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            public_base_url: String::new(),
            destination_url: default_destination_url(),
            code_suffix_length: default_code_suffix_length(),
            admin_token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Empty or absent logs to stdout.
    #[serde(default)]
    pub file: Option<String>,
    /// text | json
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            format: default_log_format(),
            enable_rotation: true,
            max_backups: default_max_backups(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_backend() -> String {
    "sqlite".to_string()
}

fn default_destination_url() -> String {
    "https://example.com/".to_string()
}

fn default_code_suffix_length() -> usize {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_backups() -> u32 {
    7
}
