//! Configuration for the authentication stack
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. `Authflow.toml` in `AUTHFLOW_CONFIG_DIR` (if set and present)
//! 3. `Authflow.toml` in the current directory (if present)
//! 4. Built-in defaults

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthflowSettings {
    pub api: ApiSettings,
    pub token_store: TokenStoreSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL the auth endpoints are resolved against
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenStoreSettings {
    /// Path of the persisted token file; `None` keeps tokens in memory only
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AuthflowSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// Also initializes the logger (idempotent; a second call leaves the
    /// existing logger in place).
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);
        settings.init_logging();
        Ok(settings)
    }

    /// Parse settings from a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this schema.
    pub fn from_toml(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(basic_toml::from_str(content)?)
    }

    /// Load base settings from `Authflow.toml` or fall back to defaults
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = PathBuf::from("Authflow.toml");
        if default_config_path.exists() {
            let toml_content = fs::read_to_string(&default_config_path)?;
            settings = Self::from_toml(&toml_content)?;
            log::info!("loaded settings from {}", default_config_path.display());
        }

        if let Ok(config_dir) = std::env::var("AUTHFLOW_CONFIG_DIR") {
            let override_path = std::path::Path::new(&config_dir).join("Authflow.toml");
            if override_path.exists() {
                let toml_content = fs::read_to_string(&override_path)?;
                settings = Self::from_toml(&toml_content)?;
                log::info!("overriding settings from {}", override_path.display());
            }
        }

        Ok(settings)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_api_env_overrides(&mut settings.api);
        Self::apply_token_store_env_overrides(&mut settings.token_store);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    fn apply_api_env_overrides(api_settings: &mut ApiSettings) {
        if let Ok(base_url) = std::env::var("AUTHFLOW_API_BASE_URL") {
            api_settings.base_url = base_url;
        }
        Self::apply_numeric_env_override(
            "AUTHFLOW_CONNECT_TIMEOUT_SECS",
            &mut api_settings.connect_timeout_secs,
        );
        Self::apply_numeric_env_override(
            "AUTHFLOW_REQUEST_TIMEOUT_SECS",
            &mut api_settings.request_timeout_secs,
        );
    }

    fn apply_token_store_env_overrides(store_settings: &mut TokenStoreSettings) {
        if let Ok(path) = std::env::var("AUTHFLOW_TOKEN_PATH") {
            store_settings.path = if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(level) = std::env::var("AUTHFLOW_LOG_LEVEL") {
            logging_settings.level = level;
        }
    }

    fn apply_numeric_env_override(env_var: &str, target: &mut u64) {
        if let Ok(value_str) = std::env::var(env_var) {
            if let Ok(value) = value_str.parse::<u64>() {
                *target = value;
            }
        }
    }

    /// Initialize the logger honoring `RUST_LOG` over the configured level
    fn init_logging(&self) {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&self.logging.level);
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        // A second load keeps the already-installed logger.
        let _ = builder.try_init();
    }
}
