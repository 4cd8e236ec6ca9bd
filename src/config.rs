use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Runtime configuration for menu collection
#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    /// User agent sent with every request; several sites reject bare clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Accept certificates that fail verification (some sites serve broken chains)
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Restaurants to run when the caller gives no selection; empty means all
    #[serde(default)]
    pub restaurants: Vec<String>,
    /// OCR engine settings
    #[serde(default)]
    pub ocr: OcrConfig,
}

/// Settings for the external OCR engine
#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    /// Executable to invoke
    #[serde(default = "default_ocr_command")]
    pub command: String,
    /// Language profile passed with `-l`
    #[serde(default = "default_ocr_language")]
    pub language: String,
    /// Page segmentation mode passed with `--psm` (6 = single uniform block of text)
    #[serde(default = "default_page_segmentation")]
    pub page_segmentation: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: default_ocr_command(),
            language: default_ocr_language(),
            page_segmentation: default_page_segmentation(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            accept_invalid_certs: false,
            restaurants: Vec::new(),
            ocr: OcrConfig::default(),
        }
    }
}

// Default value functions
fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/105.0.0.0 Safari/537.36".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_ocr_command() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "ces".to_string()
}

fn default_page_segmentation() -> u8 {
    6
}

impl MenuConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with LUNCH__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: LUNCH__OCR__LANGUAGE
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`MenuConfig::load`] for the precedence rules.
pub fn load_config() -> Result<MenuConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: LUNCH__OCR__COMMAND
        .add_source(
            Environment::with_prefix("LUNCH")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("restaurants")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_ocr_command(), "tesseract");
        assert_eq!(default_ocr_language(), "ces");
        assert_eq!(default_page_segmentation(), 6);
        assert!(default_user_agent().starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_menu_config_default() {
        let config = MenuConfig::default();
        assert!(!config.accept_invalid_certs);
        assert!(config.restaurants.is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.ocr.language, "ces");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "timeout = 5\nrestaurants = [\"arrows\"]\n[ocr]\nlanguage = \"eng\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: MenuConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.timeout, 5);
        assert_eq!(config.restaurants, vec!["arrows".to_string()]);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.command, "tesseract");
        assert!(config.user_agent.contains("Chrome"));
    }
}
