use crate::components::upcoming::{CardConfig, RawCardConfig};
use crate::error::{config_error, env_error, CardResult};
use dotenvy::dotenv;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the card configuration file
pub const DEFAULT_CARD_CONFIG_PATH: &str = "config/card.toml";

/// Default refresh interval in seconds
pub const DEFAULT_REFRESH_INTERVAL: u64 = 300;

/// Application configuration for the terminal shell
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Home Assistant instance
    pub hass_url: String,
    /// Long-lived access token for Home Assistant
    pub hass_token: String,
    /// Path the card configuration was read from
    pub card_config_path: PathBuf,
    /// Resolved card configuration
    pub card: CardConfig,
    /// Seconds between refreshes, 0 renders once
    pub refresh_interval: u64,
}

impl AppConfig {
    /// Load configuration from environment and the card config file
    pub fn load() -> CardResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let hass_url = env::var("HASS_URL").map_err(|_| env_error("HASS_URL"))?;
        let hass_token = env::var("HASS_TOKEN").map_err(|_| env_error("HASS_TOKEN"))?;

        let card_config_path = env::var("CARD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CARD_CONFIG_PATH));

        let refresh_interval = match env::var("REFRESH_INTERVAL") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid REFRESH_INTERVAL format"))?,
            Err(_) => DEFAULT_REFRESH_INTERVAL,
        };

        let card = load_card_config(&card_config_path)?;

        Ok(AppConfig {
            hass_url,
            hass_token,
            card_config_path,
            card,
            refresh_interval,
        })
    }
}

/// Read and resolve a card configuration file
pub fn load_card_config(path: &Path) -> CardResult<CardConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        config_error(&format!(
            "Failed to read card config {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_card_config(&content)
}

/// Parse a card configuration from TOML and apply defaults
pub fn parse_card_config(content: &str) -> CardResult<CardConfig> {
    let raw: RawCardConfig = toml::from_str(content)?;
    Ok(raw.resolve())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::upcoming::{DateFormat, Layout, TimeFormat};

    #[test]
    fn test_parse_card_config() {
        let config = parse_card_config(
            r#"
            entity = "calendar.family"
            title = "Family"
            max_events = 3
            layout = "horizontal"
            time_format = "12h"
            date_format = "long"
            show_time = false
            "#,
        )
        .unwrap();

        assert_eq!(config.entity, "calendar.family");
        assert_eq!(config.title.as_deref(), Some("Family"));
        assert_eq!(config.max_events, 3);
        assert_eq!(config.days_ahead, 7);
        assert_eq!(config.layout, Layout::Horizontal);
        assert_eq!(config.time_format, TimeFormat::TwelveHour);
        assert_eq!(config.date_format, DateFormat::Long);
        assert!(!config.show_time);
        assert!(config.show_date);
    }

    #[test]
    fn test_parse_card_config_rejects_bad_enum() {
        let result = parse_card_config(
            r#"
            entity = "calendar.family"
            layout = "diagonal"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_card_config_file() {
        let result = load_card_config(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }
}
