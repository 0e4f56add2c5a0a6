//! Application settings.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application settings, read from `settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Catalog fetch behavior
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Loop intervals
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// HTTP control endpoint
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram bot API settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// File locations relative to the storage directory
    #[serde(default)]
    pub paths: PathsConfig,

    /// Venue discovery endpoints and known cities
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings or return defaults if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Settings load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate settings values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.fetch.max_concurrent == 0 {
            return Err(AppError::validation("fetch.max_concurrent must be > 0"));
        }
        if self.schedule.availability_interval_secs == 0 {
            return Err(AppError::validation(
                "schedule.availability_interval_secs must be > 0",
            ));
        }
        if self.schedule.command_interval_secs == 0 {
            return Err(AppError::validation(
                "schedule.command_interval_secs must be > 0",
            ));
        }
        if self.server.enabled && self.server.bind.trim().is_empty() {
            return Err(AppError::validation("server.bind is empty"));
        }
        if self.telegram.api_base.trim().is_empty() {
            return Err(AppError::validation("telegram.api_base is empty"));
        }
        if !self.discovery.assortment_url_template.contains("{slug}") {
            return Err(AppError::validation(
                "discovery.assortment_url_template must contain {slug}",
            ));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Catalog fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum catalog requests in flight during one cycle
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Loop intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Delay between availability cycles
    #[serde(default = "defaults::availability_interval")]
    pub availability_interval_secs: u64,

    /// Delay between inbound command polls
    #[serde(default = "defaults::command_interval")]
    pub command_interval_secs: u64,
}

impl ScheduleConfig {
    pub fn availability_interval(&self) -> Duration {
        Duration::from_secs(self.availability_interval_secs)
    }

    pub fn command_interval(&self) -> Duration {
        Duration::from_secs(self.command_interval_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            availability_interval_secs: defaults::availability_interval(),
            command_interval_secs: defaults::command_interval(),
        }
    }
}

/// HTTP control endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::server_enabled")]
    pub enabled: bool,

    /// Socket address to listen on
    #[serde(default = "defaults::bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::server_enabled(),
            bind: defaults::bind(),
        }
    }
}

/// Telegram bot API settings. Credentials come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    #[serde(default = "defaults::parse_mode")]
    pub parse_mode: String,

    /// Text sent by the `/send-text` control route
    #[serde(default = "defaults::test_message")]
    pub test_message: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
            parse_mode: defaults::parse_mode(),
            test_message: defaults::test_message(),
        }
    }
}

/// File locations, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::venues_file")]
    pub venues_file: String,

    #[serde(default = "defaults::snapshot_file")]
    pub snapshot_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            venues_file: defaults::venues_file(),
            snapshot_file: defaults::snapshot_file(),
        }
    }
}

/// Venue discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Retail landing page, queried with `lat`/`lon`
    #[serde(default = "defaults::retail_page_url")]
    pub retail_page_url: String,

    /// Catalog endpoint for a venue; `{slug}` is replaced with the venue slug
    #[serde(default = "defaults::assortment_url_template")]
    pub assortment_url_template: String,

    #[serde(default = "defaults::cities")]
    pub cities: Vec<City>,
}

impl DiscoveryConfig {
    /// Find a city by id, case-insensitively.
    pub fn city(&self, id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id.eq_ignore_ascii_case(id))
    }

    /// Catalog endpoint for a venue slug.
    pub fn assortment_url(&self, slug: &str) -> String {
        self.assortment_url_template.replace("{slug}", slug)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            retail_page_url: defaults::retail_page_url(),
            assortment_url_template: defaults::assortment_url_template(),
            cities: defaults::cities(),
        }
    }
}

/// A city known to the discovery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

mod defaults {
    use super::City;

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; restock/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Schedule defaults
    pub fn availability_interval() -> u64 {
        30 * 60
    }
    pub fn command_interval() -> u64 {
        15
    }

    // Server defaults
    pub fn server_enabled() -> bool {
        true
    }
    pub fn bind() -> String {
        "0.0.0.0:8088".into()
    }

    // Telegram defaults
    pub fn api_base() -> String {
        "https://api.telegram.org".into()
    }
    pub fn parse_mode() -> String {
        "Markdown".into()
    }
    pub fn test_message() -> String {
        "Hello from Telegram Bot!".into()
    }

    // Path defaults
    pub fn venues_file() -> String {
        "config.json".into()
    }
    pub fn snapshot_file() -> String {
        "store.json".into()
    }

    // Discovery defaults
    pub fn retail_page_url() -> String {
        "https://consumer-api.wolt.com/v1/pages/retail".into()
    }
    pub fn assortment_url_template() -> String {
        "https://consumer-api.wolt.com/consumer-api/consumer-assortment/v1/venues/slug/{slug}/assortment"
            .into()
    }
    pub fn cities() -> Vec<City> {
        vec![
            City {
                id: "tbilisi".to_string(),
                name: "Tbilisi".to_string(),
                lat: 41.7024604154103,
                lon: 44.7965812683105,
            },
            City {
                id: "batumi".to_string(),
                name: "Batumi".to_string(),
                lat: 41.6442796894184,
                lon: 41.629900932312,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_settings_ok() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn default_intervals() {
        let settings = Settings::default();
        assert_eq!(
            settings.schedule.availability_interval(),
            Duration::from_secs(1800)
        );
        assert_eq!(settings.schedule.command_interval(), Duration::from_secs(15));
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut settings = Settings::default();
        settings.schedule.command_interval_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_slug() {
        let mut settings = Settings::default();
        settings.discovery.assortment_url_template = "https://example.com/assortment".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [schedule]
            availability_interval_secs = 600

            [server]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.schedule.availability_interval_secs, 600);
        assert_eq!(settings.schedule.command_interval_secs, 15);
        assert!(!settings.server.enabled);
        assert_eq!(settings.paths.snapshot_file, "store.json");
        assert_eq!(settings.discovery.cities.len(), 2);
    }

    #[test]
    fn bundled_settings_file_is_valid() {
        let settings: Settings =
            toml::from_str(include_str!("../../storage/settings.toml")).unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.bind, "0.0.0.0:8088");
        assert_eq!(settings.discovery.cities.len(), 2);
    }

    #[test]
    fn city_lookup_and_assortment_url() {
        let discovery = DiscoveryConfig::default();
        assert_eq!(discovery.city("Tbilisi").unwrap().name, "Tbilisi");
        assert!(discovery.city("paris").is_none());
        assert!(
            discovery
                .assortment_url("gastronome-1")
                .ends_with("/venues/slug/gastronome-1/assortment")
        );
    }
}
