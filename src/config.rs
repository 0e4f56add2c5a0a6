// src/config.rs

//! Configuration loading utilities.
//!
//! Settings are optional and fall back to defaults; the venue list and the
//! Telegram credentials are required.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{Settings, VenueConfig};

const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Telegram bot credentials.
#[derive(Clone)]
pub struct Credentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Failed to load .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::config(format!("{key} environment variable is required")))
        };

        Ok(Self {
            bot_token: read(BOT_TOKEN_VAR)?,
            chat_id: read(CHAT_ID_VAR)?,
        })
    }
}

/// Load the tracked venue list from a JSON file.
///
/// Unlike settings, there is no fallback: a missing or malformed file is fatal.
pub fn load_venues(path: &Path) -> Result<Vec<VenueConfig>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("Failed to read venue config {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::config(format!("Failed to parse venue config {}: {e}", path.display()))
    })
}

/// Validate every venue entry.
pub fn validate_venues(venues: &[VenueConfig]) -> Result<()> {
    if venues.is_empty() {
        return Err(AppError::validation("No venues defined"));
    }
    for venue in venues {
        venue.validate()?;
    }
    Ok(())
}

/// Resolved file locations for a storage directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub settings: PathBuf,
    pub venues: PathBuf,
    pub snapshot: PathBuf,
}

impl StoragePaths {
    pub fn new(storage_dir: &Path, settings: &Settings) -> Self {
        Self {
            settings: storage_dir.join("settings.toml"),
            venues: storage_dir.join(&settings.paths.venues_file),
            snapshot: storage_dir.join(&settings.paths.snapshot_file),
        }
    }
}

/// Load settings (with defaults) and the venue list from a storage directory.
pub fn load_all(storage_dir: &Path) -> Result<(Settings, Vec<VenueConfig>)> {
    let settings = Settings::load_or_default(storage_dir.join("settings.toml"));
    settings.validate()?;

    let paths = StoragePaths::new(storage_dir, &settings);
    let venues = load_venues(&paths.venues)?;

    Ok((settings, venues))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_credentials_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(BOT_TOKEN_VAR, "123:abc"), (CHAT_ID_VAR, " -1001 ")]);
        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.bot_token, "123:abc");
        assert_eq!(creds.chat_id, "-1001");
        assert!(!format!("{creds:?}").contains("123:abc"));
    }

    #[test]
    fn test_credentials_missing_is_error() {
        let vars: HashMap<&str, &str> = HashMap::from([(BOT_TOKEN_VAR, "123:abc")]);
        let err = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(err.to_string().contains(CHAT_ID_VAR));

        let vars: HashMap<&str, &str> = HashMap::from([(BOT_TOKEN_VAR, ""), (CHAT_ID_VAR, "1")]);
        assert!(Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).is_err());
    }

    #[test]
    fn test_load_all_uses_default_settings() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.json"),
            r#"[{"endpoint": "https://example.com/a", "names": ["cola"], "venue": "V"}]"#,
        )
        .unwrap();

        let (settings, venues) = load_all(tmp.path()).unwrap();
        assert_eq!(settings.paths.snapshot_file, "store.json");
        assert_eq!(venues.len(), 1);
        assert!(validate_venues(&venues).is_ok());
    }

    #[test]
    fn test_missing_venue_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = load_all(tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_malformed_venue_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "[{\"endpoint\": ").unwrap();
        assert!(load_venues(&path).is_err());
    }

    #[test]
    fn test_validate_venues_rejects_empty_list() {
        assert!(validate_venues(&[]).is_err());
    }
}
