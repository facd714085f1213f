//! Persisted CLI settings.
//!
//! Settings are loaded from disk at startup and saved when changed. The file
//! carries the backend connection, the stored login state, the offline cache
//! switch, and the S-13 form link the report prints.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default S-13 form document shipped with the product.
pub const DEFAULT_FORM_LINK: &str =
    "https://docs.google.com/document/d/1LNYERJPirBtYTydjdTPtjxkA5QhgMgktvkcrC1593cM/edit?usp=drive_link";

/// Application settings.
///
/// Serialized to TOML and stored in the user's config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend connection.
    pub connection: ConnectionSettings,

    /// Stored login state.
    pub session: SessionSettings,

    /// Offline response cache.
    pub cache: CacheSettings,

    /// External links.
    pub links: LinkSettings,
}

impl Settings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &PathBuf) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to the default path.
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e}"))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;

        std::fs::write(path, content).map_err(|e| format!("Failed to write settings: {e}"))
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "Bitimaps", "BITIMAPS")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Cache root: the configured directory, or the user cache dir.
    pub fn cache_root(&self) -> PathBuf {
        if let Some(dir) = &self.cache.dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("com", "Bitimaps", "BITIMAPS")
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".bitimaps-cache"))
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Project base URL, e.g. `https://project.supabase.co`.
    pub url: String,

    /// Anonymous API key sent with every request.
    pub anon_key: String,
}

/// Stored login state; set by `login`, cleared by `logout`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Whether the password check has succeeded.
    pub authenticated: bool,
}

/// Offline cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Serve cached responses when the network is down.
    pub enabled: bool,

    /// Cache directory override (default: the user cache dir).
    pub dir: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

/// External link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// The S-13 form document printed with the report.
    pub s13_form_link: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            s13_form_link: DEFAULT_FORM_LINK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let settings = Settings::default();
        assert_eq!(settings.links.s13_form_link, DEFAULT_FORM_LINK);
        assert!(settings.cache.enabled);
        assert!(!settings.session.authenticated);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.toml");
        settings.save_to(&path).expect("save");
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.links.s13_form_link, DEFAULT_FORM_LINK);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let loaded = Settings::load_from(&PathBuf::from("/nonexistent/settings.toml"));
        assert_eq!(loaded.connection.url, "");
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "[connection]\nurl = \"https://project.supabase.co\"\n",
        )
        .expect("write");
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.connection.url, "https://project.supabase.co");
        assert_eq!(loaded.links.s13_form_link, DEFAULT_FORM_LINK);
    }
}
