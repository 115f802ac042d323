//! Runtime configuration: defaults, optional YAML file, environment overrides

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    API_BASE_URL_ENV, DEBUG_ENV, DEFAULT_API_BASE_URL, DEFAULT_ITEMS_PER_PAGE,
    DEFAULT_SNACKBAR_DURATION_MS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every endpoint is appended to
    pub base_url: String,

    /// Transport timeout. Unset means the transport waits indefinitely.
    pub request_timeout_secs: Option<u64>,

    pub items_per_page: u64,

    /// How long a notification stays up; 0 keeps it until dismissed
    pub snackbar_duration_ms: u64,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,

    /// Show error debug details in the UI
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_API_BASE_URL),
            request_timeout_secs: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            snackbar_duration_ms: DEFAULT_SNACKBAR_DURATION_MS,
            headers: BTreeMap::new(),
            debug: false,
        }
    }
}

impl Config {
    /// `<config_dir>/gamedeck/config.yaml`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gamedeck").join("config.yaml"))
    }

    /// Load defaults, then the config file if any, then the environment
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => Self::from_file(&path),
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.normalize();
        config
    }

    /// Read a YAML config file. A missing or unreadable file yields defaults.
    pub fn from_file(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read config: {}", e);
                Config::default()
            }
        }
    }

    /// Apply environment overrides. Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(flag) = lookup(DEBUG_ENV) {
            self.debug = matches!(flag.trim(), "1" | "true" | "yes");
        }
    }

    fn normalize(&mut self) {
        let trimmed = self.base_url.trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            String::from(DEFAULT_API_BASE_URL)
        } else {
            trimmed.to_string()
        };
        if self.items_per_page == 0 {
            self.items_per_page = DEFAULT_ITEMS_PER_PAGE;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:120/api");
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_env_overrides_base_url() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            API_BASE_URL_ENV => Some(String::from("https://games.example.com/api/")),
            _ => None,
        });
        let config = config.normalized();
        assert_eq!(config.base_url, "https://games.example.com/api");
    }

    #[test]
    fn test_empty_env_falls_back() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        assert!(!config.debug);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://10.0.0.5:8080/api").unwrap();
        writeln!(file, "request_timeout_secs: 5").unwrap();
        writeln!(file, "headers:\n  X-Client: gamedeck").unwrap();

        let config = Config::from_file(file.path());
        assert_eq!(config.base_url, "http://10.0.0.5:8080/api");
        assert_eq!(config.request_timeout_secs, Some(5));
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.headers.get("X-Client").map(String::as_str), Some("gamedeck"));
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "items_per_page: [not, a, number]").unwrap();
        assert_eq!(Config::from_file(file.path()), Config::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("absent.yaml"));
        assert_eq!(config, Config::default());
    }
}
