//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:120/api";

/// Environment variable overriding the backend base URL
pub const API_BASE_URL_ENV: &str = "GAMEDECK_API_BASE_URL";

/// Environment variable enabling error debug details
pub const DEBUG_ENV: &str = "GAMEDECK_DEBUG";

pub const DEFAULT_ITEMS_PER_PAGE: u64 = 20;

pub const DEFAULT_SNACKBAR_DURATION_MS: u64 = 3000;

/// Log file written in the working directory
pub const LOG_FILE: &str = "gamedeck.log";

/// Application name
pub const APP_NAME: &str = "GameDeck";

/// Placeholder notice for the store link
pub const STORE_NOTICE: &str = "Steam integration coming soon!";
