//! User settings for grocery-cli
//!
//! Manages the exchange rate, the external service endpoints (catalogue,
//! translation, list store) and the retry policy used for list reads.
//! Settings live in `config.json`; a handful of environment variables
//! override the persisted values at load time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::GroceryPaths;
use crate::error::GroceryError;

/// Colones per US dollar
pub const DEFAULT_EXCHANGE_RATE: f64 = 516.0;

/// Which list store backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Single JSON document on local disk
    #[default]
    File,
    /// Firebase Realtime Database REST API
    Firebase,
}

impl std::str::FromStr for StoreBackend {
    type Err = GroceryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "firebase" => Ok(Self::Firebase),
            other => Err(GroceryError::Config(format!(
                "Unknown store backend '{}' (expected 'file' or 'firebase')",
                other
            ))),
        }
    }
}

/// Which translation provider to use for product descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Google Translate public endpoint
    #[default]
    Google,
    /// Keep descriptions in the source language
    None,
}

impl std::str::FromStr for TranslationProvider {
    type Err = GroceryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "none" | "off" => Ok(Self::None),
            other => Err(GroceryError::Config(format!(
                "Unknown translation provider '{}' (expected 'google' or 'none')",
                other
            ))),
        }
    }
}

/// Product catalogue (Algolia) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueSettings {
    #[serde(default = "default_catalogue_url")]
    pub url: String,

    #[serde(default = "default_catalogue_app_id")]
    pub application_id: String,

    /// Search-only API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_catalogue_index")]
    pub index_name: String,

    /// Store whose price is read from `storeDetail`
    #[serde(default = "default_store_id")]
    pub store_id: String,
}

impl Default for CatalogueSettings {
    fn default() -> Self {
        Self {
            url: default_catalogue_url(),
            application_id: default_catalogue_app_id(),
            api_key: None,
            index_name: default_catalogue_index(),
            store_id: default_store_id(),
        }
    }
}

/// Translation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSettings {
    #[serde(default)]
    pub provider: TranslationProvider,

    #[serde(default = "default_source_language")]
    pub source_language: String,

    #[serde(default = "default_target_language")]
    pub target_language: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            source_language: default_source_language(),
            target_language: default_target_language(),
        }
    }
}

/// List store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Database URL, e.g. `https://my-app-default-rtdb.firebaseio.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Pre-issued auth token appended to every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: None,
            auth_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Retry policy for full list reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            backoff_secs: default_backoff_secs(),
        }
    }
}

impl RetrySettings {
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

/// User settings for grocery-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Source-currency units per normalized-currency unit
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,

    #[serde(default = "default_source_symbol")]
    pub source_currency_symbol: String,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub catalogue: CatalogueSettings,

    #[serde(default)]
    pub translation: TranslationSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_exchange_rate() -> f64 {
    DEFAULT_EXCHANGE_RATE
}

fn default_source_symbol() -> String {
    "₡".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_catalogue_url() -> String {
    "https://fu5xfx7knl-dsn.algolia.net".to_string()
}

fn default_catalogue_app_id() -> String {
    "FU5XFX7KNL".to_string()
}

fn default_catalogue_index() -> String {
    "Product_CatalogueV2".to_string()
}

fn default_store_id() -> String {
    "08".to_string()
}

fn default_source_language() -> String {
    "es".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_attempts() -> u32 {
    3
}

fn default_backoff_secs() -> u64 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            exchange_rate: default_exchange_rate(),
            source_currency_symbol: default_source_symbol(),
            currency_symbol: default_currency(),
            catalogue: CatalogueSettings::default(),
            translation: TranslationSettings::default(),
            store: StoreSettings::default(),
            retry: RetrySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    ///
    /// Environment overrides are applied on top of whatever was loaded.
    pub fn load_or_create(paths: &GroceryPaths) -> Result<Self, GroceryError> {
        let settings_path = paths.settings_file();

        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                GroceryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                GroceryError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            // Don't save yet - let caller decide when to persist
            Settings::default()
        };

        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GroceryPaths) -> Result<(), GroceryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            GroceryError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            GroceryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Apply `GROCERY_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<(), GroceryError> {
        if let Ok(backend) = std::env::var("GROCERY_STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Ok(url) = std::env::var("GROCERY_STORE_URL") {
            self.store.url = Some(url);
            if std::env::var("GROCERY_STORE_BACKEND").is_err() {
                self.store.backend = StoreBackend::Firebase;
            }
        }
        if let Ok(token) = std::env::var("GROCERY_STORE_AUTH") {
            self.store.auth_token = Some(token);
        }
        if let Ok(provider) = std::env::var("GROCERY_TRANSLATOR") {
            self.translation.provider = provider.parse()?;
        }
        if let Ok(key) = std::env::var("GROCERY_CATALOGUE_API_KEY") {
            self.catalogue.api_key = Some(key);
        }
        Ok(())
    }

    /// Reject settings the rest of the application cannot work with
    pub fn validate(&self) -> Result<(), GroceryError> {
        if !(self.exchange_rate.is_finite() && self.exchange_rate > 0.0) {
            return Err(GroceryError::Config(format!(
                "Exchange rate must be a positive number, got {}",
                self.exchange_rate
            )));
        }
        if self.retry.attempts == 0 {
            return Err(GroceryError::Config(
                "Retry attempts must be at least 1".into(),
            ));
        }
        if self.store.backend == StoreBackend::Firebase && self.store.url.is_none() {
            return Err(GroceryError::Config(
                "Firebase backend selected but no store url configured (set GROCERY_STORE_URL)"
                    .into(),
            ));
        }
        Ok(())
    }
}
