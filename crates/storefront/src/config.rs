//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BRAND` - Brand name shown in the footer (default: Vitrine)
//! - `STOREFRONT_LOCALES` - Comma separated supported locales, the first one
//!   is the default (default: en,pt)
//! - `STOREFRONT_CATALOG` - Catalog JSON file (default: crates/storefront/catalog.json)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_PLACEHOLDER_IMAGE` - Image for products without images,
//!   relative to the static directory (default: images/image_placeholder.png)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use vitrine_core::Locale;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Brand name rendered in the page chrome
    pub brand: String,
    /// Supported locales
    pub locales: SupportedLocales,
    /// Catalog fixture with products and collections
    pub catalog_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Placeholder image path relative to `/static`
    pub placeholder_image: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable has an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env.parse_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parse_or_default("STOREFRONT_PORT", "3000")?;
        let brand = env.get_or_default("STOREFRONT_BRAND", "Vitrine");
        let locales = SupportedLocales::parse(&env.get_or_default("STOREFRONT_LOCALES", "en,pt"))
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_LOCALES".to_string(), e))?;
        let catalog_path = env
            .get_or_default("STOREFRONT_CATALOG", "crates/storefront/catalog.json")
            .into();
        let static_dir = env
            .get_or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static")
            .into();
        let placeholder_image = env.get_or_default(
            "STOREFRONT_PLACEHOLDER_IMAGE",
            "images/image_placeholder.png",
        );

        let sentry_dsn = env.get_optional("SENTRY_DSN");
        let sentry_environment = env.get_optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env.parse_or_default("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = env.parse_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            host,
            port,
            brand,
            locales,
            catalog_path,
            static_dir,
            placeholder_image,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The locale used when a request does not name a supported one.
    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        self.locales.default_locale()
    }
}

/// A non-empty, duplicate-free locale list. The first locale is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLocales {
    default: Locale,
    all: Vec<Locale>,
}

impl SupportedLocales {
    /// Build from a default locale and further supported ones.
    #[must_use]
    pub fn new(default: Locale, others: impl IntoIterator<Item = Locale>) -> Self {
        let mut all = vec![default.clone()];
        for locale in others {
            if !all.contains(&locale) {
                all.push(locale);
            }
        }
        Self { default, all }
    }

    /// Parse a comma separated locale list, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns a message if a tag is invalid or the list is empty.
    pub fn parse(value: &str) -> Result<Self, String> {
        let mut tags = value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty());
        let default = tags
            .next()
            .ok_or_else(|| "at least one locale is required".to_string())?;
        let default = Locale::parse(default).map_err(|e| e.to_string())?;
        let others = tags
            .map(|tag| Locale::parse(tag).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(default, others))
    }

    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Every supported locale, the default first.
    #[must_use]
    pub fn as_slice(&self) -> &[Locale] {
        &self.all
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the usual default and parse helpers.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable. Blank values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Get a variable with a default value and parse it.
    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
