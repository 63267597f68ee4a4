//! Locale tags and localized text.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Locale`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The input string is empty.
    #[error("locale cannot be empty")]
    Empty,
    /// The language subtag is not 2-3 ASCII letters.
    #[error("invalid language subtag: {0}")]
    InvalidLanguage(String),
    /// The region subtag is not 2 ASCII letters.
    #[error("invalid region subtag: {0}")]
    InvalidRegion(String),
}

/// A locale tag such as `en` or `pt-BR`.
///
/// Tags are normalized on parse: the language is lowercased and the region,
/// when present, is uppercased. `_` is accepted as a separator.
///
/// ## Examples
///
/// ```
/// use vitrine_core::Locale;
///
/// let locale = Locale::parse("pt_br").unwrap();
/// assert_eq!(locale.as_str(), "pt-BR");
/// assert_eq!(locale.language(), "pt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parse and normalize a locale tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is empty or its subtags are malformed.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LocaleError::InvalidLanguage(language.to_string()));
        }

        let region = parts.next();
        if let Some(region) = region {
            if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(LocaleError::InvalidRegion(region.to_string()));
            }
        }
        if let Some(extra) = parts.next() {
            return Err(LocaleError::InvalidRegion(extra.to_string()));
        }

        let normalized = match region {
            Some(region) => format!(
                "{}-{}",
                language.to_ascii_lowercase(),
                region.to_ascii_uppercase()
            ),
            None => language.to_ascii_lowercase(),
        };
        Ok(Self(normalized))
    }

    /// The full normalized tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language subtag (always lowercase).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

/// A string with one translation per locale.
///
/// Lookups are exact: there is no fallback from `pt-BR` to `pt` or to a
/// default locale. A missing entry is reported to the caller as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<Locale, String>);

impl LocalizedText {
    /// Create an empty localized text.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace the translation for a locale.
    #[must_use]
    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        self.0.insert(locale, text.into());
        self
    }

    /// Translation for the given locale, if any.
    #[must_use]
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    /// Locales that have a translation.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.0.keys()
    }
}
