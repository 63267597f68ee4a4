//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not one of the supported ISO 4217 currencies.
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// Retail pricing of a product.
///
/// `retail` is kept exactly as received. Rounding only ever happens when a
/// human-readable string is produced from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub retail: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Pricing {
    /// Create a new pricing.
    #[must_use]
    pub const fn new(retail: Decimal, currency: CurrencyCode) -> Self {
        Self { retail, currency }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    BRL,
    CHF,
    JPY,
}

impl CurrencyCode {
    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::BRL => "BRL",
            Self::CHF => "CHF",
            Self::JPY => "JPY",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::CAD => "CA$",
            Self::AUD => "A$",
            Self::BRL => "R$",
            Self::CHF => "CHF",
            Self::JPY => "¥",
        }
    }

    /// Number of decimal digits in the currency's minor unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl core::str::FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            "BRL" => Ok(Self::BRL),
            "CHF" => Ok(Self::CHF),
            "JPY" => Ok(Self::JPY),
            _ => Err(CurrencyError::Unsupported(s.to_string())),
        }
    }
}
