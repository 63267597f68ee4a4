//! Locale resolution and locale-aware number formatting.
//!
//! One [`IntlContext`] is resolved per render pass and handed to every
//! component, so all locale-dependent derivations within a render agree.

use rust_decimal::{Decimal, RoundingStrategy};
use vitrine_core::{CurrencyCode, Locale};

/// The internationalization context of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntlContext {
    locale: Locale,
}

impl IntlContext {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The resolved locale.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Format an amount as currency in this context's locale.
    #[must_use]
    pub fn format_currency(&self, amount: Decimal, currency: CurrencyCode) -> String {
        format_currency(amount, currency, &self.locale)
    }
}

/// Resolve a requested locale tag against the supported locales.
///
/// An exact match wins; otherwise the first supported locale with the same
/// language is used (`pt-BR` resolves to `pt` when only `pt` is supported).
#[must_use]
pub fn resolve_locale(requested: &str, supported: &[Locale]) -> Option<Locale> {
    let requested = Locale::parse(requested).ok()?;
    supported
        .iter()
        .find(|locale| **locale == requested)
        .or_else(|| {
            supported
                .iter()
                .find(|locale| locale.language() == requested.language())
        })
        .cloned()
}

/// How numbers and currency symbols are laid out for a language.
struct NumberStyle {
    group_separator: Option<char>,
    decimal_separator: char,
    placement: SymbolPlacement,
}

enum SymbolPlacement {
    /// `$1,234.50`
    PrefixSymbol,
    /// `1.234,50 €`
    SuffixSymbol,
    /// `1234.50 USD`
    SuffixCode,
}

impl NumberStyle {
    fn for_locale(locale: &Locale) -> Self {
        match locale.language() {
            "en" => Self {
                group_separator: Some(','),
                decimal_separator: '.',
                placement: SymbolPlacement::PrefixSymbol,
            },
            "pt" | "es" | "de" | "it" => Self {
                group_separator: Some('.'),
                decimal_separator: ',',
                placement: SymbolPlacement::SuffixSymbol,
            },
            _ => Self {
                group_separator: None,
                decimal_separator: '.',
                placement: SymbolPlacement::SuffixCode,
            },
        }
    }
}

/// Format an amount as a human-readable currency string.
///
/// The amount is rounded half away from zero to the currency's minor units.
/// Only the returned string is rounded; callers keep the exact amount.
#[must_use]
pub fn format_currency(amount: Decimal, currency: CurrencyCode, locale: &Locale) -> String {
    let style = NumberStyle::for_locale(locale);
    let digits = currency.minor_units();

    let mut rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(digits);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = rounded.abs().to_string();

    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
    let mut number = group_digits(integer, style.group_separator);
    if !fraction.is_empty() {
        number.push(style.decimal_separator);
        number.push_str(fraction);
    }

    let sign = if negative { "-" } else { "" };
    match style.placement {
        SymbolPlacement::PrefixSymbol => format!("{sign}{}{number}", currency.symbol()),
        SymbolPlacement::SuffixSymbol => format!("{sign}{number} {}", currency.symbol()),
        SymbolPlacement::SuffixCode => format!("{sign}{number} {}", currency.code()),
    }
}

/// Insert a separator between every group of three digits.
fn group_digits(integer: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return integer.to_string();
    };

    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    #[test]
    fn test_format_english_usd() {
        assert_eq!(
            format_currency(dec("19.99"), CurrencyCode::USD, &locale("en")),
            "$19.99"
        );
        assert_eq!(
            format_currency(dec("1234.5"), CurrencyCode::USD, &locale("en-US")),
            "$1,234.50"
        );
        assert_eq!(
            format_currency(dec("1234567"), CurrencyCode::USD, &locale("en")),
            "$1,234,567.00"
        );
    }

    #[test]
    fn test_format_portuguese_eur() {
        assert_eq!(
            format_currency(dec("1234.5"), CurrencyCode::EUR, &locale("pt")),
            "1.234,50 €"
        );
        assert_eq!(
            format_currency(dec("9.9"), CurrencyCode::EUR, &locale("pt-PT")),
            "9,90 €"
        );
    }

    #[test]
    fn test_format_fallback_uses_code() {
        assert_eq!(
            format_currency(dec("19.99"), CurrencyCode::USD, &locale("fr")),
            "19.99 USD"
        );
    }

    #[test]
    fn test_format_zero_minor_units() {
        assert_eq!(
            format_currency(dec("1500.4"), CurrencyCode::JPY, &locale("en")),
            "¥1,500"
        );
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(
            format_currency(dec("0.005"), CurrencyCode::USD, &locale("en")),
            "$0.01"
        );
        assert_eq!(
            format_currency(dec("-2.345"), CurrencyCode::USD, &locale("en")),
            "-$2.35"
        );
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(
            format_currency(dec("-0.001"), CurrencyCode::USD, &locale("en")),
            "$0.00"
        );
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", Some(',')), "1");
        assert_eq!(group_digits("123", Some(',')), "123");
        assert_eq!(group_digits("1234", Some(',')), "1,234");
        assert_eq!(group_digits("123456", Some('.')), "123.456");
        assert_eq!(group_digits("1234", None), "1234");
    }

    #[test]
    fn test_resolve_locale() {
        let supported = vec![locale("en"), locale("pt")];

        assert_eq!(resolve_locale("en", &supported), Some(locale("en")));
        assert_eq!(resolve_locale("pt-BR", &supported), Some(locale("pt")));
        assert_eq!(resolve_locale("fr", &supported), None);
        assert_eq!(resolve_locale("not a locale", &supported), None);
    }

    #[test]
    fn test_intl_context_formats_in_its_locale() {
        let intl = IntlContext::new(locale("pt"));
        assert_eq!(intl.locale().as_str(), "pt");
        assert_eq!(
            intl.format_currency(dec("19.99"), CurrencyCode::EUR),
            "19,99 €"
        );
    }
}
