//! Locale codes: normalized identifiers for label sets.
//!
//! The editor ships its label files under lowercase language tags such as
//! `uk`, `zh-cn` or `pt-br`. Codes are matched case-insensitively and `_` is
//! accepted in place of `-`, so `pt_BR`, `PT-br` and `pt-br` name the same
//! locale.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string that is not a usable locale code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locale code '{0}'")]
pub struct InvalidLocaleCode(pub String);

/// A validated, normalized locale code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Parse and normalize a locale code.
    ///
    /// The primary subtag must be 2-8 ASCII letters; further subtags are 1-8
    /// ASCII letters or digits.
    ///
    /// # Example
    /// ```ignore
    /// let code = LocaleCode::parse("pt_BR")?;
    /// assert_eq!(code.as_str(), "pt-br");
    /// ```
    pub fn parse(input: &str) -> Result<Self, InvalidLocaleCode> {
        let normalized = input.trim().to_ascii_lowercase().replace('_', "-");
        let mut subtags = normalized.split('-');

        let primary_ok = subtags
            .next()
            .map(|tag| (2..=8).contains(&tag.len()) && tag.chars().all(|c| c.is_ascii_lowercase()))
            .unwrap_or(false);
        let rest_ok = subtags.all(|tag| {
            (1..=8).contains(&tag.len()) && tag.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if primary_ok && rest_ok {
            Ok(Self(normalized))
        } else {
            Err(InvalidLocaleCode(input.to_string()))
        }
    }

    /// The normalized code (lowercase, `-` separated).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleCode {
    type Err = InvalidLocaleCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LocaleCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_simple_code() {
        let code = LocaleCode::parse("uk").expect("Should parse");
        assert_eq!(code.as_str(), "uk");
    }

    #[test]
    fn test_parse_normalizes_case_and_separator() {
        let expected = LocaleCode::parse("pt-br").unwrap();
        assert_eq!(LocaleCode::parse("pt_BR").unwrap(), expected);
        assert_eq!(LocaleCode::parse("PT-br").unwrap(), expected);
        assert_eq!(LocaleCode::parse(" pt-br ").unwrap(), expected);
    }

    #[test]
    fn test_parse_script_and_region_subtags() {
        assert_eq!(LocaleCode::parse("sr-latn").unwrap().as_str(), "sr-latn");
        assert_eq!(LocaleCode::parse("es-419").unwrap().as_str(), "es-419");
    }

    #[test]
    fn test_parse_rejects_invalid_codes() {
        for input in ["", "u", "12", "uk-", "-uk", "uk--ua", "uk ua", "ук", "toolongprimary"] {
            assert!(
                LocaleCode::parse(input).is_err(),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_code_error_message() {
        let err = LocaleCode::parse("??").unwrap_err();
        assert_eq!(err.to_string(), "invalid locale code '??'");
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_and_from_str() {
        let code: LocaleCode = "ZH_cn".parse().unwrap();
        assert_eq!(code.to_string(), "zh-cn");
    }

    #[test]
    fn test_ordering_is_by_normalized_code() {
        let mut codes = vec![
            LocaleCode::parse("uk").unwrap(),
            LocaleCode::parse("EN").unwrap(),
            LocaleCode::parse("de").unwrap(),
        ];
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(LocaleCode::as_str).collect();
        assert_eq!(sorted, vec!["de", "en", "uk"]);
    }

    #[test]
    fn test_deserialize_validates() {
        let code: LocaleCode = serde_json::from_str(r#""UK""#).unwrap();
        assert_eq!(code.as_str(), "uk");
        assert!(serde_json::from_str::<LocaleCode>(r#""x""#).is_err());
    }
}
