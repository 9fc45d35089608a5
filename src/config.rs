use crate::i18n::LocaleCode;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Extra definition files loaded on top of the built-in locales
    pub locale_dir: Option<PathBuf>,

    // Lookup order
    pub default_locale: LocaleCode,
    pub fallback_locales: Vec<LocaleCode>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale = std::env::var("EDITOR_DEFAULT_LOCALE").unwrap_or_else(|_| "uk".to_string());

        Ok(Self {
            locale_dir: std::env::var("EDITOR_LOCALE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            default_locale: LocaleCode::parse(&default_locale)
                .context("EDITOR_DEFAULT_LOCALE is not a valid locale code")?,

            fallback_locales: std::env::var("EDITOR_FALLBACK_LOCALES")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| {
                    LocaleCode::parse(code)
                        .with_context(|| format!("EDITOR_FALLBACK_LOCALES has invalid code '{}'", code))
                })
                .collect::<Result<_>>()?,
        })
    }

    /// Locales to try for a lookup: `preferred` first, then the fallbacks.
    pub fn lookup_chain<'a>(&'a self, preferred: &'a LocaleCode) -> Vec<&'a str> {
        let mut chain = vec![preferred.as_str()];
        for code in &self.fallback_locales {
            if !chain.contains(&code.as_str()) {
                chain.push(code.as_str());
            }
        }
        chain
    }
}
