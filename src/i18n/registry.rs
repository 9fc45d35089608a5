//! Locale registry: the label sets compiled into the crate.
//!
//! The registry is static metadata. It is initialized once with `OnceLock`
//! and never changes; the tables built from it are what hosts hand to the
//! editor.

use crate::i18n::LocaleCode;
use std::sync::OnceLock;

/// Writing direction of a locale's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// A locale shipped with the crate.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Language tag used by the editor (e.g., "uk", "pt-br")
    pub code: &'static str,

    /// English name of the language (e.g., "Ukrainian")
    pub name: &'static str,

    /// Native name of the language (e.g., "Українська")
    pub native_name: &'static str,

    pub direction: TextDirection,

    /// Embedded JSON definition (`{"<code>": {...}}`)
    pub definition: &'static str,
}

/// Registry of built-in locales.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the registry instance, initializing it on first call.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: builtin_locales(),
        })
    }

    /// Get a built-in locale by code.
    ///
    /// The code is normalized first, so `UK` and `uk` both match.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        let code = LocaleCode::parse(code).ok()?;
        self.locales
            .iter()
            .find(|locale| locale.code == code.as_str())
    }

    /// All built-in locales, in registration order.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    pub fn is_registered(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

fn builtin_locales() -> Vec<LocaleConfig> {
    vec![LocaleConfig {
        code: "uk",
        name: "Ukrainian",
        native_name: "Українська",
        direction: TextDirection::Ltr,
        definition: include_str!("../../locales/uk.json"),
    }]
}
