//! Locale resource table: every loaded label set, looked up by locale code.
//!
//! A table is built once and is read-only afterwards, so it can be shared
//! between any number of readers without locking. Hosts pass a table (or a
//! [`Localizer`] bound to one locale) into the editor they construct instead
//! of registering labels in global state.

use crate::i18n::error::{LoadError, ResourceNotFound};
use crate::i18n::loader::{self, LocaleDefinition};
use crate::i18n::{KeyPath, LocaleCode, LocaleRegistry, ResourceTree};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Immutable mapping from locale code to that locale's labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTable {
    trees: BTreeMap<LocaleCode, ResourceTree>,
}

static BUILTIN: OnceLock<LocaleTable> = OnceLock::new();

impl LocaleTable {
    pub fn builder() -> LocaleTableBuilder {
        LocaleTableBuilder::default()
    }

    /// The table of locales embedded in the crate.
    ///
    /// Built on first call; concurrent first calls wait for the same
    /// initialization and every caller sees the finished table.
    ///
    /// # Panics
    /// Panics if an embedded definition is invalid. The registry tests load
    /// every embedded definition, so this indicates a broken build.
    pub fn builtin() -> &'static LocaleTable {
        BUILTIN.get_or_init(|| {
            Self::from_registry(LocaleRegistry::get())
                .expect("embedded locale definitions should be valid")
        })
    }

    /// Build a table from every locale in a registry.
    pub fn from_registry(registry: &LocaleRegistry) -> Result<LocaleTable, LoadError> {
        let mut builder = Self::builder();
        for config in registry.list_all() {
            builder = builder.add_definition(config.definition)?;
        }
        Ok(builder.build())
    }

    /// Look up the label at `path` for `locale`.
    ///
    /// # Returns
    /// * `Ok(&str)` with the label exactly as defined
    /// * `Err(ResourceNotFound)` if the locale is unknown, or the path is
    ///   malformed, missing, or names a group of labels
    ///
    /// # Example
    /// ```ignore
    /// let label = LocaleTable::builtin().get("uk", "table.cell.merge")?;
    /// assert_eq!(label, "Об'єднати комірки");
    /// ```
    pub fn get(&self, locale: &str, path: &str) -> Result<&str, ResourceNotFound> {
        self.localizer(locale)?.get(path)
    }

    /// Look up an already parsed path.
    pub fn get_path(&self, locale: &LocaleCode, path: &KeyPath) -> Result<&str, ResourceNotFound> {
        self.tree_by_code(locale)?
            .lookup(path)
            .ok_or_else(|| ResourceNotFound::Path {
                locale: locale.to_string(),
                path: path.to_string(),
            })
    }

    /// Try `locales` in order and return the first label found.
    ///
    /// This is the only lookup that falls back; [`LocaleTable::get`] never
    /// does. On a miss the error for the first (preferred) locale is
    /// returned.
    pub fn get_with_fallback<S: AsRef<str>>(
        &self,
        locales: &[S],
        path: &str,
    ) -> Result<&str, ResourceNotFound> {
        let mut first_miss = None;
        for locale in locales {
            match self.get(locale.as_ref(), path) {
                Ok(label) => return Ok(label),
                Err(err) => {
                    debug!("Label '{}' not found in '{}'", path, locale.as_ref());
                    first_miss.get_or_insert(err);
                }
            }
        }
        Err(first_miss.unwrap_or_else(|| ResourceNotFound::Locale(String::new())))
    }

    /// All labels of one locale.
    pub fn tree(&self, locale: &str) -> Result<&ResourceTree, ResourceNotFound> {
        let code =
            LocaleCode::parse(locale).map_err(|_| ResourceNotFound::Locale(locale.to_string()))?;
        self.tree_by_code(&code)
    }

    fn tree_by_code(&self, code: &LocaleCode) -> Result<&ResourceTree, ResourceNotFound> {
        self.trees
            .get(code)
            .ok_or_else(|| ResourceNotFound::Locale(code.to_string()))
    }

    /// A lookup handle bound to one locale.
    pub fn localizer(&self, locale: &str) -> Result<Localizer<'_>, ResourceNotFound> {
        let code =
            LocaleCode::parse(locale).map_err(|_| ResourceNotFound::Locale(locale.to_string()))?;
        let (code, tree) = self
            .trees
            .get_key_value(&code)
            .ok_or_else(|| ResourceNotFound::Locale(code.to_string()))?;
        Ok(Localizer { code, tree })
    }

    /// Registered locale codes, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &LocaleCode> {
        self.trees.keys()
    }

    pub fn contains_locale(&self, locale: &str) -> bool {
        LocaleCode::parse(locale)
            .map(|code| self.trees.contains_key(&code))
            .unwrap_or(false)
    }

    /// Number of locales.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

/// Collects locale definitions into a [`LocaleTable`].
///
/// Each locale may be added once; a second definition for the same code is a
/// [`LoadError::DuplicateLocale`].
#[derive(Debug, Default)]
pub struct LocaleTableBuilder {
    trees: BTreeMap<LocaleCode, ResourceTree>,
}

impl LocaleTableBuilder {
    pub fn add_tree(mut self, code: LocaleCode, tree: ResourceTree) -> Result<Self, LoadError> {
        if self.trees.contains_key(&code) {
            return Err(LoadError::DuplicateLocale(code.to_string()));
        }
        debug!("Registered locale '{}' with {} labels", code, tree.leaf_count());
        self.trees.insert(code, tree);
        Ok(self)
    }

    pub fn add_locales(
        self,
        locales: impl IntoIterator<Item = LocaleDefinition>,
    ) -> Result<Self, LoadError> {
        locales
            .into_iter()
            .try_fold(self, |builder, (code, tree)| builder.add_tree(code, tree))
    }

    /// Add every locale of a JSON definition.
    pub fn add_definition(self, text: &str) -> Result<Self, LoadError> {
        self.add_locales(loader::parse_definition(text)?)
    }

    /// Add the locale of an editor language script.
    pub fn add_script(self, text: &str) -> Result<Self, LoadError> {
        self.add_locales([loader::parse_script(text)?])
    }

    /// Add every definition file in a directory.
    pub fn add_dir(self, dir: &Path) -> Result<Self, LoadError> {
        self.add_locales(loader::load_dir(dir)?)
    }

    pub fn build(self) -> LocaleTable {
        LocaleTable { trees: self.trees }
    }
}

/// Lookups for one locale; what the editor runtime receives.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    code: &'a LocaleCode,
    tree: &'a ResourceTree,
}

impl<'a> Localizer<'a> {
    pub fn code(&self) -> &'a LocaleCode {
        self.code
    }

    /// The label at `path`; malformed paths are reported as not found.
    pub fn get(&self, path: &str) -> Result<&'a str, ResourceNotFound> {
        let not_found = || ResourceNotFound::Path {
            locale: self.code.to_string(),
            path: path.to_string(),
        };
        let parsed = KeyPath::parse(path).map_err(|_| not_found())?;
        self.tree.lookup(&parsed).ok_or_else(not_found)
    }

    /// The label at `path`, or `default` when there is none.
    pub fn get_or(&self, path: &str, default: &'a str) -> &'a str {
        self.get(path).unwrap_or(default)
    }
}
