//! Localized label tables for the rich-text editor.
//!
//! Labels are grouped by editor feature (`table`, `clipboard`, `common`, ...)
//! and addressed by key paths such as `table.cell.merge`. Each locale's labels
//! form a [`ResourceTree`]; a [`LocaleTable`] holds the trees of every loaded
//! locale and answers lookups.
//!
//! # Architecture
//!
//! - `node`: `ResourceNode`/`ResourceTree`, the typed label hierarchy
//! - `path`: `KeyPath` parsing (`a.b`, `a['b']`)
//! - `locale`: normalized `LocaleCode`
//! - `loader`: JSON and editor-script definition parsing
//! - `registry`: locales compiled into the crate
//! - `table`: `LocaleTable`, its builder and the per-locale `Localizer`
//! - `validator`: coverage comparison between two locales
//!
//! # Example
//!
//! ```rust,ignore
//! use editor_locale::i18n::LocaleTable;
//!
//! let labels = LocaleTable::builtin().localizer("uk")?;
//! assert_eq!(labels.get("table.cell.merge")?, "Об'єднати комірки");
//! assert_eq!(labels.get_or("table.cell.split", "Split Cell"), "Split Cell");
//! ```

mod error;
pub mod loader;
mod locale;
mod node;
mod path;
mod registry;
mod table;
mod validator;

pub use error::{LoadError, ResourceNotFound};
pub use locale::{InvalidLocaleCode, LocaleCode};
pub use node::{ResourceNode, ResourceTree};
pub use path::{KeyPath, KeyPathError};
pub use registry::{LocaleConfig, LocaleRegistry, TextDirection};
pub use table::{LocaleTable, LocaleTableBuilder, Localizer};
pub use validator::{CoverageValidator, ValidationReport};
