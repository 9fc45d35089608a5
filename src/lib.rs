pub mod config;
pub mod i18n;

pub use i18n::{LocaleTable, Localizer, ResourceNotFound};
