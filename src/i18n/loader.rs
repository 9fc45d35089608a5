//! Definition loader: turns label files into resource trees.
//!
//! Two textual forms are accepted:
//!
//! - JSON objects mapping locale codes to trees: `{"uk": {"undo": {...}}}`
//! - editor language scripts: `CKEDITOR.lang['uk']={...};`, with an optional
//!   UTF-8 BOM and leading block comments (the license banner)
//!
//! String values are never rewritten. Markup such as `<STRONG>` and host
//! placeholders such as `%1` or `$1` come out exactly as they went in.

use crate::i18n::error::LoadError;
use crate::i18n::node::{DefinitionError, RawNode};
use crate::i18n::{KeyPath, LocaleCode, ResourceTree};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

/// A locale code with the labels defined for it.
pub type LocaleDefinition = (LocaleCode, ResourceTree);

static SCRIPT_REGEX: OnceLock<Regex> = OnceLock::new();

fn script_regex() -> &'static Regex {
    SCRIPT_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?s)^\s*(?:/\*.*?\*/\s*)*CKEDITOR\.lang\[\s*['"]([^'"]+)['"]\s*\]\s*=\s*(\{.*\})\s*;?\s*$"#,
        )
        .expect("script pattern is valid")
    })
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

fn definition_error(locale: &LocaleCode, err: DefinitionError) -> LoadError {
    LoadError::Definition {
        locale: locale.to_string(),
        path: err.path.to_string(),
        reason: err.reason,
    }
}

/// Parse a JSON definition holding one or more locales.
///
/// # Returns
/// The locales in the order they appear in the file.
pub fn parse_definition(text: &str) -> Result<Vec<LocaleDefinition>, LoadError> {
    let raw: RawNode = serde_json::from_str(strip_bom(text))?;

    let entries = match raw {
        RawNode::Branch(entries) => entries,
        _ => {
            return Err(LoadError::Definition {
                locale: String::new(),
                path: String::new(),
                reason: "expected an object mapping locale codes to labels".to_string(),
            })
        }
    };

    let mut seen = BTreeSet::new();
    let mut locales = Vec::with_capacity(entries.len());
    for (code, tree) in entries {
        let code = LocaleCode::parse(&code)?;
        if !seen.insert(code.clone()) {
            return Err(LoadError::DuplicateLocale(code.to_string()));
        }
        let tree = tree
            .into_tree(&mut KeyPath::root())
            .map_err(|err| definition_error(&code, err))?;
        locales.push((code, tree));
    }

    Ok(locales)
}

/// Parse an editor language script (`CKEDITOR.lang['xx']={...};`).
pub fn parse_script(text: &str) -> Result<LocaleDefinition, LoadError> {
    let captures = script_regex()
        .captures(strip_bom(text))
        .ok_or_else(|| {
            LoadError::InvalidScript("expected CKEDITOR.lang['<code>']={...};".to_string())
        })?;

    let code = LocaleCode::parse(&captures[1])?;
    let raw: RawNode = serde_json::from_str(&captures[2])?;
    let tree = raw
        .into_tree(&mut KeyPath::root())
        .map_err(|err| definition_error(&code, err))?;

    Ok((code, tree))
}

/// Load one definition file, choosing the parser by extension.
pub fn load_file(path: &Path) -> Result<Vec<LocaleDefinition>, LoadError> {
    let extension = path.extension().and_then(|ext| ext.to_str());
    if !matches!(extension, Some("js" | "json")) {
        return Err(LoadError::UnsupportedFile(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let locales = if extension == Some("js") {
        vec![parse_script(&text)?]
    } else {
        parse_definition(&text)?
    };

    debug!(
        "Loaded {} locale(s) from {}: {:?}",
        locales.len(),
        path.display(),
        locales.iter().map(|(code, _)| code.as_str()).collect::<Vec<_>>()
    );
    Ok(locales)
}

/// Load every `*.json` and `*.js` definition in a directory.
///
/// Files are read in name order; anything else in the directory is skipped.
pub fn load_dir(dir: &Path) -> Result<Vec<LocaleDefinition>, LoadError> {
    let io_error = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let supported = path.is_file()
            && matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("json" | "js")
            );
        if supported {
            files.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }
    files.sort();

    let mut locales = Vec::new();
    for file in &files {
        locales.extend(load_file(file)?);
    }

    info!(
        "Loaded {} locale(s) from {} file(s) in {}",
        locales.len(),
        files.len(),
        dir.display()
    );
    Ok(locales)
}
