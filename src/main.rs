//! Inspect the editor's label tables.
//!
//! Usage:
//!   editor-locale list                        # Locales with label counts
//!   editor-locale get <locale> <path>         # Print one label
//!   editor-locale dump <locale>               # Print every `path = label`
//!   editor-locale check <locale> <reference>  # Compare label coverage
//!
//! Optional environment variables:
//! - EDITOR_LOCALE_DIR (extra *.json / *.js definitions to load)
//! - EDITOR_DEFAULT_LOCALE (defaults to uk)
//! - EDITOR_FALLBACK_LOCALES (comma separated, tried after the requested locale)

use anyhow::{bail, Context, Result};
use editor_locale::config::Config;
use editor_locale::i18n::{CoverageValidator, LocaleCode, LocaleRegistry, LocaleTable};
use tracing::{info, warn};

const USAGE: &str =
    "usage: editor-locale <list | get <locale> <path> | dump <locale> | check <locale> <reference>>";

#[derive(Debug, PartialEq)]
enum Command<'a> {
    List,
    Get { locale: LocaleCode, path: &'a str },
    Dump { locale: &'a str },
    Check { locale: &'a str, reference: &'a str },
}

fn parse_command<'a>(args: &[&'a str]) -> Result<Command<'a>> {
    match args {
        ["list"] => Ok(Command::List),
        ["get", locale, path] => Ok(Command::Get {
            locale: LocaleCode::parse(locale)?,
            path,
        }),
        ["dump", locale] => Ok(Command::Dump { locale }),
        ["check", locale, reference] => Ok(Command::Check { locale, reference }),
        _ => bail!(USAGE),
    }
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("editor_locale=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let command = parse_command(&args)?;

    let config = Config::from_env()?;
    let table = load_table(&config)?;

    match command {
        Command::List => list(&table),
        Command::Get { locale, path } => get(&config, &table, path, &locale),
        Command::Dump { locale } => dump(&table, locale),
        Command::Check { locale, reference } => check(&table, locale, reference),
    }
}

/// Built-in locales plus anything in `EDITOR_LOCALE_DIR`.
fn load_table(config: &Config) -> Result<LocaleTable> {
    let mut builder = LocaleTable::builder();
    for locale in LocaleRegistry::get().list_all() {
        builder = builder
            .add_definition(locale.definition)
            .with_context(|| format!("Built-in locale '{}' is invalid", locale.code))?;
    }

    if let Some(dir) = &config.locale_dir {
        info!("Loading locale definitions from {}", dir.display());
        builder = builder
            .add_dir(dir)
            .with_context(|| format!("Failed to load locales from {}", dir.display()))?;
    }

    let table = builder.build();
    info!("Loaded {} locale(s)", table.len());
    Ok(table)
}

fn list(table: &LocaleTable) -> Result<()> {
    let registry = LocaleRegistry::get();
    for code in table.locales() {
        let labels = table.tree(code.as_str())?.leaf_count();
        match registry.get_by_code(code.as_str()) {
            Some(config) => println!("{}\t{}\t{} ({})", code, labels, config.name, config.native_name),
            None => println!("{}\t{}", code, labels),
        }
    }
    Ok(())
}

fn get(config: &Config, table: &LocaleTable, path: &str, locale: &LocaleCode) -> Result<()> {
    let chain = config.lookup_chain(locale);
    match table.get_with_fallback(&chain, path) {
        Ok(label) => {
            println!("{}", label);
            Ok(())
        }
        Err(err) => {
            warn!("Lookup failed for chain {:?}", chain);
            bail!(err)
        }
    }
}

fn dump(table: &LocaleTable, locale: &str) -> Result<()> {
    for (path, label) in table.tree(locale)?.leaves() {
        println!("{} = {}", path, label);
    }
    Ok(())
}

fn check(table: &LocaleTable, locale: &str, reference: &str) -> Result<()> {
    let report = CoverageValidator::validate(table.tree(reference)?, table.tree(locale)?);

    for error in &report.errors {
        println!("error: {}", error);
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }

    if report.has_errors() {
        bail!(
            "'{}' has {} structural error(s) against '{}'",
            locale,
            report.errors.len(),
            reference
        );
    }
    info!(
        "'{}' checked against '{}': {} warning(s)",
        locale,
        reference,
        report.warnings.len()
    );
    Ok(())
}
