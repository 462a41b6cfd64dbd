//! `check-translations`: report keys each catalog lacks relative to the
//! default-locale catalog.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use orthosite_i18n::{Catalog, CatalogDiff, CatalogSource, LocaleCode, ROUTING, compare_catalogs};
use tracing::warn;
use walkdir::WalkDir;

use crate::cli::{CheckTranslationsArgs, OutputFormat};
use crate::error::{CliError, CliResult};

const CATALOG_EXTENSION: &str = "json";

/// Catalog files in `dir` named after a supported locale. Other JSON files are
/// skipped with a warning.
pub(crate) fn discover_catalogs(dir: &Path) -> CliResult<Vec<(LocaleCode, PathBuf)>> {
    if !dir.is_dir() {
        return Err(CliError::validation(format!(
            "catalog directory '{}' does not exist",
            dir.display()
        )));
    }
    let mut found = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry
            .with_context(|| format!("failed to list '{}'", dir.display()))
            .map_err(CliError::failure)?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(CATALOG_EXTENSION)
        {
            continue;
        }
        let locale = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(LocaleCode::from_code)
            .filter(|locale| ROUTING.locales.contains(locale));
        match locale {
            Some(locale) => found.push((locale, path.to_path_buf())),
            None => warn!(path = %path.display(), "skipping catalog for unsupported locale"),
        }
    }
    Ok(found)
}

async fn load_catalogs(dir: Option<&Path>) -> CliResult<Vec<Catalog>> {
    let Some(dir) = dir else {
        let mut catalogs = Vec::with_capacity(ROUTING.locales.len());
        for locale in ROUTING.locales {
            let catalog = CatalogSource::Embedded
                .load(*locale)
                .await
                .map_err(CliError::failure)?;
            catalogs.push(catalog);
        }
        return Ok(catalogs);
    };

    let mut catalogs = Vec::new();
    for (locale, path) in discover_catalogs(dir)? {
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read '{}'", path.display()))
            .map_err(CliError::failure)?;
        let catalog = Catalog::parse(locale, &raw)
            .with_context(|| format!("failed to parse '{}'", path.display()))
            .map_err(CliError::failure)?;
        catalogs.push(catalog);
    }
    Ok(catalogs)
}

/// Diff every non-default catalog against the default one.
pub(crate) fn check_catalogs(catalogs: &[Catalog]) -> CliResult<Vec<CatalogDiff>> {
    let default_locale = ROUTING.default_locale;
    let reference = catalogs
        .iter()
        .find(|catalog| catalog.locale() == default_locale)
        .ok_or_else(|| {
            CliError::validation(format!("no catalog found for default locale '{default_locale}'"))
        })?;
    Ok(catalogs
        .iter()
        .filter(|catalog| catalog.locale() != default_locale)
        .map(|catalog| compare_catalogs(reference, catalog))
        .collect())
}

fn render(diffs: &[CatalogDiff], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(diffs).map_err(CliError::failure)?;
            println!("{rendered}");
        }
        OutputFormat::Text => {
            for diff in diffs {
                let locale = diff.locale.map_or("?", LocaleCode::code);
                println!(
                    "{locale}: {} missing, {} extra",
                    diff.missing.len(),
                    diff.extra.len()
                );
                for key in &diff.missing {
                    println!("  missing {key}");
                }
                for key in &diff.extra {
                    println!("  extra   {key}");
                }
            }
        }
    }
    Ok(())
}

pub(crate) async fn handle_check_translations(
    args: CheckTranslationsArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let catalogs = load_catalogs(args.dir.as_deref()).await?;
    let diffs = check_catalogs(&catalogs)?;
    render(&diffs, format)?;

    let missing: usize = diffs.iter().map(|diff| diff.missing.len()).sum();
    if missing > 0 {
        return Err(CliError::failure(anyhow!(
            "{missing} translation keys missing"
        )));
    }
    Ok(())
}
