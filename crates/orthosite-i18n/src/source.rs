//! Where catalogs come from: a static locale → loader mapping.
//!
//! # Design
//! - The embedded source compiles every catalog into the binary, so the set of
//!   loadable locales is the `LocaleCode` enum and nothing else.
//! - The directory source reads `<dir>/<code>.json` at first use, for content
//!   edits without a rebuild.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleCode;

/// Origin of message catalogs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// Catalogs compiled into the binary.
    #[default]
    Embedded,
    /// Catalogs read from `<dir>/<code>.json`.
    Directory(PathBuf),
}

impl CatalogSource {
    /// Load and parse the catalog for `locale`.
    ///
    /// # Errors
    ///
    /// Returns an error when the resource cannot be read or parsed.
    pub async fn load(&self, locale: LocaleCode) -> I18nResult<Catalog> {
        match self {
            Self::Embedded => Catalog::parse(locale, embedded(locale)),
            Self::Directory(dir) => {
                let path = catalog_path(dir, locale);
                let raw = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| I18nError::CatalogRead {
                        locale,
                        path: path.clone(),
                        source,
                    })?;
                Catalog::parse(locale, &raw)
            }
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::Directory(_) => "directory",
        }
    }
}

/// Conventional catalog location for a locale inside `dir`.
#[must_use]
pub fn catalog_path(dir: &Path, locale: LocaleCode) -> PathBuf {
    dir.join(format!("{}.json", locale.code()))
}

/// Raw embedded catalog text for a locale.
#[must_use]
pub const fn embedded(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../i18n/en.json"),
        LocaleCode::Es => include_str!("../i18n/es.json"),
    }
}
