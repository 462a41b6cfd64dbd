//! Process-wide catalog cache and the locale config loader.
//!
//! # Design
//! - One `OnceCell` per locale; catalogs are immutable once loaded.
//! - A failed load leaves the cell empty, so the next request retries. There
//!   are no retries within a request.
//! - Non-default locales are bound with the default catalog as fallback.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error};

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult};
use crate::locale::{DEFAULT_LOCALE, LOCALE_COUNT, LocaleCode};
use crate::messages::Messages;
use crate::policy::MissingMessagePolicy;
use crate::source::CatalogSource;

/// Locale plus its translator, ready for rendering.
#[derive(Clone, Debug)]
pub struct LocaleConfig {
    /// Resolved locale.
    pub locale: LocaleCode,
    /// Translator with fallback wired in.
    pub messages: Messages,
}

/// Lazily loaded, shared catalogs for every supported locale.
#[derive(Debug)]
pub struct MessageStore {
    source: CatalogSource,
    policy: Arc<MissingMessagePolicy>,
    cells: [OnceCell<Arc<Catalog>>; LOCALE_COUNT],
}

impl MessageStore {
    /// Build a store over `source` that reports misses to `policy`.
    #[must_use]
    pub fn new(source: CatalogSource, policy: Arc<MissingMessagePolicy>) -> Self {
        Self {
            source,
            policy,
            cells: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    /// Embedded catalogs with the default policy.
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(
            CatalogSource::Embedded,
            Arc::new(MissingMessagePolicy::default()),
        )
    }

    /// Catalog source backing the store.
    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Shared missing-message policy.
    #[must_use]
    pub const fn policy(&self) -> &Arc<MissingMessagePolicy> {
        &self.policy
    }

    /// Number of catalogs currently cached.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.initialized()).count()
    }

    /// Cached catalog for `locale`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be read or parsed.
    pub async fn catalog(&self, locale: LocaleCode) -> I18nResult<Arc<Catalog>> {
        let cell = &self.cells[locale.index()];
        let catalog = cell
            .get_or_try_init(|| async {
                let catalog = self.source.load(locale).await.map_err(|err| {
                    error!(
                        error = %err,
                        locale = locale.code(),
                        source = self.source.kind(),
                        "failed to load message catalog"
                    );
                    err
                })?;
                debug!(
                    locale = locale.code(),
                    source = self.source.kind(),
                    "message catalog loaded"
                );
                Ok::<_, I18nError>(Arc::new(catalog))
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    /// Produce the locale config: the locale and its translator.
    ///
    /// # Errors
    ///
    /// Returns an error when the locale's catalog, or the default catalog used
    /// as fallback, cannot be loaded.
    pub async fn load(&self, locale: LocaleCode) -> I18nResult<LocaleConfig> {
        let primary = self.catalog(locale).await?;
        let fallback = if locale.is_default() {
            None
        } else {
            Some(self.catalog(DEFAULT_LOCALE).await?)
        };
        Ok(LocaleConfig {
            locale,
            messages: Messages::new(primary, fallback, Arc::clone(&self.policy)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Placeholder;

    fn directory_store(files: &[(&str, &str)]) -> (tempfile::TempDir, MessageStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, body) in files {
            std::fs::write(dir.path().join(name), body).expect("write catalog");
        }
        let store = MessageStore::new(
            CatalogSource::Directory(dir.path().to_path_buf()),
            Arc::new(MissingMessagePolicy::new(Placeholder::Empty)),
        );
        (dir, store)
    }

    #[tokio::test]
    async fn default_locale_loads_without_fallback() {
        let store = MessageStore::embedded();
        let config = store.load(LocaleCode::En).await.expect("en loads");
        assert_eq!(config.locale, LocaleCode::En);
        assert_eq!(config.messages.fallback_locale(), None);
        assert!(config.messages.has("nav.home"));
    }

    #[tokio::test]
    async fn non_default_locale_registers_default_fallback() {
        let (_dir, store) = directory_store(&[
            ("en.json", r#"{"about":{"title":"About Us"}}"#),
            ("es.json", r#"{"about":{"intro":"Hola"}}"#),
        ]);
        let config = store.load(LocaleCode::Es).await.expect("es loads");
        assert_eq!(config.messages.fallback_locale(), Some(LocaleCode::En));
        assert_eq!(config.messages.text("about.title"), "About Us");
        assert_eq!(config.messages.text("about.intro"), "Hola");
    }

    #[tokio::test]
    async fn catalogs_are_cached_per_locale() {
        let (dir, store) = directory_store(&[("en.json", r#"{"nav":{"home":"Home"}}"#)]);
        let first = store.catalog(LocaleCode::En).await.expect("first load");
        std::fs::remove_file(dir.path().join("en.json")).expect("remove catalog");
        let second = store.catalog(LocaleCode::En).await.expect("served from cache");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.loaded_count(), 1);
    }

    #[tokio::test]
    async fn failed_loads_are_not_cached() {
        let (dir, store) = directory_store(&[("en.json", "{ broken")]);
        let err = store.load(LocaleCode::En).await.expect_err("malformed");
        assert!(matches!(err, I18nError::CatalogParse { .. }));
        assert_eq!(store.loaded_count(), 0);

        std::fs::write(dir.path().join("en.json"), r#"{"nav":{"home":"Home"}}"#)
            .expect("repair catalog");
        let config = store.load(LocaleCode::En).await.expect("reload succeeds");
        assert_eq!(config.messages.text("nav.home"), "Home");
    }

    #[tokio::test]
    async fn missing_fallback_catalog_fails_the_load() {
        let (_dir, store) = directory_store(&[("es.json", r#"{"nav":{"home":"Inicio"}}"#)]);
        let err = store.load(LocaleCode::Es).await.expect_err("en.json missing");
        assert!(matches!(
            err,
            I18nError::CatalogRead {
                locale: LocaleCode::En,
                ..
            }
        ));
    }
}
