//! Error types for catalog loading and locale parsing.
//!
//! # Design
//! - Keep error messages constant; carry the locale and path as fields.
//! - Missing translation keys are not errors; they are handled by the policy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::locale::LocaleCode;

/// Result alias for i18n operations.
pub type I18nResult<T> = Result<T, I18nError>;

/// Errors raised while resolving locales or loading catalogs.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A locale string is outside the supported set.
    #[error("unsupported locale")]
    UnsupportedLocale {
        /// Value supplied by the caller.
        value: String,
    },
    /// Reading a catalog resource failed.
    #[error("failed to read message catalog")]
    CatalogRead {
        /// Locale whose catalog was requested.
        locale: LocaleCode,
        /// Resource path that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A catalog resource was not valid JSON.
    #[error("failed to parse message catalog")]
    CatalogParse {
        /// Locale whose catalog was requested.
        locale: LocaleCode,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// A catalog parsed but its root was not a JSON object.
    #[error("message catalog root must be an object")]
    CatalogShape {
        /// Locale whose catalog was requested.
        locale: LocaleCode,
    },
    /// A catalog parsed to an object with no entries.
    #[error("message catalog is empty")]
    CatalogEmpty {
        /// Locale whose catalog was requested.
        locale: LocaleCode,
    },
}
