//! The closed set of locales served by the site.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// Spanish.
    Es,
}

/// Number of supported locales.
pub const LOCALE_COUNT: usize = 2;

/// Default locale; its catalog is authoritative and it is the redirect target.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; LOCALE_COUNT] {
        [Self::En, Self::Es]
    }

    /// URL segment and catalog file stem for the locale.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Human-friendly label for the language switcher.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    /// Open Graph locale tag.
    #[must_use]
    pub const fn og_locale(self) -> &'static str {
        match self {
            Self::En => "en_US",
            Self::Es => "es_US",
        }
    }

    /// Whether this is the default locale.
    #[must_use]
    pub fn is_default(self) -> bool {
        self == DEFAULT_LOCALE
    }

    /// Dense index used by per-locale tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::En => 0,
            Self::Es => 1,
        }
    }

    /// Exact match against a URL segment. Segments are case-sensitive.
    #[must_use]
    pub fn from_code(segment: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|locale| locale.code() == segment)
    }
}

impl Display for LocaleCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

impl FromStr for LocaleCode {
    type Err = I18nError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value).ok_or_else(|| I18nError::UnsupportedLocale {
            value: value.to_string(),
        })
    }
}
