//! Path inspection for locale-prefixed URLs.
//!
//! # Design
//! - Routing configuration is a compile-time constant; nothing about the
//!   locale set is derived at runtime.
//! - Decisions are pure functions of the path and query, so the HTTP
//!   middleware stays a thin adapter.
//! - Every redirect target carries a supported prefix, so following it never
//!   redirects again.

use crate::locale::{DEFAULT_LOCALE, LocaleCode};

/// Whether the default locale appears in URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalePrefix {
    /// Every page URL carries a locale segment.
    Always,
    /// The default locale is served without a prefix; other locales keep theirs.
    AsNeeded,
}

/// Fixed locale routing configuration.
#[derive(Clone, Copy, Debug)]
pub struct LocaleRouting {
    /// Locales that may appear as the first path segment.
    pub locales: &'static [LocaleCode],
    /// Locale used when a request carries none.
    pub default_locale: LocaleCode,
    /// Prefix mode.
    pub prefix: LocalePrefix,
    /// Path prefixes never localized (API and internal assets).
    pub excluded_prefixes: &'static [&'static str],
}

/// Routing configuration served by the site.
pub const ROUTING: LocaleRouting = LocaleRouting {
    locales: &[LocaleCode::En, LocaleCode::Es],
    default_locale: DEFAULT_LOCALE,
    prefix: LocalePrefix::Always,
    excluded_prefixes: &["/api", "/_assets"],
};

/// Outcome of inspecting one request path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Excluded path; not localized at all.
    Skip,
    /// Path carries a valid locale; proceed unchanged.
    Pass {
        /// Locale named by the first segment.
        locale: LocaleCode,
    },
    /// Redirect the client to `location`.
    Redirect {
        /// Locale the target is prefixed with (or served as, when unprefixed).
        locale: LocaleCode,
        /// Target path and query.
        location: String,
    },
    /// Serve `path` internally without changing the browser URL.
    Rewrite {
        /// Locale the rewritten path carries.
        locale: LocaleCode,
        /// Internal path and query.
        path: String,
    },
}

impl LocaleRouting {
    /// Whether the path bypasses localization.
    ///
    /// API and asset prefixes match on whole segments; any segment containing
    /// a dot is treated as a file request.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        let prefixed = self.excluded_prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        });
        prefixed || path.split('/').any(|segment| segment.contains('.'))
    }

    /// Supported locale named by the first segment, with the remaining path.
    ///
    /// The remainder is empty or starts with `/`.
    #[must_use]
    pub fn split_locale<'a>(&self, path: &'a str) -> Option<(LocaleCode, &'a str)> {
        let trimmed = path.strip_prefix('/')?;
        let (segment, rest) = match trimmed.find('/') {
            Some(index) => (&trimmed[..index], &trimmed[index..]),
            None => (trimmed, ""),
        };
        let locale = LocaleCode::from_code(segment)?;
        self.locales
            .contains(&locale)
            .then_some((locale, rest))
    }

    /// Decide how to treat a request for `path` with optional `query`.
    ///
    /// Trailing slashes are not part of any page URL: a path ending in `/`
    /// is redirected to its trimmed, prefixed form in one hop.
    #[must_use]
    pub fn decide(&self, path: &str, query: Option<&str>) -> RouteDecision {
        if self.is_excluded(path) {
            return RouteDecision::Skip;
        }
        let canonical = trim_trailing_slash(path);
        let trimmed = canonical.len() != path.len();
        match (self.split_locale(canonical), self.prefix) {
            (Some((locale, rest)), LocalePrefix::AsNeeded) if locale == self.default_locale => {
                RouteDecision::Redirect {
                    locale,
                    location: with_query(if rest.is_empty() { "/" } else { rest }, query),
                }
            }
            (Some((locale, _)), _) if trimmed => RouteDecision::Redirect {
                locale,
                location: with_query(canonical, query),
            },
            (Some((locale, _)), _) => RouteDecision::Pass { locale },
            (None, LocalePrefix::Always) => RouteDecision::Redirect {
                locale: self.default_locale,
                location: with_query(&self.localized_path(self.default_locale, canonical), query),
            },
            (None, LocalePrefix::AsNeeded) if trimmed => RouteDecision::Redirect {
                locale: self.default_locale,
                location: with_query(canonical, query),
            },
            (None, LocalePrefix::AsNeeded) => RouteDecision::Rewrite {
                locale: self.default_locale,
                path: with_query(&self.localized_path(self.default_locale, canonical), query),
            },
        }
    }

    /// Prefix `path` with `locale`. `/` maps to `/{locale}`.
    #[must_use]
    pub fn localized_path(&self, locale: LocaleCode, path: &str) -> String {
        let rest = path.trim_start_matches('/');
        if rest.is_empty() {
            format!("/{}", locale.code())
        } else {
            format!("/{}/{rest}", locale.code())
        }
    }

    /// Public URL path for `route` in `locale`, honouring the prefix mode.
    #[must_use]
    pub fn href(&self, locale: LocaleCode, route: &str) -> String {
        if self.prefix == LocalePrefix::AsNeeded && locale == self.default_locale {
            if route.is_empty() {
                "/".to_string()
            } else {
                route.to_string()
            }
        } else {
            self.localized_path(locale, route)
        }
    }
}

/// `path` without trailing slashes; the root stays `/`.
fn trim_trailing_slash(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    }
}
