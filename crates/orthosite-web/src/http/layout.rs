//! Locale-aware layout: validates the `{locale}` route segment and loads the
//! locale's messages before any page renders.
//!
//! # Design
//! - The locale set is closed; an unknown segment is terminal (not-found),
//!   never redirected.
//! - Catalog failures are terminal for the request and render the same
//!   not-found page, so no partially translated page is ever served.
//! - Each request walks `Unresolved -> Validating -> Valid -> MessagesLoaded
//!   -> Rendering`, or ends in `Invalid`/`LoadError`. The stage is recorded
//!   on the request span.

use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRequestParts, RawPathParams};
use axum::http::request::Parts;
use orthosite_content::{Post, posts};
use orthosite_i18n::{I18nError, LocaleCode, LocaleRouting, MessageStore, Messages, ROUTING};
use orthosite_telemetry::record_locale;
use tracing::{Span, debug, warn};

use crate::http::errors::PageError;
use crate::http::pages::not_found_for;
use crate::state::SiteState;

/// Route paths served below every locale prefix. `/` is the home page.
pub const SITE_ROUTES: [&str; 5] = ["/", "/about", "/services", "/blog", "/contact"];

const LOCALE_PARAM: &str = "locale";

/// Route parameters for one statically generated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleParams {
    /// Locale segment value.
    pub locale: LocaleCode,
}

/// One page to pre-render: a locale and a route below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTarget {
    /// Locale prefix.
    pub locale: LocaleCode,
    /// Route path below the prefix.
    pub route: String,
}

impl GenerationTarget {
    /// Public URL path of the target.
    #[must_use]
    pub fn path(&self) -> String {
        ROUTING.href(self.locale, &self.route)
    }
}

/// Fixed site routes followed by every blog post route.
#[must_use]
pub fn published_routes() -> Vec<String> {
    SITE_ROUTES
        .iter()
        .map(|route| (*route).to_string())
        .chain(posts().iter().map(Post::route))
        .collect()
}

/// Parameters for every supported locale, default first.
#[must_use]
pub fn generate_static_params() -> Vec<LocaleParams> {
    ROUTING
        .locales
        .iter()
        .map(|&locale| LocaleParams { locale })
        .collect()
}

/// Cross product of every supported locale with `routes`.
#[must_use]
pub fn generation_targets<I, R>(routes: I) -> Vec<GenerationTarget>
where
    I: IntoIterator<Item = R>,
    R: AsRef<str>,
{
    let routes: Vec<String> = routes
        .into_iter()
        .map(|route| route.as_ref().to_string())
        .collect();
    generate_static_params()
        .into_iter()
        .flat_map(|params| {
            routes.iter().map(move |route| GenerationTarget {
                locale: params.locale,
                route: route.clone(),
            })
        })
        .collect()
}

/// Per-request progress through the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStage {
    /// No locale inspected yet.
    Unresolved,
    /// Checking the locale segment.
    Validating,
    /// Segment is a supported locale.
    Valid,
    /// Segment is not a supported locale.
    Invalid,
    /// Messages for the locale are loaded.
    MessagesLoaded,
    /// Catalog loading failed.
    LoadError,
    /// Page handler is producing output.
    Rendering,
}

impl LayoutStage {
    /// Span-friendly name of the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Validating => "validating",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::MessagesLoaded => "messages_loaded",
            Self::LoadError => "load_error",
            Self::Rendering => "rendering",
        }
    }

    /// Whether the request ends in the not-found page.
    #[must_use]
    pub const fn is_not_found(self) -> bool {
        matches!(self, Self::Invalid | Self::LoadError)
    }

    fn record(self) {
        Span::current().record("layout_stage", self.as_str());
    }
}

/// Why the layout could not produce a render context.
#[derive(Debug)]
pub enum LayoutError {
    /// The locale segment is not in the supported set.
    InvalidLocale {
        /// Segment as received.
        value: String,
    },
    /// The locale's catalog, or its fallback, failed to load.
    CatalogLoad {
        /// Locale being rendered.
        locale: LocaleCode,
        /// Underlying loader error.
        source: I18nError,
    },
}

impl LayoutError {
    /// Terminal stage reached by this error.
    #[must_use]
    pub const fn stage(&self) -> LayoutStage {
        match self {
            Self::InvalidLocale { .. } => LayoutStage::Invalid,
            Self::CatalogLoad { .. } => LayoutStage::LoadError,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocale { .. } => formatter.write_str("unsupported locale segment"),
            Self::CatalogLoad { .. } => formatter.write_str("message catalog unavailable"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidLocale { .. } => None,
            Self::CatalogLoad { source, .. } => Some(source),
        }
    }
}

/// Locale and translator handed to page handlers.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Validated locale of the request.
    pub locale: LocaleCode,
    /// Translator with default-locale fallback.
    pub messages: Messages,
    /// Routing used to build links.
    pub routing: LocaleRouting,
}

/// Validate `segment` and load its messages.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidLocale`] for segments outside the supported
/// set and [`LayoutError::CatalogLoad`] when messages cannot be loaded.
pub async fn resolve_layout(
    store: &MessageStore,
    segment: &str,
) -> Result<RenderContext, LayoutError> {
    LayoutStage::Validating.record();
    let Some(locale) = LocaleCode::from_code(segment).filter(|l| ROUTING.locales.contains(l))
    else {
        LayoutStage::Invalid.record();
        debug!(segment, "rejecting unsupported locale segment");
        return Err(LayoutError::InvalidLocale {
            value: segment.to_string(),
        });
    };
    LayoutStage::Valid.record();
    record_locale(locale.code());

    match store.load(locale).await {
        Ok(config) => {
            LayoutStage::MessagesLoaded.record();
            Ok(RenderContext {
                locale: config.locale,
                messages: config.messages,
                routing: ROUTING,
            })
        }
        Err(source) => {
            LayoutStage::LoadError.record();
            warn!(locale = locale.code(), error = %source, "layout could not load messages");
            Err(LayoutError::CatalogLoad { locale, source })
        }
    }
}

impl FromRequestParts<Arc<SiteState>> for RenderContext {
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<SiteState>,
    ) -> Result<Self, Self::Rejection> {
        LayoutStage::Unresolved.record();
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|_| PageError::not_found(None))?;
        let segment = params
            .iter()
            .find_map(|(name, value)| (name == LOCALE_PARAM).then(|| value.to_string()))
            .ok_or_else(|| PageError::not_found(None))?;

        let result = resolve_layout(&state.store, &segment).await;
        state.refresh_catalog_gauge();
        match result {
            Ok(context) => {
                LayoutStage::Rendering.record();
                Ok(RenderContext {
                    routing: state.routing,
                    ..context
                })
            }
            Err(LayoutError::InvalidLocale { .. }) => {
                Err(not_found_for(state, state.routing.default_locale).await)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthosite_i18n::{CatalogSource, MissingMessagePolicy};

    #[test]
    fn static_params_cover_each_supported_locale_once() {
        let params = generate_static_params();
        assert_eq!(
            params,
            vec![
                LocaleParams {
                    locale: LocaleCode::En
                },
                LocaleParams {
                    locale: LocaleCode::Es
                },
            ]
        );
    }

    #[test]
    fn generation_targets_are_the_locale_route_product() {
        let targets = generation_targets(SITE_ROUTES);
        assert_eq!(targets.len(), 2 * SITE_ROUTES.len());
        let paths: Vec<String> = targets.iter().map(GenerationTarget::path).collect();
        assert!(paths.contains(&"/en".to_string()));
        assert!(paths.contains(&"/es/contact".to_string()));
        assert!(paths.iter().all(|p| p.starts_with("/en") || p.starts_with("/es")));
    }

    #[test]
    fn published_routes_include_posts() {
        let routes = published_routes();
        assert_eq!(&routes[..SITE_ROUTES.len()], &SITE_ROUTES.map(str::to_string)[..]);
        assert!(routes.contains(&"/blog/caring-for-your-brace".to_string()));
    }

    #[tokio::test]
    async fn supported_locale_resolves_with_messages() {
        let store = MessageStore::embedded();
        let context = resolve_layout(&store, "es").await.expect("es resolves");
        assert_eq!(context.locale, LocaleCode::Es);
        assert_eq!(context.messages.locale(), LocaleCode::Es);
        assert_eq!(context.messages.fallback_locale(), Some(LocaleCode::En));

        for locale in ROUTING.locales {
            let context = resolve_layout(&store, locale.code())
                .await
                .expect("supported locale resolves");
            assert!(context.messages.has("nav.home"), "{}", locale.code());
            let catalog = store.catalog(*locale).await.expect("cached catalog");
            assert!(!catalog.leaf_keys().is_empty(), "{}", locale.code());
        }
    }

    #[tokio::test]
    async fn unsupported_segments_are_invalid() {
        let store = MessageStore::embedded();
        for segment in ["fr", "EN", "", "en-US"] {
            let err = resolve_layout(&store, segment).await.expect_err(segment);
            assert!(matches!(err, LayoutError::InvalidLocale { .. }), "{segment}");
            assert_eq!(err.stage(), LayoutStage::Invalid);
            assert!(err.stage().is_not_found());
        }
        assert_eq!(store.loaded_count(), 0);
    }

    #[tokio::test]
    async fn catalog_failures_become_load_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("en.json"), "[1, 2]").expect("write catalog");
        let store = MessageStore::new(
            CatalogSource::Directory(dir.path().to_path_buf()),
            Arc::new(MissingMessagePolicy::default()),
        );
        let err = resolve_layout(&store, "en").await.expect_err("bad shape");
        assert!(matches!(
            err,
            LayoutError::CatalogLoad {
                locale: LocaleCode::En,
                source: I18nError::CatalogShape { .. },
            }
        ));
        assert_eq!(err.stage(), LayoutStage::LoadError);
        assert_eq!(err.to_string(), "message catalog unavailable");
    }

    #[tokio::test]
    async fn empty_catalogs_are_never_rendered() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("en.json"), "{}").expect("write catalog");
        std::fs::write(dir.path().join("es.json"), "{}").expect("write catalog");
        let store = MessageStore::new(
            CatalogSource::Directory(dir.path().to_path_buf()),
            Arc::new(MissingMessagePolicy::default()),
        );
        for segment in ["en", "es"] {
            let err = resolve_layout(&store, segment).await.expect_err(segment);
            assert!(
                matches!(
                    err,
                    LayoutError::CatalogLoad {
                        source: I18nError::CatalogEmpty { .. },
                        ..
                    }
                ),
                "{segment}"
            );
        }
        assert_eq!(store.loaded_count(), 0);
    }
}
