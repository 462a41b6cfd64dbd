//! Locale middleware: runs before routing and makes sure every localizable
//! request carries a supported locale prefix.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use orthosite_i18n::RouteDecision;
use orthosite_telemetry::record_locale;
use tracing::{debug, warn};

use crate::state::SiteState;

/// Apply the routing decision for the request path.
///
/// Excluded paths and already-prefixed paths continue unchanged; trailing
/// slashes are trimmed by redirect. Unprefixed paths get a 307 to the
/// default-locale URL (query preserved), or are
/// rewritten in place when the routing serves the default locale unprefixed.
pub(crate) async fn localize(
    State(state): State<Arc<SiteState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let decision = state
        .routing
        .decide(req.uri().path(), req.uri().query());
    match decision {
        RouteDecision::Skip => next.run(req).await,
        RouteDecision::Pass { locale } => {
            record_locale(locale.code());
            next.run(req).await
        }
        RouteDecision::Redirect { locale, location } => {
            debug!(from = req.uri().path(), to = %location, "redirecting to localized path");
            state.metrics.inc_locale_redirect(locale.code());
            Redirect::temporary(&location).into_response()
        }
        RouteDecision::Rewrite { locale, path } => match path.parse::<Uri>() {
            Ok(uri) => {
                record_locale(locale.code());
                *req.uri_mut() = uri;
                next.run(req).await
            }
            Err(err) => {
                warn!(error = %err, path = %path, "rewritten path is not a valid uri");
                next.run(req).await
            }
        },
    }
}
