//! Router construction and server host for the site.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::Request,
    middleware,
    routing::get,
};
use orthosite_telemetry::{
    build_sha, propagate_request_id_layer, request_id_text, set_request_id_layer,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::RequestId;
use tower_http::trace::TraceLayer;
use tracing::{Span, info};

use crate::error::{WebServerError, WebServerResult};
use crate::http::constants::STYLESHEET_PATH;
use crate::http::health::{health, metrics};
use crate::http::locale::localize;
use crate::http::pages::{
    about, blog_index, blog_post, contact_form, contact_submit, fallback, home, services,
};
use crate::http::seo::{robots, sitemap, stylesheet};
use crate::http::telemetry::HttpMetricsLayer;
use crate::state::SiteState;

/// Axum router wrapper that hosts the localized site.
pub struct SiteServer {
    router: Router,
}

impl SiteServer {
    /// Wire routes, the locale middleware and request tracing around `state`.
    ///
    /// The locale middleware wraps the page router as a fallback service so
    /// that rewritten URIs are routed after the rewrite.
    #[must_use]
    pub fn new(state: Arc<SiteState>) -> Self {
        let pages = Self::build_router()
            .layer(HttpMetricsLayer::new(state.metrics.clone()))
            .with_state(Arc::clone(&state));

        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request_id_text(request.extensions().get::<RequestId>());
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    locale = tracing::field::Empty,
                    layout_stage = tracing::field::Empty,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );

        let router = Router::new()
            .fallback_service(pages)
            .layer(middleware::from_fn_with_state(state, localize))
            .layer(
                ServiceBuilder::new()
                    // Generated ids must exist before propagation reads them.
                    .layer(set_request_id_layer())
                    .layer(propagate_request_id_layer())
                    .layer(trace_layer),
            );

        Self { router }
    }

    fn build_router() -> Router<Arc<SiteState>> {
        Self::service_routes()
            .merge(Self::page_routes())
            .fallback(fallback)
    }

    fn service_routes() -> Router<Arc<SiteState>> {
        Router::new()
            .route("/api/health", get(health))
            .route("/api/metrics", get(metrics))
            .route("/robots.txt", get(robots))
            .route("/sitemap.xml", get(sitemap))
            .route(STYLESHEET_PATH, get(stylesheet))
    }

    fn page_routes() -> Router<Arc<SiteState>> {
        Router::new()
            .route("/{locale}", get(home))
            .route("/{locale}/about", get(about))
            .route("/{locale}/services", get(services))
            .route("/{locale}/blog", get(blog_index))
            .route("/{locale}/blog/{slug}", get(blog_post))
            .route("/{locale}/contact", get(contact_form).post(contact_submit))
    }

    /// Router for in-process requests, as used by tests and static export.
    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Consume the server, returning the router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind `addr` and serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates unexpectedly.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| WebServerError::Bind { addr, source })?;
        info!(%addr, "site listening");
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| WebServerError::Serve { source })
    }
}
