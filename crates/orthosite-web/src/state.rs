//! Shared dependencies handed to every handler.

use std::sync::Arc;

use orthosite_config::SiteConfig;
use orthosite_content::{ContactSink, LogContactSink};
use orthosite_i18n::{LocaleRouting, MessageStore, ROUTING};
use orthosite_telemetry::Metrics;

/// Read-only state shared across requests.
pub struct SiteState {
    /// Catalog cache and loader.
    pub store: Arc<MessageStore>,
    /// Prometheus registry.
    pub metrics: Metrics,
    /// Locale routing used by the middleware.
    pub routing: LocaleRouting,
    /// Public origin for canonical and alternate links.
    pub base_url: String,
    /// Destination for accepted contact submissions.
    pub contact_sink: Arc<dyn ContactSink>,
}

impl SiteState {
    /// Assemble state from configuration and already-built dependencies.
    #[must_use]
    pub fn new(config: &SiteConfig, store: Arc<MessageStore>, metrics: Metrics) -> Self {
        Self {
            store,
            metrics,
            routing: ROUTING,
            base_url: config.base_url.clone(),
            contact_sink: Arc::new(LogContactSink),
        }
    }

    /// Replace the contact sink.
    #[must_use]
    pub fn with_contact_sink(mut self, sink: Arc<dyn ContactSink>) -> Self {
        self.contact_sink = sink;
        self
    }

    /// Replace the locale routing.
    #[must_use]
    pub const fn with_routing(mut self, routing: LocaleRouting) -> Self {
        self.routing = routing;
        self
    }

    /// Absolute URL for a site path.
    #[must_use]
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn refresh_catalog_gauge(&self) {
        let loaded = i64::try_from(self.store.loaded_count()).unwrap_or(i64::MAX);
        self.metrics.set_catalogs_loaded(loaded);
    }
}
