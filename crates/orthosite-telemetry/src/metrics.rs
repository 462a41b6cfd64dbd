//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the counters a localized marketing site needs: request outcomes,
//!   locale redirects, missing translations and contact form submissions.

use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

/// Prometheus-backed metrics registry shared across the site.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    locale_redirects_total: IntCounterVec,
    missing_messages_total: IntCounterVec,
    contact_submissions_total: IntCounterVec,
    catalogs_loaded: IntGauge,
}

/// Snapshot of selected counters for health reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Redirects issued towards the default locale.
    pub locale_redirects_total: u64,
    /// Translation lookups that fell through to a placeholder.
    pub missing_messages_total: u64,
    /// Contact submissions that passed validation.
    pub contact_accepted_total: u64,
    /// Contact submissions rejected by validation.
    pub contact_rejected_total: u64,
    /// Locale catalogs currently cached in memory.
    pub catalogs_loaded: i64,
}

/// Outcome label recorded for contact form submissions.
pub const CONTACT_ACCEPTED: &str = "accepted";
/// Outcome label recorded for rejected contact form submissions.
pub const CONTACT_REJECTED: &str = "rejected";
/// Outcome label recorded when the submission sink fails.
pub const CONTACT_FAILED: &str = "failed";

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = counter_vec(
            "http_requests_total",
            "Total HTTP requests served",
            &["route", "code"],
        )?;
        let locale_redirects_total = counter_vec(
            "locale_redirects_total",
            "Requests redirected to a locale-prefixed path",
            &["locale"],
        )?;
        let missing_messages_total = counter_vec(
            "missing_messages_total",
            "Translation lookups that produced a placeholder",
            &["locale"],
        )?;
        let contact_submissions_total = counter_vec(
            "contact_submissions_total",
            "Contact form submissions by outcome",
            &["outcome"],
        )?;
        let catalogs_loaded = IntGauge::with_opts(Opts::new(
            "catalogs_loaded",
            "Locale catalogs cached in memory",
        ))
        .map_err(|source| TelemetryError::MetricsCollector {
            name: "catalogs_loaded",
            source,
        })?;

        register(&registry, "http_requests_total", &http_requests_total)?;
        register(&registry, "locale_redirects_total", &locale_redirects_total)?;
        register(&registry, "missing_messages_total", &missing_messages_total)?;
        register(
            &registry,
            "contact_submissions_total",
            &contact_submissions_total,
        )?;
        register(&registry, "catalogs_loaded", &catalogs_loaded)?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                locale_redirects_total,
                missing_messages_total,
                contact_submissions_total,
                catalogs_loaded,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Increment the redirect counter for the locale the client was sent to.
    pub fn inc_locale_redirect(&self, locale: &str) {
        self.inner
            .locale_redirects_total
            .with_label_values(&[locale])
            .inc();
    }

    /// Increment the missing translation counter for a locale.
    pub fn inc_missing_message(&self, locale: &str) {
        self.inner
            .missing_messages_total
            .with_label_values(&[locale])
            .inc();
    }

    /// Increment the contact submission counter for an outcome label.
    pub fn inc_contact_submission(&self, outcome: &str) {
        self.inner
            .contact_submissions_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Record how many locale catalogs are cached.
    pub fn set_catalogs_loaded(&self, count: i64) {
        self.inner.catalogs_loaded.set(count);
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::MetricsEncode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::MetricsUtf8 { source })
    }

    /// Take a point-in-time snapshot of the site counters, summing the
    /// per-locale series for the supplied locale labels.
    #[must_use]
    pub fn snapshot(&self, locales: &[&str]) -> MetricsSnapshot {
        MetricsSnapshot {
            locale_redirects_total: sum_counter(&self.inner.locale_redirects_total, locales),
            missing_messages_total: sum_counter(&self.inner.missing_messages_total, locales),
            contact_accepted_total: self
                .inner
                .contact_submissions_total
                .with_label_values(&[CONTACT_ACCEPTED])
                .get(),
            contact_rejected_total: self
                .inner
                .contact_submissions_total
                .with_label_values(&[CONTACT_REJECTED])
                .get(),
            catalogs_loaded: self.inner.catalogs_loaded.get(),
        }
    }
}

fn counter_vec(name: &'static str, help: &str, labels: &[&str]) -> Result<IntCounterVec> {
    IntCounterVec::new(Opts::new(name, help), labels)
        .map_err(|source| TelemetryError::MetricsCollector { name, source })
}

fn register<C>(registry: &Registry, name: &'static str, collector: &C) -> Result<()>
where
    C: prometheus::core::Collector + Clone + 'static,
{
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| TelemetryError::MetricsRegister { name, source })
}

fn sum_counter(counter: &IntCounterVec, labels: &[&str]) -> u64 {
    labels
        .iter()
        .map(|label| counter.with_label_values(&[*label]).get())
        .sum()
}
