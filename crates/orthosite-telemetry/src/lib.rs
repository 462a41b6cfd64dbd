#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Telemetry primitives shared across the Orthosite workspace.
//!
//! This crate centralises logging, metrics, and request-context helpers so the
//! web server, binary, and CLI adopt a consistent observability story.
//!
//! Layout: `init.rs` (subscriber setup), `context.rs` (app span, request id scope),
//! `layers.rs` (request id middleware), `metrics.rs` (Prometheus registry).

pub mod context;
pub mod error;
pub mod init;
pub mod layers;
pub mod metrics;

pub use context::{AppSpanGuard, current_request_id, record_locale, with_request_id};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LogTarget, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, request_id_text, set_request_id_layer};
pub use metrics::{CONTACT_ACCEPTED, CONTACT_FAILED, CONTACT_REJECTED, Metrics, MetricsSnapshot};
