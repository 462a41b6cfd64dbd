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

//! HTTP surface of the Orthosite marketing site.
//!
//! Requests pass through the locale middleware before routing, page handlers
//! receive a `RenderContext` from the locale-aware layout, and every failure
//! in locale resolution ends in the not-found page.
//!
//! Layout: `http/` (router pieces and middleware), `views/` (HTML templates),
//! `state.rs` (shared dependencies), `error.rs` (server lifecycle errors).

pub mod error;
pub mod http;
pub mod router;
pub mod state;
mod views;

pub use error::{WebServerError, WebServerResult};
pub use http::layout::{
    GenerationTarget, LayoutError, LayoutStage, LocaleParams, RenderContext, SITE_ROUTES,
    generate_static_params, generation_targets, published_routes, resolve_layout,
};
pub use router::SiteServer;
pub use state::SiteState;
