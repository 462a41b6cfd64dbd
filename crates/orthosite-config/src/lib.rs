#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]
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

//! Runtime configuration for the Orthosite web server.
//!
//! Layout: `defaults.rs` (fallback values and variable names), `error.rs`
//! (`ConfigError`), `model.rs` (`SiteConfig` and friends), `loader.rs`
//! (environment parsing).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use model::{LogOutput, SiteConfig};
