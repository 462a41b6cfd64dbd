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

//! Locale resolution and message catalogs for the Orthosite web front.
//!
//! Layout: `locale.rs` (closed locale set), `routing.rs` (path inspection and
//! redirect decisions), `catalog.rs` (parsed JSON trees), `source.rs` (static
//! locale → loader mapping), `store.rs` (process-wide cache and the locale
//! config loader), `messages.rs` (translation lookup with fallback),
//! `policy.rs` (missing-message handling), `check.rs` (catalog completeness).

pub mod catalog;
pub mod check;
pub mod error;
pub mod locale;
pub mod messages;
pub mod policy;
pub mod routing;
pub mod source;
pub mod store;

pub use catalog::Catalog;
pub use check::{CatalogDiff, compare_catalogs};
pub use error::{I18nError, I18nResult};
pub use locale::{DEFAULT_LOCALE, LOCALE_COUNT, LocaleCode};
pub use messages::Messages;
pub use policy::{MissingMessageObserver, MissingMessagePolicy, Placeholder};
pub use routing::{LocalePrefix, LocaleRouting, ROUTING, RouteDecision};
pub use source::CatalogSource;
pub use store::{LocaleConfig, MessageStore};
