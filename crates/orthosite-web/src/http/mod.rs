//! Router building blocks: middleware, extractors and handlers.

pub(crate) mod constants;
pub mod errors;
pub(crate) mod health;
pub mod layout;
pub(crate) mod locale;
pub(crate) mod pages;
pub(crate) mod seo;
pub(crate) mod telemetry;
