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

//! Hard-coded site content and the builders that turn it into SEO artefacts.
//!
//! Display strings never live here: every item carries catalog keys that the
//! web layer resolves through `orthosite_i18n::Messages`.

pub mod blog;
pub mod contact;
pub mod error;
pub mod organization;
pub mod seo;
pub mod services;
pub mod sitemap;

pub use blog::{Category, POSTS_PER_PAGE, Page, Post, find_post, paginate, posts};
pub use contact::{
    ContactField, ContactReceipt, ContactSink, ContactSubmission, ErrorCode, FieldError,
    LogContactSink,
};
pub use error::{ContentError, ContentResult};
pub use organization::{Address, OpeningHours, Organization, SocialLink, organization};
pub use seo::{
    Alternate, PageMetadata, X_DEFAULT, alternates, blog_posting_schema, breadcrumb_schema,
    medical_business_schema, organization_schema, page_metadata, script_json,
};
pub use services::{Service, find_service, services};
pub use sitemap::sitemap_xml;
