//! Shared HTTP constants (content types, asset paths, query names).

pub(crate) const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub(crate) const CONTENT_TYPE_CSS: &str = "text/css; charset=utf-8";
pub(crate) const CONTENT_TYPE_XML: &str = "application/xml; charset=utf-8";
pub(crate) const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
pub(crate) const CONTENT_TYPE_METRICS: &str = "text/plain; version=0.0.4";

pub(crate) const STYLESHEET_PATH: &str = "/_assets/site.css";
pub(crate) const STYLESHEET: &str = include_str!("../../assets/site.css");

pub(crate) const BLOG_PAGE_QUERY: &str = "page";
