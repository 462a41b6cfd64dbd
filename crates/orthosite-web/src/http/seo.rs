//! Crawler-facing resources: `robots.txt`, `sitemap.xml` and the stylesheet.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use orthosite_content::sitemap_xml;

use crate::http::constants::{CONTENT_TYPE_CSS, CONTENT_TYPE_TEXT, CONTENT_TYPE_XML, STYLESHEET};
use crate::http::layout::{generation_targets, published_routes};
use crate::state::SiteState;

pub(crate) async fn robots(State(state): State<Arc<SiteState>>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}\n",
        state.absolute("/sitemap.xml")
    );
    ([(CONTENT_TYPE, CONTENT_TYPE_TEXT)], body)
}

pub(crate) async fn sitemap(State(state): State<Arc<SiteState>>) -> impl IntoResponse {
    let targets = generation_targets(published_routes());
    let body = sitemap_xml(
        &state.base_url,
        targets
            .iter()
            .map(|target| (target.locale, target.route.as_str())),
    );
    ([(CONTENT_TYPE, CONTENT_TYPE_XML)], body)
}

pub(crate) async fn stylesheet() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, CONTENT_TYPE_CSS),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}
