use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use orthosite_config::SiteConfig;
use orthosite_content::{
    ContactReceipt, ContactSink, ContactSubmission, ContentError, ContentResult,
};
use orthosite_i18n::{
    CatalogSource, LocaleCode, LocalePrefix, LocaleRouting, MessageStore, MissingMessagePolicy,
    Placeholder, ROUTING,
};
use orthosite_telemetry::Metrics;
use orthosite_web::{SiteServer, SiteState};
use tower::ServiceExt;

const VALID_FORM: &str = "name=Ana+Lopez&email=ana%40example.com&phone=&service=orthotics\
                          &message=I+need+a+new+knee+brace+for+hiking&consent=on";

fn state_with(store: MessageStore) -> Result<SiteState> {
    Ok(SiteState::new(
        &SiteConfig::default(),
        Arc::new(store),
        Metrics::new()?,
    ))
}

fn site(state: SiteState) -> (Arc<SiteState>, Router) {
    let state = Arc::new(state);
    let router = SiteServer::new(Arc::clone(&state)).into_router();
    (state, router)
}

fn embedded_site() -> Result<(Arc<SiteState>, Router)> {
    Ok(site(state_with(MessageStore::embedded())?))
}

fn directory_store(dir: &tempfile::TempDir) -> MessageStore {
    MessageStore::new(
        CatalogSource::Directory(dir.path().to_path_buf()),
        Arc::new(MissingMessagePolicy::new(Placeholder::Empty)),
    )
}

async fn get(router: &Router, uri: &str) -> Result<Response> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    Ok(router.clone().oneshot(request).await?)
}

async fn post_form(router: &Router, uri: &str, form: &str) -> Result<Response> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))?;
    Ok(router.clone().oneshot(request).await?)
}

async fn text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn unprefixed_paths_redirect_to_the_default_locale() -> Result<()> {
    let (state, router) = embedded_site()?;

    let response = get(&router, "/about").await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/en/about"));

    let response = get(&router, "/").await?;
    assert_eq!(location(&response), Some("/en"));

    let response = get(&router, "/blog?page=2").await?;
    assert_eq!(location(&response), Some("/en/blog?page=2"));

    assert_eq!(state.metrics.snapshot(&["en", "es"]).locale_redirects_total, 3);
    Ok(())
}

#[tokio::test]
async fn prefixed_pages_render_in_their_locale() -> Result<()> {
    let (_state, router) = embedded_site()?;

    let response = get(&router, "/en/about").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await?;
    assert!(body.contains("<html lang=\"en\""));
    assert!(body.contains("About Us"));
    assert!(body.contains("hreflang=\"es\""));

    let response = get(&router, "/es").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await?.contains("<html lang=\"es\""));
    Ok(())
}

#[tokio::test]
async fn missing_translations_fall_back_to_the_default_locale() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("en.json"),
        r#"{"about":{"title":"About Us","intro":"Hello"}}"#,
    )?;
    std::fs::write(dir.path().join("es.json"), r#"{"about":{"intro":"Hola"}}"#)?;
    let (_state, router) = site(state_with(directory_store(&dir))?);

    let response = get(&router, "/es/about").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await?;
    assert!(body.contains("About Us"));
    assert!(body.contains("Hola"));
    assert!(!body.contains("Hello"));
    Ok(())
}

#[tokio::test]
async fn unsupported_locales_end_in_not_found() -> Result<()> {
    let (_state, router) = embedded_site()?;

    let response = get(&router, "/fr/about").await?;
    assert_eq!(location(&response), Some("/en/fr/about"));

    let response = get(&router, "/en/fr/about").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text(response).await?.contains("We couldn't find that page"));

    // Dotted segments bypass the middleware and reach the layout unchanged.
    let response = get(&router, "/fr.x/about").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = text(response).await?;
    assert!(body.contains("noindex"));
    assert!(body.contains("<html lang=\"en\""));
    Ok(())
}

#[tokio::test]
async fn catalog_failures_render_the_static_not_found_page() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("en.json"), "{ broken")?;
    let (state, router) = site(state_with(directory_store(&dir))?);

    let response = get(&router, "/en/about").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = text(response).await?;
    assert!(body.contains("Página no encontrada"));
    assert_eq!(state.store.loaded_count(), 0);

    let response = get(&router, "/api/health").await?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn empty_catalogs_are_not_rendered() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("en.json"), "{}")?;
    std::fs::write(dir.path().join("es.json"), "{}")?;
    let (state, router) = site(state_with(directory_store(&dir))?);

    for uri in ["/en/about", "/es/about"] {
        let response = get(&router, uri).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(text(response).await?.contains("Página no encontrada"));
    }
    assert_eq!(state.store.loaded_count(), 0);
    Ok(())
}

#[tokio::test]
async fn trailing_slashes_redirect_once_to_a_rendered_page() -> Result<()> {
    let (_state, router) = embedded_site()?;

    for (uri, target) in [
        ("/about/", "/en/about"),
        ("/en/", "/en"),
        ("/en/about/", "/en/about"),
        ("/es/contact/?service=sports", "/es/contact?service=sports"),
    ] {
        let response = get(&router, uri).await?;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
        assert_eq!(location(&response), Some(target), "{uri}");
        assert_eq!(get(&router, target).await?.status(), StatusCode::OK, "{target}");
    }
    Ok(())
}

#[tokio::test]
async fn health_and_metrics_are_not_localized() -> Result<()> {
    let (_state, router) = embedded_site()?;
    let _ = get(&router, "/en/services").await?;

    let response = get(&router, "/api/health").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&text(response).await?)?;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["default_locale"], "en");
    assert_eq!(health["locales"], serde_json::json!(["en", "es"]));
    assert_eq!(health["catalogs"], "embedded");

    let response = get(&router, "/api/metrics").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await?;
    assert!(body.contains("http_requests_total{code=\"200\",route=\"/{locale}/services\"} 1"));
    assert!(body.contains("catalogs_loaded"));
    Ok(())
}

#[tokio::test]
async fn requests_carry_a_request_id() -> Result<()> {
    let (_state, router) = embedded_site()?;
    let response = get(&router, "/en").await?;
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/en")
        .header("x-request-id", "req-42")
        .body(Body::empty())?;
    let response = router.clone().oneshot(request).await?;
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
    Ok(())
}

#[tokio::test]
async fn crawler_resources_are_served() -> Result<()> {
    let (_state, router) = embedded_site()?;

    let body = text(get(&router, "/robots.txt").await?).await?;
    assert!(body.contains("Sitemap: http://localhost:3000/sitemap.xml"));

    let body = text(get(&router, "/sitemap.xml").await?).await?;
    assert!(body.contains("<loc>http://localhost:3000/en/about</loc>"));
    assert!(body.contains("<loc>http://localhost:3000/es/blog/running-blades-explained</loc>"));

    let response = get(&router, "/_assets/site.css").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("text/css; charset=utf-8")
    );
    Ok(())
}

#[tokio::test]
async fn blog_pagination_rejects_unknown_pages() -> Result<()> {
    let (_state, router) = embedded_site()?;

    assert_eq!(get(&router, "/en/blog").await?.status(), StatusCode::OK);
    assert_eq!(get(&router, "/en/blog?page=2").await?.status(), StatusCode::OK);
    assert_eq!(
        get(&router, "/en/blog?page=9").await?.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        get(&router, "/en/blog?page=two").await?.status(),
        StatusCode::NOT_FOUND
    );

    let response = get(&router, "/es/blog/caring-for-your-brace").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await?.contains("BlogPosting"));
    assert_eq!(
        get(&router, "/es/blog/no-such-post").await?.status(),
        StatusCode::NOT_FOUND
    );
    Ok(())
}

#[tokio::test]
async fn contact_form_accepts_valid_submissions() -> Result<()> {
    let (state, router) = embedded_site()?;

    let response = get(&router, "/en/contact?service=sports").await?;
    assert!(text(response).await?.contains("value=\"sports\" selected"));

    let response = post_form(&router, "/en/contact", VALID_FORM).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await?;
    assert!(body.contains("Thank you, Ana Lopez"));
    assert!(body.contains("noindex"));
    assert_eq!(state.metrics.snapshot(&["en", "es"]).contact_accepted_total, 1);
    Ok(())
}

#[tokio::test]
async fn contact_form_reports_field_errors() -> Result<()> {
    let (state, router) = embedded_site()?;

    let response = post_form(
        &router,
        "/es/contact",
        "name=A&email=not-an-email&message=short",
    )
    .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = text(response).await?;
    assert!(body.contains("aria-invalid=\"true\""));
    assert!(body.contains("id=\"email-error\""));
    assert!(body.contains("id=\"consent-error\""));
    assert!(body.contains("value=\"not-an-email\""));
    assert_eq!(state.metrics.snapshot(&["en", "es"]).contact_rejected_total, 1);
    Ok(())
}

struct FailingSink;

#[async_trait]
impl ContactSink for FailingSink {
    async fn deliver(
        &self,
        _locale: LocaleCode,
        _submission: &ContactSubmission,
    ) -> ContentResult<ContactReceipt> {
        Err(ContentError::SinkUnavailable {
            sink: "test",
            detail: "offline".to_string(),
        })
    }
}

#[tokio::test]
async fn contact_sink_failures_are_internal_errors() -> Result<()> {
    let state = state_with(MessageStore::embedded())?.with_contact_sink(Arc::new(FailingSink));
    let (_state, router) = site(state);

    let response = post_form(&router, "/en/contact", VALID_FORM).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = text(response).await?;
    assert!(!body.contains("offline"));
    Ok(())
}

#[tokio::test]
async fn as_needed_routing_serves_the_default_locale_unprefixed() -> Result<()> {
    let routing = LocaleRouting {
        prefix: LocalePrefix::AsNeeded,
        ..ROUTING
    };
    let state = state_with(MessageStore::embedded())?.with_routing(routing);
    let (_state, router) = site(state);

    let response = get(&router, "/about").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text(response).await?;
    assert!(body.contains("About Us"));
    assert!(body.contains("href=\"/es/about\""));

    let response = get(&router, "/en/about").await?;
    assert_eq!(location(&response), Some("/about"));

    assert_eq!(get(&router, "/es/about").await?.status(), StatusCode::OK);
    Ok(())
}
