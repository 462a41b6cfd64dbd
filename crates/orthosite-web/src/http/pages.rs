//! Page handlers. Each receives the `RenderContext` built by the layout.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use orthosite_content::{
    ContactSubmission, POSTS_PER_PAGE, find_post, find_service, paginate,
};
use orthosite_i18n::LocaleCode;
use orthosite_telemetry::{CONTACT_ACCEPTED, CONTACT_FAILED, CONTACT_REJECTED, current_request_id};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::http::constants::CONTENT_TYPE_HTML;
use crate::http::errors::PageError;
use crate::http::layout::RenderContext;
use crate::state::SiteState;
use crate::views::{self, Document};

fn html(status: StatusCode, ctx: &RenderContext, doc: &Document) -> Response {
    (
        status,
        [(CONTENT_TYPE, CONTENT_TYPE_HTML)],
        views::render_document(ctx, doc),
    )
        .into_response()
}

fn ok(ctx: &RenderContext, doc: &Document) -> Response {
    html(StatusCode::OK, ctx, doc)
}

/// Not-found error carrying the page rendered for an already resolved locale.
fn localized_not_found(ctx: &RenderContext, state: &SiteState) -> PageError {
    PageError::not_found(Some(views::render_document(
        ctx,
        &views::not_found(ctx, &state.base_url),
    )))
}

/// Not-found error for `locale`, falling back to the static page when the
/// catalog cannot be loaded.
pub(crate) async fn not_found_for(state: &SiteState, locale: LocaleCode) -> PageError {
    match state.store.load(locale).await {
        Ok(config) => {
            let ctx = RenderContext {
                locale: config.locale,
                messages: config.messages,
                routing: state.routing,
            };
            localized_not_found(&ctx, state)
        }
        Err(err) => {
            debug!(locale = locale.code(), error = %err, "serving static not-found page");
            PageError::not_found(None)
        }
    }
}

pub(crate) async fn home(State(state): State<Arc<SiteState>>, ctx: RenderContext) -> Response {
    ok(&ctx, &views::home(&ctx, &state.base_url))
}

pub(crate) async fn about(State(state): State<Arc<SiteState>>, ctx: RenderContext) -> Response {
    ok(&ctx, &views::about(&ctx, &state.base_url))
}

pub(crate) async fn services(State(state): State<Arc<SiteState>>, ctx: RenderContext) -> Response {
    ok(&ctx, &views::services(&ctx, &state.base_url))
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlogQuery {
    page: Option<String>,
}

pub(crate) async fn blog_index(
    State(state): State<Arc<SiteState>>,
    ctx: RenderContext,
    Query(query): Query<BlogQuery>,
) -> Result<Response, PageError> {
    let number = match query.page.as_deref().map(str::trim) {
        None | Some("") => 1,
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| localized_not_found(&ctx, &state))?,
    };
    let page = paginate(number, POSTS_PER_PAGE).ok_or_else(|| localized_not_found(&ctx, &state))?;
    Ok(ok(&ctx, &views::blog_index(&ctx, &state.base_url, &page)))
}

pub(crate) async fn blog_post(
    State(state): State<Arc<SiteState>>,
    ctx: RenderContext,
    Path((_, slug)): Path<(String, String)>,
) -> Result<Response, PageError> {
    let post = find_post(&slug).ok_or_else(|| localized_not_found(&ctx, &state))?;
    Ok(ok(&ctx, &views::blog_post(&ctx, &state.base_url, post)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactQuery {
    service: Option<String>,
}

pub(crate) async fn contact_form(
    State(state): State<Arc<SiteState>>,
    ctx: RenderContext,
    Query(query): Query<ContactQuery>,
) -> Response {
    let form = ContactSubmission {
        service: query
            .service
            .as_deref()
            .and_then(find_service)
            .map(|service| service.slug.to_string())
            .unwrap_or_default(),
        ..ContactSubmission::default()
    };
    ok(&ctx, &views::contact(&ctx, &state.base_url, &form, &[]))
}

pub(crate) async fn contact_submit(
    State(state): State<Arc<SiteState>>,
    ctx: RenderContext,
    Form(raw): Form<ContactSubmission>,
) -> Result<Response, PageError> {
    let submission = raw.normalized();
    let errors = submission.validate();
    if !errors.is_empty() {
        state.metrics.inc_contact_submission(CONTACT_REJECTED);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        debug!(locale = ctx.locale.code(), ?fields, "contact submission rejected");
        let doc = views::contact(&ctx, &state.base_url, &submission, &errors);
        return Ok(html(StatusCode::UNPROCESSABLE_ENTITY, &ctx, &doc));
    }

    match state.contact_sink.deliver(ctx.locale, &submission).await {
        Ok(receipt) => {
            state.metrics.inc_contact_submission(CONTACT_ACCEPTED);
            let reference = receipt.reference();
            info!(
                locale = ctx.locale.code(),
                reference = %reference,
                request_id = current_request_id().unwrap_or_default(),
                "contact submission accepted"
            );
            let doc = views::contact_success(&ctx, &state.base_url, &submission.name, &reference);
            Ok(ok(&ctx, &doc))
        }
        Err(err) => {
            state.metrics.inc_contact_submission(CONTACT_FAILED);
            error!(
                error = %err,
                locale = ctx.locale.code(),
                request_id = current_request_id().unwrap_or_default(),
                "contact submission could not be delivered"
            );
            Err(PageError::internal())
        }
    }
}

/// Fallback for unrouted paths. Uses the first segment as the locale when it
/// is supported, otherwise the default.
pub(crate) async fn fallback(State(state): State<Arc<SiteState>>, uri: Uri) -> PageError {
    let locale = state
        .routing
        .split_locale(uri.path())
        .map_or(state.routing.default_locale, |(locale, _)| locale);
    not_found_for(&state, locale).await
}
