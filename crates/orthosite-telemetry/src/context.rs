//! Span helpers and the per-request id visible to handler code.
//!
//! Page handlers log outside the request span's fields, so the request id
//! is also kept in task-local storage for the duration of the request.

use std::future::Future;
use std::sync::Arc;

use tracing::Span;
use tracing::span::EnteredSpan;

use crate::init::build_sha;

tokio::task_local! {
    static REQUEST_ID: Arc<str>;
}

/// Process-wide `app` span, entered until the guard drops.
pub struct AppSpanGuard {
    _entered: EnteredSpan,
}

impl AppSpanGuard {
    /// Enter the `app` span tagged with `component` and the build SHA.
    #[must_use]
    pub fn enter(component: &str) -> Self {
        let span = tracing::info_span!("app", component, build_sha = %build_sha());
        Self {
            _entered: span.entered(),
        }
    }
}

/// Record the resolved locale on the current request span.
pub fn record_locale(locale: &str) {
    Span::current().record("locale", locale);
}

/// Run `fut` with `request_id` readable through [`current_request_id`].
pub async fn with_request_id<Fut>(request_id: impl Into<Arc<str>>, fut: Fut) -> Fut::Output
where
    Fut: Future,
{
    REQUEST_ID.scope(request_id.into(), fut).await
}

/// Request id of the request being served by this task, if any.
#[must_use]
pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(ToString::to_string).ok()
}
