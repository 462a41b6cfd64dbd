//! Health and diagnostics endpoints.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use orthosite_i18n::DEFAULT_LOCALE;
use orthosite_telemetry::{MetricsSnapshot, build_sha};
use serde::Serialize;
use tracing::{error, warn};

use crate::http::constants::CONTENT_TYPE_METRICS;
use crate::http::errors::PageError;
use crate::state::SiteState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) build: String,
    pub(crate) locales: Vec<&'static str>,
    pub(crate) default_locale: &'static str,
    pub(crate) catalogs: &'static str,
    pub(crate) metrics: MetricsSnapshot,
}

/// Reports `ok` once the default catalog loads, `degraded` (503) otherwise.
pub(crate) async fn health(
    State(state): State<Arc<SiteState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let status = match state.store.catalog(DEFAULT_LOCALE).await {
        Ok(_) => "ok",
        Err(err) => {
            warn!(error = %err, "health check could not load the default catalog");
            "degraded"
        }
    };
    state.refresh_catalog_gauge();
    let locales: Vec<&'static str> = state.routing.locales.iter().map(|l| l.code()).collect();
    let code = if status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        code,
        Json(HealthResponse {
            status,
            build: build_sha().to_string(),
            metrics: state.metrics.snapshot(&locales),
            locales,
            default_locale: state.routing.default_locale.code(),
            catalogs: state.store.source().kind(),
        }),
    )
}

pub(crate) async fn metrics(State(state): State<Arc<SiteState>>) -> Result<Response, PageError> {
    match state.metrics.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, CONTENT_TYPE_METRICS)
            .body(Body::from(body))
            .map_err(|err| {
                error!(error = %err, "failed to build metrics response");
                PageError::internal()
            }),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            Err(PageError::internal())
        }
    }
}
