//! HTML error responses for page requests.

use axum::http::{StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::http::constants::CONTENT_TYPE_HTML;
use crate::http::layout::LayoutError;
use crate::views;

/// Failure of a page request. Bodies never include internal detail.
#[derive(Debug)]
pub enum PageError {
    /// Nothing to render at this URL.
    NotFound {
        /// Localized page, when one could be produced.
        body: Option<String>,
    },
    /// Unexpected failure while handling the request.
    Internal,
}

impl PageError {
    pub(crate) const fn not_found(body: Option<String>) -> Self {
        Self::NotFound { body }
    }

    pub(crate) const fn internal() -> Self {
        Self::Internal
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LayoutError> for PageError {
    fn from(_: LayoutError) -> Self {
        Self::not_found(None)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound { body: Some(body) } => body,
            Self::NotFound { body: None } => views::static_not_found(),
            Self::Internal => views::static_internal_error(),
        };
        (status, [(CONTENT_TYPE, CONTENT_TYPE_HTML)], body).into_response()
    }
}
