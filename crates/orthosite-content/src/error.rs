//! Error types for content operations.

use thiserror::Error;

/// Result alias for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors raised while handling site content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A contact sink could not accept a submission.
    #[error("contact submission could not be delivered")]
    SinkUnavailable {
        /// Sink implementation that failed.
        sink: &'static str,
        /// Underlying failure detail, logged but never rendered.
        detail: String,
    },
}
