//! # Design
//!
//! - Provide a single crate-level error type for server bind and serve failures.
//! - Keep error messages constant; capture operational context in structured fields.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::net::SocketAddr;

/// Result alias for site server operations.
pub type WebServerResult<T> = std::result::Result<T, WebServerError>;

/// Errors raised while binding or serving the site.
#[derive(Debug)]
pub enum WebServerError {
    /// Binding the listener failed.
    Bind {
        /// Address attempted.
        addr: SocketAddr,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Serving requests failed.
    Serve {
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl Display for WebServerError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { .. } => formatter.write_str("failed to bind site listener"),
            Self::Serve { .. } => formatter.write_str("site server terminated unexpectedly"),
        }
    }
}

impl Error for WebServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bind { source, .. } | Self::Serve { source } => Some(source),
        }
    }
}
