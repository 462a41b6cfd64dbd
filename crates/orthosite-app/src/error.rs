//! Errors surfaced by the site binary.
//!
//! Each variant names the boot step that failed and keeps the crate error as
//! its source for `main` to report.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration failed during {operation}")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: orthosite_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry failed during {operation}")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: orthosite_telemetry::TelemetryError,
    },
    /// Site server operations failed.
    #[error("site server failed during {operation}")]
    Server {
        /// Operation identifier.
        operation: &'static str,
        /// Source server error.
        source: orthosite_web::WebServerError,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: orthosite_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: orthosite_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn server(
        operation: &'static str,
        source: orthosite_web::WebServerError,
    ) -> Self {
        Self::Server { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn errors_name_the_failed_step() -> Result<(), Box<dyn Error>> {
        let config = AppError::config(
            "site_config.from_env",
            orthosite_config::ConfigError::InvalidField {
                field: "bind_addr",
                value: "nowhere".to_string(),
                reason: "expected host:port",
            },
        );
        assert!(matches!(config, AppError::Config { .. }));
        assert_eq!(config.to_string(), "configuration failed during site_config.from_env");
        assert!(config.source().is_some());

        let server = AppError::server(
            "serve",
            orthosite_web::WebServerError::Serve {
                source: io::Error::other("io"),
            },
        );
        assert!(matches!(server, AppError::Server { .. }));
        assert_eq!(server.to_string(), "site server failed during serve");

        let Err(utf8_error) = String::from_utf8(vec![0, 159]) else {
            return Err(io::Error::other("expected utf8 error").into());
        };
        let telemetry = AppError::telemetry(
            "telemetry.metrics",
            orthosite_telemetry::TelemetryError::MetricsUtf8 { source: utf8_error },
        );
        assert_eq!(telemetry.to_string(), "telemetry failed during telemetry.metrics");
        Ok(())
    }
}
