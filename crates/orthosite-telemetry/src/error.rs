//! Error types for telemetry operations.

use prometheus::Error as PrometheusError;
use thiserror::Error;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised while installing logging or operating the metrics registry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
    /// A collector's options or labels were rejected.
    #[error("failed to build metric `{name}`")]
    MetricsCollector {
        /// Metric name.
        name: &'static str,
        /// Underlying Prometheus error.
        #[source]
        source: PrometheusError,
    },
    /// A collector clashed with one already registered.
    #[error("failed to register metric `{name}`")]
    MetricsRegister {
        /// Metric name.
        name: &'static str,
        /// Underlying Prometheus error.
        #[source]
        source: PrometheusError,
    },
    /// The text exposition encoder failed.
    #[error("failed to encode metrics")]
    MetricsEncode {
        /// Underlying Prometheus error.
        #[source]
        source: PrometheusError,
    },
    /// Encoded metrics were not valid UTF-8.
    #[error("metrics output was not valid utf-8")]
    MetricsUtf8 {
        /// Underlying conversion error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn metric_errors_name_the_metric() {
        let err = TelemetryError::MetricsRegister {
            name: "catalogs_loaded",
            source: PrometheusError::AlreadyReg,
        };
        assert_eq!(err.to_string(), "failed to register metric `catalogs_loaded`");
        assert!(err.source().is_some());

        let err = TelemetryError::MetricsCollector {
            name: "http_requests_total",
            source: PrometheusError::Msg("bad label".to_string()),
        };
        assert_eq!(err.to_string(), "failed to build metric `http_requests_total`");
    }

    #[test]
    fn utf8_errors_keep_their_source() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let source = match String::from_utf8(vec![0, 159]) {
            Ok(_) => return Err("expected invalid utf-8".into()),
            Err(err) => err,
        };
        let err = TelemetryError::MetricsUtf8 { source };
        assert_eq!(err.to_string(), "metrics output was not valid utf-8");
        assert!(err.source().is_some());
        Ok(())
    }
}
