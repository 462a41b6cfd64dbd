//! Service wiring for the site binary.

use std::future::Future;
use std::sync::Arc;

use orthosite_config::{LogOutput, SiteConfig};
use orthosite_i18n::{LocaleCode, MessageStore, MissingMessagePolicy, ROUTING};
use orthosite_telemetry::{AppSpanGuard, LogFormat, LogTarget, LoggingConfig, Metrics};
use orthosite_web::{SiteServer, SiteState};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the site.
pub(crate) struct BootstrapDependencies {
    config: SiteConfig,
    metrics: Metrics,
    store: Arc<MessageStore>,
}

impl BootstrapDependencies {
    /// Build the metrics registry and the catalog store described by `config`.
    ///
    /// Missing translations are counted per locale through the store's policy.
    pub(crate) fn from_config(config: SiteConfig) -> AppResult<Self> {
        let metrics = Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        let observed = metrics.clone();
        let policy = MissingMessagePolicy::new(config.placeholder).with_observer(Arc::new(
            move |locale: LocaleCode, _key: &str| observed.inc_missing_message(locale.code()),
        ));
        let store = Arc::new(MessageStore::new(config.catalog_source(), Arc::new(policy)));
        Ok(Self {
            config,
            metrics,
            store,
        })
    }
}

/// Logging settings derived from the site configuration.
pub(crate) fn logging_config(config: &SiteConfig) -> LoggingConfig<'_> {
    let format = match config.log_format {
        Some(LogOutput::Json) => LogFormat::Json,
        Some(LogOutput::Pretty) => LogFormat::Pretty,
        None => LogFormat::infer(),
    };
    LoggingConfig {
        level: &config.log_level,
        format,
        target: LogTarget::Stdout,
        build_sha: &config.build_sha,
    }
}

/// Entry point for the site boot sequence.
///
/// # Errors
///
/// Returns an error if configuration, telemetry or the listener fails.
pub async fn run_app() -> AppResult<()> {
    let config =
        SiteConfig::from_env().map_err(|err| AppError::config("site_config.from_env", err))?;
    orthosite_telemetry::init_logging(&logging_config(&config))
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _app_span = AppSpanGuard::enter("bootstrap");
    info!(
        catalogs = config.catalog_source().kind(),
        placeholder = config.placeholder.as_str(),
        "Orthosite bootstrap starting"
    );

    let dependencies = BootstrapDependencies::from_config(config)?;
    run_app_with(dependencies, shutdown_signal()).await
}

/// Boot sequence that relies entirely on injected dependencies to simplify testing.
pub(crate) async fn run_app_with<F>(dependencies: BootstrapDependencies, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let BootstrapDependencies {
        config,
        metrics,
        store,
    } = dependencies;

    // Startup does not fail on a bad catalog; the store retries per request.
    for locale in ROUTING.locales {
        if let Err(err) = store.catalog(*locale).await {
            warn!(locale = locale.code(), error = %err, "catalog warm-up failed");
        }
    }
    metrics.set_catalogs_loaded(i64::try_from(store.loaded_count()).unwrap_or(i64::MAX));

    let state = Arc::new(SiteState::new(&config, store, metrics));
    let server = SiteServer::new(state);

    info!(addr = %config.bind_addr, base_url = %config.base_url, "Launching site listener");
    server
        .serve(config.bind_addr, shutdown)
        .await
        .map_err(|err| AppError::server("site_server.serve", err))?;
    info!("Site server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
