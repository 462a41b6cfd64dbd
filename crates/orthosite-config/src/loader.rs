//! Environment-backed configuration loading.
//!
//! # Design
//! - Every variable is optional; unset or blank values fall back to defaults.
//! - Present-but-invalid values fail loudly with the variable name attached.
//! - `from_lookup` takes any key lookup so tests never touch process state.

use std::net::SocketAddr;
use std::path::PathBuf;

use orthosite_i18n::Placeholder;
use tracing::debug;

use crate::defaults::{
    DEFAULT_BASE_URL, DEFAULT_BIND_ADDR, DEFAULT_BUILD_SHA, DEFAULT_LOG_LEVEL, ENV_BASE_URL,
    ENV_BIND_ADDR, ENV_BUILD_SHA, ENV_CATALOG_DIR, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
    ENV_MISSING_MESSAGE_PLACEHOLDER,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{LogOutput, SiteConfig};

impl SiteConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = parse_bind_addr(read(ENV_BIND_ADDR).as_deref())?;
        let base_url = parse_base_url(read(ENV_BASE_URL).as_deref())?;
        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let log_format = read(ENV_LOG_FORMAT)
            .map(|raw| {
                raw.parse::<LogOutput>().map_err(|()| {
                    ConfigError::invalid(ENV_LOG_FORMAT, &raw, "expected 'json' or 'pretty'")
                })
            })
            .transpose()?;
        let catalog_dir = read(ENV_CATALOG_DIR).map(PathBuf::from);
        let placeholder = read(ENV_MISSING_MESSAGE_PLACEHOLDER)
            .map(|raw| {
                raw.parse::<Placeholder>().map_err(|_| {
                    ConfigError::invalid(
                        ENV_MISSING_MESSAGE_PLACEHOLDER,
                        &raw,
                        "expected 'segment', 'key' or 'empty'",
                    )
                })
            })
            .transpose()?
            .unwrap_or_default();
        let build_sha = read(ENV_BUILD_SHA).unwrap_or_else(|| DEFAULT_BUILD_SHA.to_string());

        let config = Self {
            bind_addr,
            base_url,
            log_level,
            log_format,
            catalog_dir,
            placeholder,
            build_sha,
        };
        debug!(
            bind_addr = %config.bind_addr,
            base_url = %config.base_url,
            catalogs = config.catalog_source().kind(),
            placeholder = config.placeholder.as_str(),
            "site configuration loaded"
        );
        Ok(config)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None).unwrap_or_else(|_| Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: None,
            catalog_dir: None,
            placeholder: Placeholder::default(),
            build_sha: DEFAULT_BUILD_SHA.to_string(),
        })
    }
}

fn parse_bind_addr(raw: Option<&str>) -> ConfigResult<SocketAddr> {
    let value = raw.unwrap_or(DEFAULT_BIND_ADDR);
    value
        .parse()
        .map_err(|_| ConfigError::invalid(ENV_BIND_ADDR, value, "expected host:port socket address"))
}

fn parse_base_url(raw: Option<&str>) -> ConfigResult<String> {
    let value = raw.unwrap_or(DEFAULT_BASE_URL);
    let Some(rest) = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    else {
        return Err(ConfigError::invalid(
            ENV_BASE_URL,
            value,
            "must start with http:// or https://",
        ));
    };
    let host = rest.trim_end_matches('/');
    if host.is_empty() || host.contains(['?', '#', ' ']) {
        return Err(ConfigError::invalid(
            ENV_BASE_URL,
            value,
            "must be an origin without query or fragment",
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
