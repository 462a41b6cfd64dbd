//! Typed site configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use orthosite_i18n::{CatalogSource, Placeholder};
use serde::Serialize;

/// Log output format requested by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Structured JSON lines.
    Json,
    /// Human-readable text.
    Pretty,
}

impl LogOutput {
    /// Config spelling of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

impl FromStr for LogOutput {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            _ => Err(()),
        }
    }
}

/// Fully validated configuration for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Public origin without a trailing slash, used for canonical URLs.
    pub base_url: String,
    /// Default tracing filter when `RUST_LOG` is absent.
    pub log_level: String,
    /// Explicit log format; `None` lets the binary pick per build profile.
    pub log_format: Option<LogOutput>,
    /// Directory holding `<locale>.json` catalogs; embedded catalogs when `None`.
    pub catalog_dir: Option<PathBuf>,
    /// Text substituted for missing translations.
    pub placeholder: Placeholder,
    /// Build identifier surfaced in logs and health output.
    pub build_sha: String,
}

impl SiteConfig {
    /// Catalog source selected by this configuration.
    #[must_use]
    pub fn catalog_source(&self) -> CatalogSource {
        self.catalog_dir
            .clone()
            .map_or(CatalogSource::Embedded, CatalogSource::Directory)
    }

    /// Absolute URL for a site-relative path.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_output_accepts_known_spellings() {
        assert_eq!("JSON".parse::<LogOutput>(), Ok(LogOutput::Json));
        assert_eq!(" pretty ".parse::<LogOutput>(), Ok(LogOutput::Pretty));
        assert_eq!("text".parse::<LogOutput>(), Ok(LogOutput::Pretty));
        assert!("xml".parse::<LogOutput>().is_err());
        assert_eq!(LogOutput::Json.as_str(), "json");
    }
}
