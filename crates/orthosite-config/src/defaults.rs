//! Fallback values and environment variable names.

/// Environment variable holding the socket address to bind.
pub const ENV_BIND_ADDR: &str = "ORTHOSITE_BIND_ADDR";
/// Environment variable holding the public origin used for canonical links.
pub const ENV_BASE_URL: &str = "ORTHOSITE_BASE_URL";
/// Environment variable holding the default log level.
pub const ENV_LOG_LEVEL: &str = "ORTHOSITE_LOG_LEVEL";
/// Environment variable selecting `json` or `pretty` log output.
pub const ENV_LOG_FORMAT: &str = "ORTHOSITE_LOG_FORMAT";
/// Environment variable pointing at a directory of `<locale>.json` catalogs.
pub const ENV_CATALOG_DIR: &str = "ORTHOSITE_CATALOG_DIR";
/// Environment variable selecting the missing message placeholder.
pub const ENV_MISSING_MESSAGE_PLACEHOLDER: &str = "ORTHOSITE_MISSING_MESSAGE_PLACEHOLDER";
/// Environment variable carrying the build identifier.
pub const ENV_BUILD_SHA: &str = "ORTHOSITE_BUILD_SHA";

/// Address used when no bind address is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Log level used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Build identifier reported when none is configured.
pub const DEFAULT_BUILD_SHA: &str = "dev";
