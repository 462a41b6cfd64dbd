//! `export`: pre-render every generation target through the router into a
//! static directory tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use orthosite_config::SiteConfig;
use orthosite_i18n::{MessageStore, MissingMessagePolicy};
use orthosite_telemetry::Metrics;
use orthosite_web::{GenerationTarget, SiteServer, SiteState, generation_targets, published_routes};
use tower::ServiceExt;
use tracing::debug;

use crate::cli::ExportArgs;
use crate::error::{CliError, CliResult};

const PAGE_FILE: &str = "index.html";

/// Site-wide resources exported next to the pages.
const RESOURCES: [(&str, &str); 3] = [
    ("/sitemap.xml", "sitemap.xml"),
    ("/robots.txt", "robots.txt"),
    ("/_assets/site.css", "_assets/site.css"),
];

/// Output file for a target: `<out>/<locale>/<route>/index.html`.
pub(crate) fn page_file(out: &Path, target: &GenerationTarget) -> PathBuf {
    let mut file = out.join(target.locale.code());
    for segment in target.route.split('/').filter(|s| !s.is_empty()) {
        file.push(segment);
    }
    file.push(PAGE_FILE);
    file
}

async fn fetch(router: &Router, path: &str) -> anyhow::Result<Vec<u8>> {
    let request = Request::builder().uri(path).body(Body::empty())?;
    let response = router.clone().oneshot(request).await?;
    if response.status() != StatusCode::OK {
        return Err(anyhow!("'{path}' rendered with status {}", response.status()));
    }
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .with_context(|| format!("failed to read body of '{path}'"))?;
    Ok(body.to_vec())
}

async fn write_file(file: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = file.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    tokio::fs::write(file, contents)
        .await
        .with_context(|| format!("failed to write '{}'", file.display()))
}

/// Render the whole site into `out`. Returns the number of pages written.
pub(crate) async fn export_site(config: &SiteConfig, out: &Path) -> anyhow::Result<usize> {
    let policy = Arc::new(MissingMessagePolicy::new(config.placeholder));
    let store = Arc::new(MessageStore::new(config.catalog_source(), policy));
    let state = SiteState::new(config, store, Metrics::new()?);
    let router = SiteServer::new(Arc::new(state)).into_router();

    let targets = generation_targets(published_routes());
    for target in &targets {
        let path = target.path();
        let body = fetch(&router, &path).await?;
        let file = page_file(out, target);
        write_file(&file, &body).await?;
        debug!(path = %path, file = %file.display(), "exported page");
    }
    for (path, name) in RESOURCES {
        let body = fetch(&router, path).await?;
        write_file(&out.join(name), &body).await?;
    }
    Ok(targets.len())
}

pub(crate) async fn handle_export(args: ExportArgs) -> CliResult<()> {
    let mut config =
        SiteConfig::from_env().map_err(|err| CliError::validation(err.to_string()))?;
    if let Some(base_url) = args.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::validation(format!(
                "base url '{base_url}' must start with http:// or https://"
            )));
        }
        config.base_url = base_url.trim_end_matches('/').to_string();
    }

    let pages = export_site(&config, &args.out)
        .await
        .map_err(CliError::failure)?;
    println!(
        "exported {pages} pages to {} (sitemap: {})",
        args.out.display(),
        config.absolute_url("/sitemap.xml")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthosite_i18n::LocaleCode;

    #[test]
    fn page_files_mirror_the_url_structure() {
        let out = Path::new("dist");
        let home = GenerationTarget {
            locale: LocaleCode::Es,
            route: "/".to_string(),
        };
        assert_eq!(page_file(out, &home), Path::new("dist/es/index.html"));
        let post = GenerationTarget {
            locale: LocaleCode::En,
            route: "/blog/running-blades-explained".to_string(),
        };
        assert_eq!(
            page_file(out, &post),
            Path::new("dist/en/blog/running-blades-explained/index.html")
        );
    }

    #[tokio::test]
    async fn export_writes_every_target_and_resource() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = SiteConfig {
            base_url: "https://cascade-po.example".to_string(),
            ..SiteConfig::default()
        };
        let pages = export_site(&config, dir.path()).await?;
        assert_eq!(pages, 2 * published_routes().len());

        let about = std::fs::read_to_string(dir.path().join("es/about/index.html"))?;
        assert!(about.contains("<html lang=\"es\""));
        assert!(about.contains("https://cascade-po.example/es/about"));
        assert!(dir.path().join("en/index.html").is_file());
        assert!(dir.path().join("en/blog/caring-for-your-brace/index.html").is_file());

        let sitemap = std::fs::read_to_string(dir.path().join("sitemap.xml"))?;
        assert!(sitemap.contains("<loc>https://cascade-po.example/en/contact</loc>"));
        assert!(dir.path().join("_assets/site.css").is_file());
        Ok(())
    }
}
