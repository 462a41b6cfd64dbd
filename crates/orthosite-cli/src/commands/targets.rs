//! `targets`: list every page the site pre-renders.

use orthosite_web::{generation_targets, published_routes};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

pub(crate) fn target_paths() -> Vec<String> {
    generation_targets(published_routes())
        .iter()
        .map(orthosite_web::GenerationTarget::path)
        .collect()
}

pub(crate) fn handle_targets(format: OutputFormat) -> CliResult<()> {
    let paths = target_paths();
    match format {
        OutputFormat::Text => {
            for path in &paths {
                println!("{path}");
            }
        }
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&paths).map_err(CliError::failure)?;
            println!("{rendered}");
        }
    }
    Ok(())
}
