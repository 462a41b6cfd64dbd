//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use orthosite_telemetry::{LogFormat, LogTarget, LoggingConfig, build_sha, init_logging};

use crate::commands::export::handle_export;
use crate::commands::targets::handle_targets;
use crate::commands::translations::handle_check_translations;
use crate::error::CliResult;

/// Diagnostics go to stderr; command output owns stdout.
const CLI_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: CLI_LOG_LEVEL,
        format: LogFormat::Pretty,
        target: LogTarget::Stderr,
        build_sha: build_sha(),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }
    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::CheckTranslations(args) => handle_check_translations(args, cli.output).await,
        Command::Targets => handle_targets(cli.output),
        Command::Export(args) => handle_export(args).await,
    }
}

#[derive(Parser)]
#[command(name = "orthosite-cli", about = "Tooling for the Orthosite marketing site")]
pub(crate) struct Cli {
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Select output format for commands that print reports"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Compare every catalog with the default-locale catalog.
    CheckTranslations(CheckTranslationsArgs),
    /// List every static-generation target.
    Targets,
    /// Pre-render every target to static files.
    Export(ExportArgs),
}

#[derive(Args)]
pub(crate) struct CheckTranslationsArgs {
    #[arg(
        long,
        env = "ORTHOSITE_CATALOG_DIR",
        help = "Directory of <locale>.json catalogs (embedded catalogs when omitted)"
    )]
    pub(crate) dir: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct ExportArgs {
    #[arg(long, help = "Output directory")]
    pub(crate) out: PathBuf,
    #[arg(long, help = "Public origin used for canonical links and the sitemap")]
    pub(crate) base_url: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}
