mod platform;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docmeta_logging::{docmeta_info, docmeta_warn};
use log::LevelFilter;

use platform::app::{run_upload, UploadOptions, UploadOutcome};
use platform::charts::{load_series, run_charts, ChartFormat};
use platform::config::{load_config, AppConfig, LogTarget, ProgressMode, DEFAULT_CONFIG_FILENAME};

#[derive(Debug, Parser)]
#[command(name = "docmeta", version, about = "Upload documents for metadata extraction")]
struct Cli {
    /// Configuration file (RON).
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    /// Where log output goes; overrides the config file.
    #[arg(long, global = true, value_enum)]
    log: Option<LogTarget>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a document and show the extracted metadata.
    Upload {
        /// One file selects it; several behave like a drop and only the first is used.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Analysis server base URL.
        #[arg(long)]
        server: Option<String>,

        /// How the progress indicator advances while the request is in flight.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,

        /// Save the metadata as JSON after a successful upload.
        #[arg(long)]
        export: bool,

        /// Directory for exported metadata files.
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Draw the aggregate analytics charts.
    Charts {
        /// JSON file with the aggregate series; built-in sample data otherwise.
        #[arg(long)]
        series: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ChartFormat::Text)]
        format: ChartFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (mut config, config_warning) = match load_config(&cli.config) {
        Ok(found) => (found.unwrap_or_default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    if let Some(target) = cli.log {
        config.log_destination = target;
    }

    docmeta_logging::initialize(
        config.log_destination.into(),
        LevelFilter::Info,
        &config.log_file,
    );
    if let Some(err) = config_warning {
        docmeta_warn!("{}; using defaults", err);
        eprintln!("warning: {err}; using defaults");
    }

    match run(cli.command, config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, mut config: AppConfig) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    match command {
        Command::Upload {
            files,
            server,
            progress,
            export,
            export_dir,
        } => {
            if let Some(server) = server {
                config.server_url = server;
            }
            if let Some(mode) = progress {
                config.progress_mode = mode;
            }
            let options = UploadOptions {
                export,
                export_dir: export_dir.unwrap_or_else(|| config.export_dir.clone()),
            };
            docmeta_info!("Upload requested for {} file(s) via {}", files.len(), config.server_url);
            let outcome = run_upload(&config, &files, options, &mut stdout)?;
            Ok(match outcome {
                UploadOutcome::Succeeded => ExitCode::SUCCESS,
                UploadOutcome::Failed | UploadOutcome::Rejected => ExitCode::FAILURE,
            })
        }
        Command::Charts { series, format } => {
            let series = load_series(series.as_deref())?;
            run_charts(&series, format, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
