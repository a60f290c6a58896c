//! metaimage - EXIF metadata and RAW preview inspector.
//!
//! This binary inspects each file given on the command line and prints a
//! summary to stdout. Logs go to stderr.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metaimage::io::write_file;
use metaimage::{inspect_file, Config, FormatError, OutputFormat, Summary};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut failures = 0usize;
    for path in &config.paths {
        if let Err(e) = process_file(&config, path).await {
            error!("{}: {}", path.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        warn!("{} of {} file(s) failed", failures, config.paths.len());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Inspect one file, print its summary and write its preview if requested.
async fn process_file(config: &Config, path: &Path) -> Result<(), FormatError> {
    let (report, data) = inspect_file(path, config.max_size).await?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let summary = Summary::from_report(&report, &file_name);

    match config.output {
        OutputFormat::Text => println!("{summary}"),
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("{}: failed to serialise summary: {}", path.display(), e),
        },
    }

    if !report.format.is_raw() {
        return Ok(());
    }
    let Some(destination) = config.preview_path(path) else {
        return Ok(());
    };

    let preview = report
        .preview_bytes(&data)
        .ok_or(FormatError::NoPreviewFound)?;

    write_file(&destination, &preview).await?;
    info!(
        "Wrote {} byte preview to {}",
        preview.len(),
        destination.display()
    );

    Ok(())
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "metaimage=debug"
    } else {
        "metaimage=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
