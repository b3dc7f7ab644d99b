//! testset-importer - Parquet benchmark → Redis test set
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use testset_importer::config::{CliArgs, ImportConfig};
use testset_importer::error::ImportError;
use testset_importer::importer::{ImportEvent, Importer};
use testset_importer::progress::{event_line, print_header, print_summary, ProgressReporter};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<ImportError>()
                .map(ImportError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = ImportConfig::from_args(args)
        .map_err(ImportError::from)
        .context("Invalid configuration")?;

    let target = if config.dry_run {
        "(dry run)".to_string()
    } else {
        config.store.url()
    };

    if config.show_progress {
        print_header(
            &config.source.path.display().to_string(),
            &target,
            &config.test_set.id,
        );
    }

    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    let on_event = |event: ImportEvent| match &progress {
        Some(p) => p.event(&event),
        None => debug!("{}", console::strip_ansi_codes(&event_line(&event))),
    };

    let importer = Importer::new(config.clone());
    let result = if config.dry_run {
        importer.dry_run(on_event)
    } else {
        importer.run_redis(on_event)
    };

    if let Some(ref p) = progress {
        p.finish_and_clear();
    }

    let summary = result.context("Import failed")?;

    if config.show_progress {
        print_summary(&summary);
    } else {
        println!(
            "Imported {} tests into set '{}'.",
            summary.imported, summary.test_set_id
        );
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("testset_importer=debug,warn")
    } else {
        EnvFilter::new("testset_importer=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
