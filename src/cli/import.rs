//! Import command handlers.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use super::{load_store, render_preparation, report_summary, write_output, OutputTarget, ReportOptions};
use crate::bridge::DocumentFormat;
use crate::config::AppConfig;
use crate::import::ImportOptions;
use crate::pipeline::{exit_codes, InterchangeService, RequestStatus};
use crate::store::InMemoryStore;

/// What the described package is imported as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ImportTarget {
    #[default]
    Release,
    Project,
}

fn open(input: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    Ok(BufReader::new(file))
}

/// Run the import command.
///
/// A missing store file starts an empty store. The store is written back
/// only when the import succeeds.
pub fn run_import(
    store_path: &Path,
    config: AppConfig,
    input: &Path,
    target: ImportTarget,
    options: &ImportOptions,
    report: &ReportOptions,
) -> Result<i32> {
    let mut store = if store_path.exists() {
        load_store(store_path)?
    } else {
        tracing::info!("Starting a new store at {}", store_path.display());
        InMemoryStore::new()
    };
    let reader = open(input)?;

    let summary = {
        let mut service = InterchangeService::new(&mut store, config);
        match target {
            ImportTarget::Release => service.import_as_release(reader, options),
            ImportTarget::Project => service.import_as_project(reader, options),
        }
    };

    if summary.is_success() {
        store
            .save(store_path)
            .with_context(|| format!("failed to save store {}", store_path.display()))?;
    }
    report_summary(&summary, report)
}

/// Run the prepare command: what an import of `input` would create.
pub fn run_prepare(
    config: AppConfig,
    input: &Path,
    format: Option<DocumentFormat>,
    report: &ReportOptions,
) -> Result<i32> {
    let mut store = InMemoryStore::new();
    let service = InterchangeService::new(&mut store, config);
    let preparation = service.prepare_import(open(input)?, format);

    let rendered = render_preparation(&preparation, report.format)?;
    write_output(
        &rendered,
        &OutputTarget::from_option(report.file.clone()),
        report.quiet,
    )?;
    Ok(if preparation.status == RequestStatus::Success {
        exit_codes::SUCCESS
    } else {
        exit_codes::REQUEST_FAILED
    })
}
