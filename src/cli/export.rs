//! Export command handlers.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{load_store, report_summary, resolve_format, ReportOptions};
use crate::bridge::DocumentFormat;
use crate::config::AppConfig;
use crate::pipeline::InterchangeService;

/// Run the export command for one release.
#[allow(clippy::needless_pass_by_value)]
pub fn run_export(
    store_path: &Path,
    config: AppConfig,
    release_id: &str,
    output: PathBuf,
    format: Option<DocumentFormat>,
    report: &ReportOptions,
) -> Result<i32> {
    let mut store = load_store(store_path)?;
    let format = resolve_format(format, &output, config.export.format);
    tracing::info!("Exporting release {} as {} to {}", release_id, format, output.display());

    let mut service = InterchangeService::new(&mut store, config);
    let summary = service.export_as_text(release_id, format, &output);
    report_summary(&summary, report)
}

/// Run the export command for a project and its releases.
#[allow(clippy::needless_pass_by_value)]
pub fn run_export_project(
    store_path: &Path,
    config: AppConfig,
    project_id: &str,
    output: PathBuf,
    format: Option<DocumentFormat>,
    report: &ReportOptions,
) -> Result<i32> {
    let mut store = load_store(store_path)?;
    let format = resolve_format(format, &output, config.export.format);
    tracing::info!("Exporting project {} as {} to {}", project_id, format, output.display());

    let mut service = InterchangeService::new(&mut store, config);
    let summary = service.export_project_as_text(project_id, format, &output);
    report_summary(&summary, report)
}
