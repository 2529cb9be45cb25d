//! Verify command handler.

use std::path::Path;

use anyhow::{Context, Result};

use super::{write_output, OutputFormat, OutputTarget, ReportOptions};
use crate::bridge::{DocumentFormat, FormatBridge};
use crate::config::AppConfig;
use crate::pipeline::exit_codes;

/// Read a document and print the warnings of its verification.
///
/// Exits with [`exit_codes::REQUEST_FAILED`] when there are warnings.
pub fn run_verify(
    config: &AppConfig,
    input: &Path,
    format: Option<DocumentFormat>,
    report: &ReportOptions,
) -> Result<i32> {
    let content =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let format = format
        .or_else(|| DocumentFormat::detect(&content))
        .or_else(|| DocumentFormat::from_file_name(input))
        .with_context(|| format!("cannot determine the format of {}", input.display()))?;

    let doc = FormatBridge::new(None, &config.export)
        .read_document(&content, format)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let warnings = doc.verify();

    let rendered = match report.format {
        OutputFormat::Json => serde_json::to_string_pretty(&warnings)?,
        OutputFormat::Text if warnings.is_empty() => {
            format!("{}: no verification warnings", doc.creation.name)
        }
        OutputFormat::Text => {
            let mut out = format!("{}: {} warning(s)", doc.creation.name, warnings.len());
            for warning in &warnings {
                out.push_str("\n  - ");
                out.push_str(warning);
            }
            out
        }
    };
    write_output(
        &rendered,
        &OutputTarget::from_option(report.file.clone()),
        report.quiet,
    )?;

    Ok(if warnings.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::REQUEST_FAILED
    })
}
