//! CLI command handlers.
//!
//! Handlers are invoked by main.rs and return the process exit code. The
//! record store is a JSON snapshot on disk; imports write it back.

mod export;
mod import;
mod output;
mod verify;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use export::{run_export, run_export_project};
pub use import::{run_import, run_prepare, ImportTarget};
pub use output::{render_preparation, render_summary, write_output, OutputFormat, OutputTarget};
pub use verify::run_verify;

use crate::bridge::DocumentFormat;
use crate::pipeline::{exit_codes, RequestSummary};
use crate::store::InMemoryStore;

/// Where and how a handler reports its result.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
    pub quiet: bool,
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    InMemoryStore::load(path).with_context(|| format!("failed to load store {}", path.display()))
}

/// Explicit format first, then the file name, then the fallback.
fn resolve_format(
    explicit: Option<DocumentFormat>,
    path: &Path,
    fallback: DocumentFormat,
) -> DocumentFormat {
    explicit
        .or_else(|| DocumentFormat::from_file_name(path))
        .unwrap_or(fallback)
}

fn report_summary(summary: &RequestSummary, report: &ReportOptions) -> Result<i32> {
    let rendered = render_summary(summary, report.format)?;
    write_output(
        &rendered,
        &OutputTarget::from_option(report.file.clone()),
        report.quiet,
    )?;
    Ok(if summary.is_success() {
        exit_codes::SUCCESS
    } else {
        exit_codes::REQUEST_FAILED
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_order() {
        let path = Path::new("out/zlib.spdx.json");
        assert_eq!(
            resolve_format(Some(DocumentFormat::Rdf), path, DocumentFormat::TagValue),
            DocumentFormat::Rdf
        );
        assert_eq!(
            resolve_format(None, path, DocumentFormat::TagValue),
            DocumentFormat::Json
        );
        assert_eq!(
            resolve_format(None, Path::new("out/zlib"), DocumentFormat::Yaml),
            DocumentFormat::Yaml
        );
    }
}
