//! Rendering of request summaries.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::pipeline::{ImportPreparation, RequestSummary, WARNING_SEPARATOR};

/// How a summary is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// The summary as JSON
    Json,
}

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Summary written to {}", path.display());
            }
            Ok(())
        }
    }
}

pub fn render_summary(summary: &RequestSummary, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(summary).context("failed to serialize summary");
    }

    let mut out = String::new();
    let _ = writeln!(out, "Status:            {:?}", summary.status);
    let _ = writeln!(out, "Total elements:    {}", summary.total_elements);
    let _ = write!(out, "Affected elements: {}", summary.affected_elements);
    let messages: Vec<&str> = summary
        .message
        .split(WARNING_SEPARATOR)
        .filter(|m| !m.is_empty())
        .collect();
    match messages.as_slice() {
        [] => {}
        [single] => {
            let _ = write!(out, "\nMessage:           {single}");
        }
        many => {
            out.push_str("\nWarnings:");
            for message in many {
                let _ = write!(out, "\n  - {message}");
            }
        }
    }
    Ok(out)
}

pub fn render_preparation(preparation: &ImportPreparation, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(preparation)
            .context("failed to serialize import preparation");
    }

    let mut out = String::new();
    let _ = writeln!(out, "Status:   {:?}", preparation.status);
    if !preparation.message.is_empty() {
        let _ = write!(out, "Message:  {}", preparation.message);
        return Ok(out);
    }
    let _ = writeln!(out, "Name:     {}", preparation.name);
    let _ = write!(out, "Version:  {}", preparation.version);
    if !preparation.package_names.is_empty() {
        out.push_str("\nPackages:");
        for name in &preparation.package_names {
            let _ = write!(out, "\n  - {name}");
        }
    }
    Ok(out)
}
