//! Configuration types for export and import operations.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_DATA_LICENSE, DEFAULT_MAX_IMPORT_DEPTH, DEFAULT_NAMESPACE_BASE, DEFAULT_SPEC_VERSION,
};
use crate::bridge::DocumentFormat;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Export configuration (format, intermediates, verification)
    pub export: ExportConfig,
    /// Import configuration (persistence, recursion limit)
    pub import: ImportConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the default export format.
    pub const fn export_format(mut self, format: DocumentFormat) -> Self {
        self.config.export.format = format;
        self
    }

    /// Stage intermediate files in this directory instead of the system temp dir.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.export.temp_dir = Some(dir.into());
        self
    }

    /// Keep the tag-value and RDF intermediates next to the output file.
    pub const fn keep_intermediate(mut self, keep: bool) -> Self {
        self.config.export.keep_intermediate = keep;
        self
    }

    /// Enable or disable document verification after export.
    pub const fn verify(mut self, verify: bool) -> Self {
        self.config.export.verify = verify;
        self
    }

    /// Enable or disable persisting the imported sub-documents.
    pub const fn persist_documents(mut self, persist: bool) -> Self {
        self.config.import.persist_documents = persist;
        self
    }

    /// Limit how deep CONTAINS relationships are followed on import.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.import.max_depth = depth;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Export Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Default output format
    pub format: DocumentFormat,
    /// Directory for intermediate files (system temp dir when unset)
    pub temp_dir: Option<PathBuf>,
    /// Keep tag-value and RDF intermediates next to the output
    pub keep_intermediate: bool,
    /// Run document verification and report its warnings
    pub verify: bool,
    /// Namespace prefix for generated project documents
    pub namespace_base: String,
    /// SPDX version written into generated project documents
    pub spec_version: String,
    /// Data license of generated project documents
    pub data_license: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: DocumentFormat::TagValue,
            temp_dir: None,
            keep_intermediate: false,
            verify: true,
            namespace_base: DEFAULT_NAMESPACE_BASE.to_string(),
            spec_version: DEFAULT_SPEC_VERSION.to_string(),
            data_license: DEFAULT_DATA_LICENSE.to_string(),
        }
    }
}

// ============================================================================
// Import Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ImportConfig {
    /// Store creation info, package info, snippets, relationships,
    /// annotations and licenses of imported releases
    pub persist_documents: bool,
    /// Maximum depth of CONTAINS relationships followed into child releases
    pub max_depth: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            persist_documents: true,
            max_depth: DEFAULT_MAX_IMPORT_DEPTH,
        }
    }
}
