//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, ExportConfig, ImportConfig};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-interchange.yaml",
    ".sbom-interchange.yml",
    "sbom-interchange.yaml",
    "sbom-interchange.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/sbom-interchange/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("sbom-interchange")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml_ng::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for ConfigFileError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI args that
    /// were never given leave the file config alone.
    pub fn merge(&mut self, other: &Self) {
        let export_defaults = ExportConfig::default();
        if other.export.format != export_defaults.format {
            self.export.format = other.export.format;
        }
        if other.export.temp_dir.is_some() {
            self.export.temp_dir.clone_from(&other.export.temp_dir);
        }
        if other.export.keep_intermediate {
            self.export.keep_intermediate = true;
        }
        if !other.export.verify {
            self.export.verify = false;
        }
        if other.export.namespace_base != export_defaults.namespace_base {
            self.export.namespace_base.clone_from(&other.export.namespace_base);
        }
        if other.export.spec_version != export_defaults.spec_version {
            self.export.spec_version.clone_from(&other.export.spec_version);
        }
        if other.export.data_license != export_defaults.data_license {
            self.export.data_license.clone_from(&other.export.data_license);
        }

        let import_defaults = ImportConfig::default();
        if !other.import.persist_documents {
            self.import.persist_documents = false;
        }
        if other.import.max_depth != import_defaults.max_depth {
            self.import.max_depth = other.import.max_depth;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# SPDX Interchange Configuration
# Place this file at .sbom-interchange.yaml in your project root or ~/.config/sbom-interchange/

{}
",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# SPDX Interchange Configuration File
# ====================================
#
# Place it at:
#   - .sbom-interchange.yaml in your project root
#   - ~/.config/sbom-interchange/sbom-interchange.yaml for global config
#
# CLI arguments always override file settings.

# Export configuration
export:
  # Format: tag-value, rdf, json, yaml, xml
  format: tag-value
  # Directory for intermediate tag-value/RDF files (system temp dir when unset)
  # temp_dir: /var/tmp/spdx
  # Keep intermediates next to the output file
  keep_intermediate: false
  # Verify the document and report warnings in the export message
  verify: true
  # Settings for project documents
  namespace_base: https://spdx.org/spdxdocs
  spec_version: SPDX-2.3
  data_license: CC0-1.0

# Import configuration
import:
  # Store creation info, packages, snippets, relationships and licenses
  persist_documents: true
  # How deep CONTAINS relationships are followed into child releases
  max_depth: 32
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
