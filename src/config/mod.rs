//! Configuration for export and import runs.
//!
//! Settings come from a YAML file discovered in the usual places, with CLI
//! arguments layered on top.
//!
//! ```rust
//! use sbom_interchange::bridge::DocumentFormat;
//! use sbom_interchange::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .export_format(DocumentFormat::Json)
//!     .keep_intermediate(true)
//!     .build();
//! assert!(config.export.verify);
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-interchange.yaml` file in your project root or
//! `~/.config/sbom-interchange/`:
//!
//! ```yaml
//! export:
//!   format: rdf
//! import:
//!   persist_documents: false
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_DATA_LICENSE, DEFAULT_MAX_IMPORT_DEPTH, DEFAULT_NAMESPACE_BASE, DEFAULT_SPEC_VERSION,
};
pub use types::{AppConfig, AppConfigBuilder, ExportConfig, ImportConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, CONFIG_FILE_NAMES, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `.sbom-interchange.yaml` format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
