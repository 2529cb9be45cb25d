//! Default values shared by the configuration types.

/// SPDX version of generated documents.
pub const DEFAULT_SPEC_VERSION: &str = "SPDX-2.3";

/// Data license every SPDX document carries.
pub const DEFAULT_DATA_LICENSE: &str = "CC0-1.0";

/// Prefix of generated document namespaces.
pub const DEFAULT_NAMESPACE_BASE: &str = "https://spdx.org/spdxdocs";

/// How deep CONTAINS chains are followed on import.
pub const DEFAULT_MAX_IMPORT_DEPTH: usize = 32;
