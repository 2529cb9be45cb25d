//! Configuration validation.

use super::types::{AppConfig, ExportConfig, ImportConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.export.validate());
        errors.extend(self.import.validate());
        errors
    }
}

impl Validatable for ExportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref dir) = self.temp_dir {
            if !dir.is_dir() {
                errors.push(ConfigError {
                    field: "export.temp_dir".to_string(),
                    message: format!("Directory does not exist: {}", dir.display()),
                });
            }
        }

        if !self.spec_version.starts_with("SPDX-2.") {
            errors.push(ConfigError {
                field: "export.spec_version".to_string(),
                message: format!(
                    "Unsupported SPDX version '{}'. Expected SPDX-2.x",
                    self.spec_version
                ),
            });
        }

        if spdx::license_id(&self.data_license).is_none() {
            errors.push(ConfigError {
                field: "export.data_license".to_string(),
                message: format!("'{}' is not a listed SPDX license", self.data_license),
            });
        }

        if !(self.namespace_base.starts_with("http://") || self.namespace_base.starts_with("https://"))
        {
            errors.push(ConfigError {
                field: "export.namespace_base".to_string(),
                message: format!("Namespace base must be an http(s) URI, got '{}'", self.namespace_base),
            });
        }

        errors
    }
}

impl Validatable for ImportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push(ConfigError {
                field: "import.max_depth".to_string(),
                message: "Depth must be at least 1".to_string(),
            });
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_invalid_export_config() {
        let config = ExportConfig {
            temp_dir: Some("/nonexistent/staging".into()),
            spec_version: "SPDX-3.0".to_string(),
            data_license: "LicenseRef-data".to_string(),
            namespace_base: "urn:spdx".to_string(),
            ..ExportConfig::default()
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "export.temp_dir",
                "export.spec_version",
                "export.data_license",
                "export.namespace_base"
            ]
        );
    }

    #[test]
    fn test_zero_depth_is_invalid() {
        let config = ImportConfig {
            max_depth: 0,
            ..ImportConfig::default()
        };
        assert_eq!(config.validate().len(), 1);
    }
}
