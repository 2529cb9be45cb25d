//! Packages, files and snippets.

use std::fmt;
use std::str::FromStr;

use super::{Annotation, AnyLicense, Checksum, StartEndPointer};

/// An element of the document arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Package(SpdxPackage),
    File(SpdxFile),
    Snippet(SpdxSnippet),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Self::Package(package) => &package.id,
            Self::File(file) => &file.id,
            Self::Snippet(snippet) => &snippet.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Package(_) => "package",
            Self::File(_) => "file",
            Self::Snippet(_) => "snippet",
        }
    }

    pub fn as_package(&self) -> Option<&SpdxPackage> {
        match self {
            Self::Package(package) => Some(package),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpdxPackage {
    pub id: String,
    pub name: String,
    pub version_info: Option<String>,
    pub package_file_name: Option<String>,
    pub supplier: Option<String>,
    pub originator: Option<String>,
    pub download_location: String,
    pub files_analyzed: bool,
    pub verification_code: Option<PackageVerificationCode>,
    pub checksums: Vec<Checksum>,
    pub homepage: Option<String>,
    pub source_info: Option<String>,
    pub license_concluded: AnyLicense,
    pub license_info_from_files: Vec<AnyLicense>,
    pub license_declared: AnyLicense,
    pub license_comments: Option<String>,
    pub copyright_text: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_refs: Vec<ExternalRef>,
    pub attribution_text: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub primary_package_purpose: Option<String>,
    pub release_date: Option<String>,
    pub built_date: Option<String>,
    pub valid_until_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageVerificationCode {
    pub value: String,
    pub excluded_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceCategory {
    Security,
    PackageManager,
    PersistentId,
    Other,
}

impl ReferenceCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Security => "SECURITY",
            Self::PackageManager => "PACKAGE-MANAGER",
            Self::PersistentId => "PERSISTENT-ID",
            Self::Other => "OTHER",
        }
    }

    /// Spelling used by the internal records.
    pub const fn record_name(self) -> &'static str {
        match self {
            Self::Security => "SECURITY",
            Self::PackageManager => "PACKAGE_MANAGER",
            Self::PersistentId => "PERSISTENT_ID",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for ReferenceCategory {
    type Err = String;

    /// Accepts both the `PACKAGE-MANAGER` and `PACKAGE_MANAGER` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "SECURITY" => Ok(Self::Security),
            "PACKAGE-MANAGER" => Ok(Self::PackageManager),
            "PERSISTENT-ID" => Ok(Self::PersistentId),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("unknown reference category '{other}'")),
        }
    }
}

impl fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRef {
    pub category: ReferenceCategory,
    /// e.g. `purl`, `cpe23Type`
    pub reference_type: String,
    pub locator: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpdxFile {
    pub id: String,
    pub name: String,
    pub checksums: Vec<Checksum>,
    pub license_concluded: AnyLicense,
    pub license_info_in_file: Vec<AnyLicense>,
    pub copyright_text: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpdxSnippet {
    pub id: String,
    pub name: Option<String>,
    /// Id of the file the snippet is taken from
    pub snippet_from_file: String,
    pub byte_range: StartEndPointer,
    pub line_range: Option<StartEndPointer>,
    pub license_concluded: AnyLicense,
    pub license_info_in_snippet: Vec<AnyLicense>,
    pub license_comments: Option<String>,
    pub copyright_text: Option<String>,
    pub comment: Option<String>,
    pub attribution_text: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_category_spellings() {
        assert_eq!(
            "PACKAGE_MANAGER".parse::<ReferenceCategory>(),
            Ok(ReferenceCategory::PackageManager)
        );
        assert_eq!(
            "package-manager".parse::<ReferenceCategory>(),
            Ok(ReferenceCategory::PackageManager)
        );
        assert_eq!(ReferenceCategory::PersistentId.record_name(), "PERSISTENT_ID");
        assert!("VCS".parse::<ReferenceCategory>().is_err());
    }
}
