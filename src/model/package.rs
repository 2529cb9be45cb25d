//! Package-info record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{AnnotationInfo, ChecksumRecord};

/// Stored description of one package of an interchange document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageInfo {
    /// Storage id, `None` until first persisted
    pub id: Option<String>,
    pub spdx_document_id: String,
    pub spdx_id: String,
    pub name: String,
    pub version_info: String,
    pub package_file_name: String,
    pub supplier: String,
    pub originator: String,
    pub download_location: String,
    pub files_analyzed: bool,
    pub verification_code: VerificationCode,
    pub checksums: Vec<ChecksumRecord>,
    pub homepage: String,
    pub source_info: String,
    pub license_concluded: String,
    pub license_info_from_files: BTreeSet<String>,
    pub license_declared: String,
    pub license_comments: String,
    pub copyright_text: String,
    pub summary: String,
    pub description: String,
    pub package_comment: String,
    pub external_refs: Vec<ExternalReference>,
    pub attribution_text: BTreeSet<String>,
    pub annotations: Vec<AnnotationInfo>,
    pub primary_package_purpose: String,
    pub release_date: String,
    pub built_date: String,
    pub valid_until_date: String,
    pub index: usize,
}

/// Package verification code over the analyzed files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationCode {
    pub value: String,
    pub excluded_files: BTreeSet<String>,
}

impl VerificationCode {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.excluded_files.is_empty()
    }
}

/// External reference of a package, e.g. a purl or a CPE.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalReference {
    /// `SECURITY`, `PACKAGE_MANAGER`, `PERSISTENT_ID` or `OTHER`
    pub reference_category: String,
    pub reference_locator: String,
    pub reference_type: String,
    pub comment: String,
    pub index: usize,
}
