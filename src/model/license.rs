//! Extracted license record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A license found in the scanned material, stored with its text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedLicenseInfo {
    pub license_id: String,
    pub extracted_text: String,
    pub license_name: String,
    pub license_cross_refs: BTreeSet<String>,
    pub license_comment: String,
    pub index: usize,
}
