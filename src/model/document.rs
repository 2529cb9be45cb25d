//! Document record: the stored interchange document of one release.

use serde::{Deserialize, Serialize};

use super::{AnnotationInfo, ExtractedLicenseInfo, RelationshipInfo, SnippetInfo};

/// Sub-documents owned by a release.
///
/// Creation info and package infos live in their own records and are
/// linked by id; the remaining element kinds are embedded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpdxDocumentRecord {
    /// Storage id, `None` until first persisted
    pub id: Option<String>,
    pub release_id: String,
    pub creation_info_id: Option<String>,
    pub package_info_ids: Vec<String>,
    pub snippets: Vec<SnippetInfo>,
    pub relationships: Vec<RelationshipInfo>,
    pub annotations: Vec<AnnotationInfo>,
    pub other_licenses: Vec<ExtractedLicenseInfo>,
}

impl SpdxDocumentRecord {
    pub fn for_release(release_id: impl Into<String>) -> Self {
        Self {
            release_id: release_id.into(),
            ..Self::default()
        }
    }
}
