//! Relationship and annotation records.

use serde::{Deserialize, Serialize};

/// Directed relationship between two SPDX elements, by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipInfo {
    pub spdx_element_id: String,
    /// Relationship type name, e.g. `DESCRIBES` or `CONTAINS`
    pub relationship_type: String,
    pub related_spdx_element: String,
    pub relationship_comment: String,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationInfo {
    pub annotator: String,
    pub annotation_date: String,
    /// `REVIEW` or `OTHER`
    pub annotation_type: String,
    pub annotation_comment: String,
    pub index: usize,
}
