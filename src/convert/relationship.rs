//! Relationship builder and the export-side root expansion state machine.

use crate::error::{InterchangeError, Result};
use crate::graph::{Relationship, RelationshipType};
use crate::model::RelationshipInfo;

use super::{non_empty, or_empty};

/// Where the exporter stands in finding the document's root package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootState {
    /// No DESCRIBES relationship seen yet
    #[default]
    SeekingRoot,
    /// The first DESCRIBES was just handed out for expansion
    RootFound,
    /// Every further relationship is a plain reference
    Passthrough,
}

/// What to do with a relationship during export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Populate the related package in full from its package info
    ExpandRoot,
    /// Emit the relationship as an id reference only
    Reference,
}

/// Hands out at most one root expansion per export.
#[derive(Debug, Default)]
pub struct RootExpansion {
    state: RootState,
}

impl RootExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RootState {
        self.state
    }

    /// Classify the next relationship in export order.
    pub fn classify(&mut self, relationship_type: &RelationshipType) -> Disposition {
        match self.state {
            RootState::SeekingRoot if *relationship_type == RelationshipType::Describes => {
                self.state = RootState::RootFound;
                Disposition::ExpandRoot
            }
            RootState::SeekingRoot => Disposition::Reference,
            RootState::RootFound | RootState::Passthrough => {
                self.state = RootState::Passthrough;
                Disposition::Reference
            }
        }
    }
}

/// Build a relationship node that references its endpoints by id.
pub fn relationship_to_graph(info: &RelationshipInfo) -> Result<Relationship> {
    if info.spdx_element_id.is_empty() {
        return Err(InterchangeError::missing_field("spdxElementId", "relationship"));
    }
    if info.related_spdx_element.is_empty() {
        return Err(InterchangeError::missing_field(
            "relatedSpdxElement",
            format!("relationship from {}", info.spdx_element_id),
        ));
    }
    if info.relationship_type.trim().is_empty() {
        return Err(InterchangeError::missing_field(
            "relationshipType",
            format!("relationship from {}", info.spdx_element_id),
        ));
    }

    Ok(Relationship {
        source: info.spdx_element_id.clone(),
        relationship_type: RelationshipType::from(info.relationship_type.as_str()),
        related: info.related_spdx_element.clone(),
        comment: non_empty(&info.relationship_comment),
    })
}

pub fn relationship_from_graph(relationship: &Relationship, index: usize) -> RelationshipInfo {
    RelationshipInfo {
        spdx_element_id: relationship.source.clone(),
        relationship_type: relationship.relationship_type.as_str().to_string(),
        related_spdx_element: relationship.related.clone(),
        relationship_comment: or_empty(relationship.comment.as_ref()),
        index,
    }
}
