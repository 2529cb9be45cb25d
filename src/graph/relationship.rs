//! Relationships and annotations.

use std::fmt;
use std::str::FromStr;

/// Relationship type. Only the types the engine acts on are named; the rest
/// pass through as [`RelationshipType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Describes,
    Contains,
    Other(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Describes => "DESCRIBES",
            Self::Contains => "CONTAINS",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for RelationshipType {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().replace('-', "_").as_str() {
            "DESCRIBES" => Self::Describes,
            "CONTAINS" => Self::Contains,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge from `source` to `related`, both SPDX ids.
///
/// The related id does not have to resolve to an element of the same
/// document: passthrough relationships may point at external elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub source: String,
    pub relationship_type: RelationshipType,
    pub related: String,
    pub comment: Option<String>,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        relationship_type: RelationshipType,
        related: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            relationship_type,
            related: related.into(),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationType {
    Review,
    Other,
}

impl AnnotationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Review => "REVIEW",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for AnnotationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "REVIEW" => Ok(Self::Review),
            "OTHER" => Ok(Self::Other),
            other => Err(format!("unknown annotation type '{other}'")),
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub annotator: String,
    pub annotation_type: AnnotationType,
    /// RFC 3339 timestamp as written by the annotator
    pub date: String,
    pub comment: String,
}
