//! Portal records: components, releases and projects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    #[default]
    Oss,
    Cots,
    Internal,
}

/// A named piece of software; releases are its versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    pub id: Option<String>,
    pub name: String,
    pub component_type: ComponentType,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// How a release is linked to another release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseRelationship {
    Contained,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    pub id: Option<String>,
    pub name: String,
    pub version: String,
    pub component_id: String,
    /// Id of the stored interchange document, if one was imported
    pub spdx_id: Option<String>,
    pub release_id_to_relationship: IndexMap<String, ReleaseRelationship>,
}

impl Release {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }
}

/// Lifecycle state of a release inside a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainlineState {
    #[default]
    Open,
    Mainline,
    Specific,
    Phaseout,
    Denied,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectReleaseRelationship {
    pub release_relation: ReleaseRelationship,
    pub mainline_state: MainlineState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Option<String>,
    pub name: String,
    pub version: String,
    pub description: String,
    pub created_by: String,
    /// Creation day, `YYYY-MM-DD`
    pub created_on: String,
    pub release_id_to_usage: IndexMap<String, ProjectReleaseRelationship>,
}

impl Project {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }
}
