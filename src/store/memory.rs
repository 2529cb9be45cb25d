//! In-memory record store with JSON snapshots.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{AddStatus, AddSummary, SpdxStore};
use crate::error::{InterchangeError, Result};
use crate::model::{
    Component, CreationInfo, PackageInfo, Project, Release, SpdxDocumentRecord,
};

/// Store keeping every record in insertion-ordered maps.
///
/// Ids are allocated from a counter (`release-0003`). Components are unique
/// by name, releases by name and version, projects by name and version;
/// adding a second one reports [`AddStatus::Duplicate`] with the existing id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryStore {
    next_id: u64,
    components: IndexMap<String, Component>,
    releases: IndexMap<String, Release>,
    projects: IndexMap<String, Project>,
    documents: IndexMap<String, SpdxDocumentRecord>,
    creation_infos: IndexMap<String, CreationInfo>,
    package_infos: IndexMap<String, PackageInfo>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InterchangeError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the whole store as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| InterchangeError::io(path, e))
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn releases(&self) -> impl Iterator<Item = &Release> {
        self.releases.values()
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn documents(&self) -> impl Iterator<Item = &SpdxDocumentRecord> {
        self.documents.values()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{:04}", self.next_id)
    }
}

/// Check a display name; `None` means it is acceptable.
fn name_problem(name: &str) -> Option<AddStatus> {
    if name.is_empty() {
        Some(AddStatus::InvalidInput)
    } else if name.trim().is_empty() {
        Some(AddStatus::NamingError)
    } else {
        None
    }
}

impl SpdxStore for InMemoryStore {
    fn get_release(&self, id: &str) -> Result<Option<Release>> {
        Ok(self.releases.get(id).cloned())
    }

    fn get_project(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.projects.get(id).cloned())
    }

    fn get_interchange_document(&self, id: &str) -> Result<Option<SpdxDocumentRecord>> {
        Ok(self.documents.get(id).cloned())
    }

    fn get_creation_info(&self, id: &str) -> Result<Option<CreationInfo>> {
        Ok(self.creation_infos.get(id).cloned())
    }

    fn get_package_info(&self, id: &str) -> Result<Option<PackageInfo>> {
        Ok(self.package_infos.get(id).cloned())
    }

    fn add_component(&mut self, mut component: Component) -> Result<AddSummary> {
        if let Some(status) = name_problem(&component.name) {
            return Ok(AddSummary::rejected(status));
        }
        if let Some((id, _)) = self
            .components
            .iter()
            .find(|(_, existing)| existing.name.eq_ignore_ascii_case(&component.name))
        {
            return Ok(AddSummary::new(id.clone(), AddStatus::Duplicate));
        }

        let id = self.allocate_id("component");
        component.id = Some(id.clone());
        self.components.insert(id.clone(), component);
        Ok(AddSummary::success(id))
    }

    fn add_release(&mut self, mut release: Release) -> Result<AddSummary> {
        if let Some(status) = name_problem(&release.name) {
            return Ok(AddSummary::rejected(status));
        }
        if !self.components.contains_key(&release.component_id) {
            return Ok(AddSummary::rejected(AddStatus::InvalidInput));
        }
        if let Some((id, _)) = self.releases.iter().find(|(_, existing)| {
            existing.name == release.name && existing.version == release.version
        }) {
            return Ok(AddSummary::new(id.clone(), AddStatus::Duplicate));
        }

        let id = self.allocate_id("release");
        release.id = Some(id.clone());
        self.releases.insert(id.clone(), release);
        Ok(AddSummary::success(id))
    }

    fn update_release(&mut self, release: Release) -> Result<AddSummary> {
        let Some(id) = release.id.clone() else {
            return Ok(AddSummary::rejected(AddStatus::InvalidInput));
        };
        if !self.releases.contains_key(&id) {
            return Ok(AddSummary::rejected(AddStatus::InvalidInput));
        }
        self.releases.insert(id.clone(), release);
        Ok(AddSummary::success(id))
    }

    fn add_project(&mut self, mut project: Project) -> Result<AddSummary> {
        if let Some(status) = name_problem(&project.name) {
            return Ok(AddSummary::rejected(status));
        }
        if let Some((id, _)) = self.projects.iter().find(|(_, existing)| {
            existing.name == project.name && existing.version == project.version
        }) {
            return Ok(AddSummary::new(id.clone(), AddStatus::Duplicate));
        }

        let id = self.allocate_id("project");
        project.id = Some(id.clone());
        self.projects.insert(id.clone(), project);
        Ok(AddSummary::success(id))
    }

    fn add_or_update_document(&mut self, mut document: SpdxDocumentRecord) -> Result<AddSummary> {
        let id = match document.id.clone() {
            Some(id) => id,
            None => self.allocate_id("spdx-document"),
        };
        document.id = Some(id.clone());
        self.documents.insert(id.clone(), document);
        Ok(AddSummary::success(id))
    }

    fn add_or_update_creation_info(&mut self, mut info: CreationInfo) -> Result<AddSummary> {
        let id = match info.id.clone() {
            Some(id) => id,
            None => self.allocate_id("creation-info"),
        };
        info.id = Some(id.clone());
        self.creation_infos.insert(id.clone(), info);
        Ok(AddSummary::success(id))
    }

    fn add_or_update_package_info(&mut self, mut info: PackageInfo) -> Result<AddSummary> {
        let id = match info.id.clone() {
            Some(id) => id,
            None => self.allocate_id("package-info"),
        };
        info.id = Some(id.clone());
        self.package_infos.insert(id.clone(), info);
        Ok(AddSummary::success(id))
    }
}
