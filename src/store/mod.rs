//! Record storage seam.
//!
//! The engine never talks to a database directly. Everything it reads or
//! writes goes through [`SpdxStore`], which owns the consistency of the
//! stored records. [`InMemoryStore`] is the bundled implementation used by
//! the CLI and the tests.

mod memory;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    Component, CreationInfo, PackageInfo, Project, Release, SpdxDocumentRecord,
};

pub use memory::InMemoryStore;

/// Outcome of a write, as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddStatus {
    Success,
    /// An equivalent record already exists; its id is returned
    Duplicate,
    InvalidInput,
    NamingError,
}

/// Result of a write: the id of the written or matching record.
///
/// `id` is empty when the store did not produce one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSummary {
    pub id: String,
    pub status: AddStatus,
}

impl AddSummary {
    pub fn new(id: impl Into<String>, status: AddStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }

    pub fn success(id: impl Into<String>) -> Self {
        Self::new(id, AddStatus::Success)
    }

    pub fn rejected(status: AddStatus) -> Self {
        Self::new(String::new(), status)
    }
}

/// Storage collaborator for releases, projects and interchange records.
///
/// Lookups return `Ok(None)` for unknown ids; `Err` is reserved for
/// failures of the store itself.
pub trait SpdxStore {
    fn get_release(&self, id: &str) -> Result<Option<Release>>;

    fn get_project(&self, id: &str) -> Result<Option<Project>>;

    fn get_interchange_document(&self, id: &str) -> Result<Option<SpdxDocumentRecord>>;

    fn get_creation_info(&self, id: &str) -> Result<Option<CreationInfo>>;

    fn get_package_info(&self, id: &str) -> Result<Option<PackageInfo>>;

    fn add_component(&mut self, component: Component) -> Result<AddSummary>;

    fn add_release(&mut self, release: Release) -> Result<AddSummary>;

    /// Replace a release that has an id.
    fn update_release(&mut self, release: Release) -> Result<AddSummary>;

    fn add_project(&mut self, project: Project) -> Result<AddSummary>;

    /// Insert when `id` is unset, replace otherwise.
    fn add_or_update_document(&mut self, document: SpdxDocumentRecord) -> Result<AddSummary>;

    /// Insert when `id` is unset, replace otherwise.
    fn add_or_update_creation_info(&mut self, info: CreationInfo) -> Result<AddSummary>;

    /// Insert when `id` is unset, replace otherwise.
    fn add_or_update_package_info(&mut self, info: PackageInfo) -> Result<AddSummary>;
}
