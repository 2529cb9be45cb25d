//! Graph flattening: an interchange document into stored records.
//!
//! The described package of the document becomes a release (with its
//! component) or a project; packages it CONTAINS become child releases. The
//! document itself is flattened into records before anything is written, so
//! a mapping failure never leaves a partial import behind.

mod flatten;
mod response;

use std::collections::HashSet;

pub use flatten::{flatten, FlattenedDocument};
pub use response::ImportResponse;

use crate::bridge::DocumentFormat;
use crate::config::ImportConfig;
use crate::error::{ErrorContext, InterchangeError, Result};
use crate::graph::{Element, RelationshipType, SpdxDocument, SpdxPackage};
use crate::model::{
    Component, MainlineState, Project, ProjectReleaseRelationship, Release, ReleaseRelationship,
    SpdxDocumentRecord,
};
use crate::store::{AddStatus, AddSummary, SpdxStore};

const NO_TOP_LEVEL_PACKAGE: &str = "The provided BOM did not contain any top level packages.";
const MULTIPLE_TOP_LEVEL_PACKAGES: &str =
    "The provided BOM file contained multiple described top level packages. This is not allowed here.";

/// What the described package of a document is imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Release,
    Project,
}

/// Caller choices for one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Input format; detected from the content when unset
    pub format: Option<DocumentFormat>,
    /// Version for the top-level release instead of the package version
    pub new_version: Option<String>,
    /// Import into this release instead of creating one
    pub existing_release_id: Option<String>,
}

/// Result of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Stored document record, when sub-documents were persisted
    pub document_id: Option<String>,
    pub response: ImportResponse,
}

/// The single described package of a document.
pub fn select_root(doc: &SpdxDocument) -> Result<&SpdxPackage> {
    match doc.described_packages().as_slice() {
        [] => Err(InterchangeError::validation(NO_TOP_LEVEL_PACKAGE)),
        [root] => Ok(*root),
        _ => Err(InterchangeError::validation(MULTIPLE_TOP_LEVEL_PACKAGES)),
    }
}

/// Id of an accepted write; `Duplicate` reuses the existing record.
fn accepted(summary: AddSummary, what: &str) -> Result<(String, bool)> {
    if summary.id.is_empty() {
        return Err(InterchangeError::persistence(format!(
            "{what} was not stored ({:?})",
            summary.status
        )));
    }
    match summary.status {
        AddStatus::Success => Ok((summary.id, true)),
        AddStatus::Duplicate => Ok((summary.id, false)),
        status => Err(InterchangeError::persistence(format!(
            "{what} was rejected ({status:?})"
        ))),
    }
}

/// Writes imported documents into a store.
pub struct SpdxImporter<'s, S: SpdxStore + ?Sized> {
    store: &'s mut S,
    config: ImportConfig,
}

impl<'s, S: SpdxStore + ?Sized> SpdxImporter<'s, S> {
    pub fn new(store: &'s mut S, config: ImportConfig) -> Self {
        Self { store, config }
    }

    pub fn import(
        &mut self,
        doc: &SpdxDocument,
        kind: ImportKind,
        options: &ImportOptions,
    ) -> Result<ImportOutcome> {
        let root = select_root(doc)?;
        match kind {
            ImportKind::Release => self.import_release(doc, root, options),
            ImportKind::Project => self.import_project(doc, root),
        }
    }

    fn import_release(
        &mut self,
        doc: &SpdxDocument,
        root: &SpdxPackage,
        options: &ImportOptions,
    ) -> Result<ImportOutcome> {
        let flattened = flatten(doc, root).context("flattening document")?;

        let mut visited = HashSet::from([root.id.clone()]);
        let response = match options.existing_release_id.as_deref() {
            Some(release_id) => self.reuse_release(doc, root, release_id, &mut visited)?,
            None => {
                let version = options
                    .new_version
                    .clone()
                    .filter(|version| !version.trim().is_empty())
                    .unwrap_or_else(|| root.version_info.clone().unwrap_or_default());
                self.create_release(doc, root, version, 0, &mut visited)?
            }
        };

        let document_id = if self.config.persist_documents {
            Some(self.persist(flattened, &response.id)?)
        } else {
            None
        };

        tracing::info!(
            "Imported release {} ({} of {} records written)",
            response.id,
            response.count_affected(),
            response.count()
        );
        Ok(ImportOutcome {
            document_id,
            response,
        })
    }

    fn import_project(&mut self, doc: &SpdxDocument, root: &SpdxPackage) -> Result<ImportOutcome> {
        let version = root.version_info.clone().unwrap_or_default();
        let mut visited = HashSet::from([root.id.clone()]);
        let children = self.import_children(doc, root, 0, &mut visited)?;

        let mut project = Project::new(&root.name, &version);
        project.description = root.description.clone().unwrap_or_default();
        for child in &children {
            project.release_id_to_usage.insert(
                child.id.clone(),
                ProjectReleaseRelationship {
                    release_relation: ReleaseRelationship::Contained,
                    mainline_state: MainlineState::Open,
                },
            );
        }
        let (project_id, affected) = accepted(self.store.add_project(project)?, "project")?;

        let mut response = ImportResponse::new(project_id, &root.name, version, affected);
        response.children = children;
        tracing::info!(
            "Imported project {} ({} of {} records written)",
            response.id,
            response.count_affected(),
            response.count()
        );
        Ok(ImportOutcome {
            document_id: None,
            response,
        })
    }

    /// Import into an existing release; its component linkage stays as is.
    fn reuse_release(
        &mut self,
        doc: &SpdxDocument,
        root: &SpdxPackage,
        release_id: &str,
        visited: &mut HashSet<String>,
    ) -> Result<ImportResponse> {
        let mut release = self
            .store
            .get_release(release_id)?
            .ok_or_else(|| InterchangeError::not_found("release", release_id))?;
        let children = self.import_children(doc, root, 0, visited)?;
        if !children.is_empty() {
            link_children(&mut release, &children);
            accepted(self.store.update_release(release.clone())?, "release")?;
        }

        let mut response =
            ImportResponse::new(release_id, &release.name, &release.version, false);
        response.children = children;
        Ok(response)
    }

    fn create_release(
        &mut self,
        doc: &SpdxDocument,
        package: &SpdxPackage,
        version: String,
        depth: usize,
        visited: &mut HashSet<String>,
    ) -> Result<ImportResponse> {
        let (component_id, _) = accepted(
            self.store.add_component(Component::new(&package.name))?,
            "component",
        )?;
        let children = self.import_children(doc, package, depth, visited)?;

        let mut release = Release::new(&package.name, &version);
        release.component_id = component_id;
        link_children(&mut release, &children);
        let (release_id, affected) = accepted(self.store.add_release(release)?, "release")?;

        if !affected && !children.is_empty() {
            // Existing release: add the new links to it.
            if let Some(mut existing) = self.store.get_release(&release_id)? {
                link_children(&mut existing, &children);
                accepted(self.store.update_release(existing)?, "release")?;
            }
        }

        let mut response = ImportResponse::new(release_id, &package.name, version, affected);
        response.children = children;
        Ok(response)
    }

    /// Child releases for the supported relationships of `package`.
    fn import_children(
        &mut self,
        doc: &SpdxDocument,
        package: &SpdxPackage,
        depth: usize,
        visited: &mut HashSet<String>,
    ) -> Result<Vec<ImportResponse>> {
        let mut children = Vec::new();
        for relationship in doc.relationships_of(&package.id) {
            if relationship.relationship_type != RelationshipType::Contains {
                tracing::debug!(
                    "Relationship type {} of {} is not imported",
                    relationship.relationship_type,
                    package.id
                );
                continue;
            }
            let Some(Element::Package(child)) = doc.element(&relationship.related) else {
                tracing::debug!(
                    "{} CONTAINS {}, which is not a package of the document",
                    package.id,
                    relationship.related
                );
                continue;
            };
            if depth + 1 > self.config.max_depth {
                tracing::warn!(
                    "Not importing {}: deeper than {} levels",
                    child.id,
                    self.config.max_depth
                );
                continue;
            }
            if !visited.insert(child.id.clone()) {
                tracing::warn!("Not importing {}: it contains itself", child.id);
                continue;
            }

            let version = child.version_info.clone().unwrap_or_default();
            let response = self
                .create_release(doc, child, version, depth + 1, visited)
                .with_context(|| format!("importing {}", child.id))?;
            visited.remove(&child.id);
            children.push(response);
        }
        Ok(children)
    }

    /// Store the flattened records and link them to the release.
    fn persist(&mut self, flattened: FlattenedDocument, release_id: &str) -> Result<String> {
        let mut release = self
            .store
            .get_release(release_id)?
            .ok_or_else(|| InterchangeError::not_found("release", release_id))?;
        let existing = match release.spdx_id.as_deref() {
            Some(id) => self.store.get_interchange_document(id)?,
            None => None,
        };

        let FlattenedDocument {
            mut creation_info,
            mut package_info,
            snippets,
            relationships,
            annotations,
            other_licenses,
        } = flattened;

        let mut record = SpdxDocumentRecord {
            id: existing.as_ref().and_then(|document| document.id.clone()),
            release_id: release_id.to_string(),
            snippets,
            relationships,
            annotations,
            other_licenses,
            ..SpdxDocumentRecord::default()
        };
        let document_id = stored_id(self.store.add_or_update_document(record.clone())?, "document")?;

        creation_info.id = existing
            .as_ref()
            .and_then(|document| document.creation_info_id.clone());
        creation_info.spdx_document_id = document_id.clone();
        let creation_info_id = stored_id(
            self.store.add_or_update_creation_info(creation_info)?,
            "creation info",
        )?;

        package_info.id = existing
            .as_ref()
            .and_then(|document| document.package_info_ids.first().cloned());
        package_info.spdx_document_id = document_id.clone();
        let package_info_id = stored_id(
            self.store.add_or_update_package_info(package_info)?,
            "package info",
        )?;

        record.id = Some(document_id.clone());
        record.creation_info_id = Some(creation_info_id);
        record.package_info_ids = vec![package_info_id];
        stored_id(self.store.add_or_update_document(record)?, "document")?;

        release.spdx_id = Some(document_id.clone());
        accepted(self.store.update_release(release)?, "release")?;

        tracing::debug!("Stored SPDX document {} for release {}", document_id, release_id);
        Ok(document_id)
    }
}

fn link_children(release: &mut Release, children: &[ImportResponse]) {
    for child in children {
        release
            .release_id_to_relationship
            .insert(child.id.clone(), ReleaseRelationship::Contained);
    }
}

/// Id of an add-or-update write, which must succeed.
fn stored_id(summary: AddSummary, what: &str) -> Result<String> {
    accepted(summary, what).map(|(id, _)| id)
}
