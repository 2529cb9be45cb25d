//! Project documents: a project package containing its releases.

use crate::config::ExportConfig;
use crate::convert::{BuildContext, ElementKind};
use crate::error::{InterchangeError, MappingErrorKind, Result};
use crate::graph::{
    AnyLicense, DocumentCreation, Element, Relationship, RelationshipType, SpdxDocument,
    SpdxPackage, DOCUMENT_SPDX_ID, NOASSERTION,
};
use crate::model::Project;
use crate::store::SpdxStore;

use super::{ExportOutcome, SpdxExporter};

/// Tool creator written into every project document.
pub const PROJECT_TOOL_CREATOR: &str = concat!("Tool: sbom-interchange-", env!("CARGO_PKG_VERSION"));

impl<S: SpdxStore + ?Sized> SpdxExporter<'_, S> {
    /// Assemble a document describing a project.
    ///
    /// The described package stands for the project and CONTAINS the root
    /// package of every release the project uses. Releases that cannot be
    /// exported are left out with a warning.
    pub fn export_project(&self, project_id: &str, config: &ExportConfig) -> Result<ExportOutcome> {
        let project = self
            .store
            .get_project(project_id)?
            .ok_or_else(|| InterchangeError::not_found("project", project_id))?;

        let mut ctx = BuildContext::new();
        let mut document = SpdxDocument::new(project_creation(&project, config)?);
        let project_package = project_package(&project);
        let project_package_id = project_package.id.clone();
        document.add_element(Element::Package(project_package));
        document.relationships.push(Relationship::new(
            DOCUMENT_SPDX_ID,
            RelationshipType::Describes,
            &project_package_id,
        ));

        for release_id in project.release_id_to_usage.keys() {
            let release_document = match self.assemble_release(release_id, &mut ctx) {
                Ok(release_document) => release_document,
                Err(err) => {
                    ctx.skipped.record(ElementKind::Package, release_id.as_str(), err);
                    continue;
                }
            };
            let Some(package) = release_document.described_packages().first().copied().cloned()
            else {
                ctx.skipped.record(
                    ElementKind::Package,
                    release_id.as_str(),
                    "release document describes no package",
                );
                continue;
            };

            let comment = release_document
                .relationships_of(&package.id)
                .find(|relationship| relationship.relationship_type == RelationshipType::Contains)
                .and_then(|relationship| relationship.comment.clone());
            let mut contains =
                Relationship::new(&project_package_id, RelationshipType::Contains, &package.id);
            contains.comment = comment;

            document.add_element(Element::Package(package));
            document.relationships.push(contains);
        }
        document.extracted_licenses = ctx.interner.into_licenses();

        tracing::info!(
            "Assembled project document '{}' with {} packages",
            document.creation.name,
            document.packages().count()
        );
        Ok(ExportOutcome {
            document,
            skipped: ctx.skipped,
        })
    }
}

/// `name-version` with spaces replaced, or just the name without a version.
fn document_name(project: &Project) -> String {
    let name = project.name.replace(' ', "-");
    if project.version.trim().is_empty() {
        name
    } else {
        format!("{name}-{}", project.version)
    }
}

fn project_creation(project: &Project, config: &ExportConfig) -> Result<DocumentCreation> {
    let data_license = spdx::license_id(&config.data_license)
        .map(|license| AnyLicense::Listed(license.name.to_string()))
        .ok_or_else(|| {
            InterchangeError::mapping(
                "building project creation info",
                MappingErrorKind::UnlistedLicense(config.data_license.clone()),
            )
        })?;

    let name = document_name(project);
    let mut creators = vec![PROJECT_TOOL_CREATOR.to_string()];
    if !project.created_by.trim().is_empty() {
        creators.insert(0, format!("Person: {}", project.created_by));
    }
    let created = if project.created_on.is_empty() {
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        format!("{}T00:00:00Z", project.created_on)
    };

    Ok(DocumentCreation {
        spec_version: config.spec_version.clone(),
        namespace: format!("{}/{}", config.namespace_base.trim_end_matches('/'), name),
        name,
        data_license,
        creators,
        created,
        ..DocumentCreation::default()
    })
}

fn project_package(project: &Project) -> SpdxPackage {
    let name = project.name.replace(' ', "-");
    SpdxPackage {
        id: format!("SPDXRef-{name}"),
        name,
        version_info: Some(project.version.clone()).filter(|version| !version.is_empty()),
        download_location: NOASSERTION.to_string(),
        files_analyzed: false,
        license_concluded: AnyLicense::NoAssertion,
        license_declared: AnyLicense::NoAssertion,
        copyright_text: Some(NOASSERTION.to_string()),
        description: Some(project.description.clone()).filter(|text| !text.is_empty()),
        ..SpdxPackage::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_name() {
        let mut project = Project::new("Smart Meter", "2.0");
        assert_eq!(document_name(&project), "Smart-Meter-2.0");
        project.version.clear();
        assert_eq!(document_name(&project), "Smart-Meter");
    }

    #[test]
    fn test_project_creation() {
        let mut project = Project::new("meter", "1");
        project.created_by = "jane@example.org".to_string();
        project.created_on = "2024-03-01".to_string();

        let creation = project_creation(&project, &ExportConfig::default()).unwrap();
        assert_eq!(creation.created, "2024-03-01T00:00:00Z");
        assert_eq!(creation.creators[0], "Person: jane@example.org");
        assert_eq!(creation.namespace, "https://spdx.org/spdxdocs/meter-1");
        assert_eq!(creation.data_license, AnyLicense::Listed("CC0-1.0".to_string()));

        let config = ExportConfig {
            data_license: "Proprietary".to_string(),
            ..ExportConfig::default()
        };
        assert!(project_creation(&project, &config).is_err());
    }
}
