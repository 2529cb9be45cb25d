//! Graph assembly: stored records of a release into one rooted document.
//!
//! Creation info and snippets are the core of a document and any failure to
//! build them aborts the export. Relationships, annotations and the parts of
//! packages that cannot be mapped are skipped and recorded instead.

mod project;

pub use project::PROJECT_TOOL_CREATOR;

use crate::convert::annotation::annotation_to_graph;
use crate::convert::creation::creation_to_graph;
use crate::convert::file::file_to_graph;
use crate::convert::license::extracted_license_to_graph;
use crate::convert::package::package_to_graph;
use crate::convert::relationship::{relationship_to_graph, Disposition, RootExpansion};
use crate::convert::snippet::snippet_to_graph;
use crate::convert::{BuildContext, ElementKind, SkippedElements};
use crate::error::{ErrorContext, InterchangeError, OptionContext, Result};
use crate::graph::{Element, SpdxDocument};
use crate::model::{in_index_order, PackageInfo, Release, SpdxDocumentRecord};
use crate::store::SpdxStore;

/// An assembled document together with what was left out of it.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub document: SpdxDocument,
    pub skipped: SkippedElements,
}

/// Builds interchange documents from stored records.
pub struct SpdxExporter<'s, S: SpdxStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: SpdxStore + ?Sized> SpdxExporter<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Assemble the document of one release.
    pub fn export_release(&self, release_id: &str) -> Result<ExportOutcome> {
        let mut ctx = BuildContext::new();
        let mut document = self
            .assemble_release(release_id, &mut ctx)
            .with_context(|| format!("exporting release {release_id}"))?;
        document.extracted_licenses = ctx.interner.into_licenses();

        tracing::info!(
            "Assembled document '{}' with {} elements, {} relationships, {} skipped",
            document.creation.name,
            document.elements().count(),
            document.relationships.len(),
            ctx.skipped.len()
        );
        Ok(ExportOutcome {
            document,
            skipped: ctx.skipped,
        })
    }

    pub(crate) fn release(&self, release_id: &str) -> Result<Release> {
        self.store
            .get_release(release_id)?
            .ok_or_else(|| InterchangeError::not_found("release", release_id))
    }

    fn document_record(&self, release: &Release, release_id: &str) -> Result<SpdxDocumentRecord> {
        let document_id = release
            .spdx_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .with_context_none(|| format!("release {release_id} has no SPDX document"))?;
        self.store
            .get_interchange_document(document_id)?
            .ok_or_else(|| InterchangeError::not_found("SPDX document", document_id))
    }

    /// Build a release document into a caller-owned context, leaving the
    /// interner's licenses for the caller to attach.
    pub(crate) fn assemble_release(
        &self,
        release_id: &str,
        ctx: &mut BuildContext,
    ) -> Result<SpdxDocument> {
        let release = self.release(release_id)?;
        let record = self.document_record(&release, release_id)?;

        // Text-bearing licenses become the canonical instances.
        for license in in_index_order(&record.other_licenses) {
            ctx.interner.intern(extracted_license_to_graph(license));
        }

        let creation_info_id = record
            .creation_info_id
            .as_deref()
            .with_context_none(|| {
                format!("SPDX document of release {release_id} has no creation info")
            })?;
        let creation_info = self
            .store
            .get_creation_info(creation_info_id)?
            .ok_or_else(|| InterchangeError::not_found("creation info", creation_info_id))?;
        let mut document = SpdxDocument::new(creation_to_graph(&creation_info)?);

        for snippet in in_index_order(&record.snippets) {
            let file = file_to_graph(&snippet.snippet_from_file);
            let file_id = file.id.clone();
            document.add_element(Element::File(file));
            let node = snippet_to_graph(snippet, &file_id, ctx)?;
            document.attach_snippet(node)?;
        }

        self.add_relationships(&record, &mut document, ctx);

        for annotation in in_index_order(&record.annotations) {
            match annotation_to_graph(annotation) {
                Ok(node) => document.annotations.push(node),
                Err(err) => ctx.skipped.record(
                    ElementKind::Annotation,
                    format!("annotation #{}", annotation.index),
                    err,
                ),
            }
        }

        Ok(document)
    }

    fn add_relationships(
        &self,
        record: &SpdxDocumentRecord,
        document: &mut SpdxDocument,
        ctx: &mut BuildContext,
    ) {
        let mut root = RootExpansion::new();
        for info in in_index_order(&record.relationships) {
            let relationship = match relationship_to_graph(info) {
                Ok(relationship) => relationship,
                Err(err) => {
                    ctx.skipped.record(
                        ElementKind::Relationship,
                        format!("relationship #{}", info.index),
                        err,
                    );
                    continue;
                }
            };

            if root.classify(&relationship.relationship_type) == Disposition::ExpandRoot {
                let expanded = self
                    .root_package_info(record, &relationship.related)
                    .and_then(|package_info| package_to_graph(&package_info, ctx));
                match expanded {
                    Ok(mut package) => {
                        // The described element is named by the relationship.
                        if package.id != relationship.related {
                            tracing::debug!(
                                "Package info {} expanded as {}",
                                package.id,
                                relationship.related
                            );
                            package.id.clone_from(&relationship.related);
                        }
                        document.add_element(Element::Package(package));
                    }
                    Err(err) => {
                        ctx.skipped.record(
                            ElementKind::Relationship,
                            format!("{} DESCRIBES {}", relationship.source, relationship.related),
                            err,
                        );
                        continue;
                    }
                }
            }
            document.relationships.push(relationship);
        }
    }

    /// The package info named by `spdx_id`, else the document's first one.
    fn root_package_info(&self, record: &SpdxDocumentRecord, spdx_id: &str) -> Result<PackageInfo> {
        let mut first = None;
        for id in &record.package_info_ids {
            if let Some(info) = self.store.get_package_info(id)? {
                if info.spdx_id == spdx_id {
                    return Ok(info);
                }
                first.get_or_insert(info);
            }
        }
        first.ok_or_else(|| InterchangeError::not_found("package info", spdx_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AnyLicense, RelationshipType};
    use crate::model::{
        AnnotationInfo, Component, CreationInfo, Creator, ExtractedLicenseInfo, RangeType,
        RelationshipInfo, SnippetInfo, SnippetRange,
    };
    use crate::store::InMemoryStore;
    use std::rc::Rc;

    fn describes(related: &str, index: usize) -> RelationshipInfo {
        RelationshipInfo {
            spdx_element_id: "SPDXRef-DOCUMENT".to_string(),
            relationship_type: "DESCRIBES".to_string(),
            related_spdx_element: related.to_string(),
            index,
            ..Default::default()
        }
    }

    fn seeded(record: impl FnOnce(&mut SpdxDocumentRecord)) -> (InMemoryStore, String) {
        let mut store = InMemoryStore::new();
        let component = store.add_component(Component::new("zlib")).unwrap();
        let mut release = Release::new("zlib", "1.3");
        release.component_id = component.id;
        let release_id = store.add_release(release).unwrap().id;

        let creation = store
            .add_or_update_creation_info(CreationInfo {
                spdx_version: "SPDX-2.3".to_string(),
                name: "zlib-1.3".to_string(),
                data_license: "CC0-1.0".to_string(),
                document_namespace: "https://example.org/zlib".to_string(),
                creators: vec![Creator::parse("Tool: scanner", 0).unwrap()],
                created: "2024-01-15T10:00:00Z".to_string(),
                ..Default::default()
            })
            .unwrap();
        let package = store
            .add_or_update_package_info(PackageInfo {
                spdx_id: "SPDXRef-zlib".to_string(),
                name: "zlib".to_string(),
                version_info: "1.3".to_string(),
                download_location: "NOASSERTION".to_string(),
                license_concluded: "LicenseRef-zlib".to_string(),
                ..Default::default()
            })
            .unwrap();

        let mut document = SpdxDocumentRecord::for_release(&release_id);
        document.creation_info_id = Some(creation.id);
        document.package_info_ids = vec![package.id];
        document.relationships = vec![describes("SPDXRef-zlib", 0)];
        record(&mut document);
        let document_id = store.add_or_update_document(document).unwrap().id;

        let mut release = store.get_release(&release_id).unwrap().unwrap();
        release.spdx_id = Some(document_id);
        store.update_release(release).unwrap();
        (store, release_id)
    }

    #[test]
    fn test_export_expands_first_describes_only() {
        let (store, release_id) = seeded(|doc| {
            doc.relationships.push(describes("SPDXRef-other", 1));
        });
        let outcome = SpdxExporter::new(&store).export_release(&release_id).unwrap();

        let doc = &outcome.document;
        assert_eq!(doc.packages().count(), 1);
        assert_eq!(doc.relationships.len(), 2);
        assert_eq!(doc.relationships[1].relationship_type, RelationshipType::Describes);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_root_package_takes_the_described_id() {
        let (store, release_id) = seeded(|doc| {
            doc.relationships = vec![describes("SPDXRef-Package", 0)];
        });
        let outcome = SpdxExporter::new(&store).export_release(&release_id).unwrap();

        let described = outcome.document.described_packages();
        assert_eq!(described.len(), 1);
        assert_eq!(described[0].id, "SPDXRef-Package");
        assert_eq!(described[0].name, "zlib");
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_stored_license_text_wins() {
        let (store, release_id) = seeded(|doc| {
            doc.other_licenses.push(ExtractedLicenseInfo {
                license_id: "LicenseRef-zlib".to_string(),
                extracted_text: "zlib terms".to_string(),
                ..Default::default()
            });
        });
        let outcome = SpdxExporter::new(&store).export_release(&release_id).unwrap();

        let package = outcome.document.packages().next().unwrap();
        let AnyLicense::Extracted(license) = &package.license_concluded else {
            panic!("expected extracted license");
        };
        assert_eq!(license.extracted_text, "zlib terms");
        assert!(Rc::ptr_eq(license, &outcome.document.extracted_licenses[0]));
    }

    #[test]
    fn test_bad_annotation_is_skipped() {
        let (store, release_id) = seeded(|doc| {
            doc.annotations = vec![
                AnnotationInfo {
                    annotator: "Person: Jane".to_string(),
                    annotation_type: "REVIEW".to_string(),
                    ..Default::default()
                },
                AnnotationInfo {
                    annotator: String::new(),
                    annotation_type: "REVIEW".to_string(),
                    index: 1,
                    ..Default::default()
                },
            ];
        });
        let outcome = SpdxExporter::new(&store).export_release(&release_id).unwrap();

        assert_eq!(outcome.document.annotations.len(), 1);
        assert_eq!(outcome.skipped.count_of(ElementKind::Annotation), 1);
    }

    #[test]
    fn test_incomplete_snippet_aborts() {
        let (store, release_id) = seeded(|doc| {
            doc.snippets.push(SnippetInfo {
                spdx_id: "SPDXRef-Snippet-1".to_string(),
                snippet_from_file: "./inflate.c".to_string(),
                snippet_ranges: vec![SnippetRange {
                    range_type: RangeType::Byte,
                    start_pointer: Some(10),
                    end_pointer: None,
                    ..Default::default()
                }],
                ..Default::default()
            });
        });
        let err = SpdxExporter::new(&store).export_release(&release_id).unwrap_err();
        assert!(err.to_string().contains(&release_id), "{err}");
    }

    #[test]
    fn test_missing_package_info_skips_root_relationship() {
        let (mut store, release_id) = seeded(|_| {});
        let release = store.get_release(&release_id).unwrap().unwrap();
        let document_id = release.spdx_id.unwrap();
        let mut document = store.get_interchange_document(&document_id).unwrap().unwrap();
        document.package_info_ids.clear();
        document.relationships.push(RelationshipInfo {
            spdx_element_id: "SPDXRef-zlib".to_string(),
            relationship_type: "CONTAINS".to_string(),
            related_spdx_element: "SPDXRef-minizip".to_string(),
            index: 1,
            ..Default::default()
        });
        store.add_or_update_document(document).unwrap();

        let outcome = SpdxExporter::new(&store).export_release(&release_id).unwrap();
        assert_eq!(outcome.document.packages().count(), 0);
        // The state machine moved on: the CONTAINS is kept as a reference.
        assert_eq!(outcome.document.relationships.len(), 1);
        assert_eq!(outcome.skipped.count_of(ElementKind::Relationship), 1);
    }

    #[test]
    fn test_document_without_creation_info() {
        let (store, release_id) = seeded(|doc| doc.creation_info_id = None);
        match SpdxExporter::new(&store).export_release(&release_id).unwrap_err() {
            InterchangeError::Configuration(message) => {
                assert!(message.contains("has no creation info"), "{message}");
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_release_without_document() {
        let mut store = InMemoryStore::new();
        let component = store.add_component(Component::new("zlib")).unwrap();
        let mut release = Release::new("zlib", "1.3");
        release.component_id = component.id;
        let release_id = store.add_release(release).unwrap().id;

        let err = SpdxExporter::new(&store).export_release(&release_id).unwrap_err();
        assert!(matches!(err, InterchangeError::Configuration(_)));

        let err = SpdxExporter::new(&store).export_release("release-9999").unwrap_err();
        assert!(matches!(err, InterchangeError::NotFound { kind: "release", .. }));
    }
}
