//! Graph to records, without touching storage.

use crate::convert::annotation::annotation_from_graph;
use crate::convert::creation::creation_from_graph;
use crate::convert::file::file_from_graph;
use crate::convert::license::extracted_license_from_graph;
use crate::convert::package::package_from_graph;
use crate::convert::relationship::relationship_from_graph;
use crate::convert::snippet::snippet_from_graph;
use crate::error::Result;
use crate::graph::{Element, GraphNode, SpdxDocument, SpdxPackage};
use crate::model::{
    AnnotationInfo, CreationInfo, ExtractedLicenseInfo, PackageInfo, RelationshipInfo,
    SnippetInfo,
};

/// Records of one imported document, ready to be persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedDocument {
    pub creation_info: CreationInfo,
    pub package_info: PackageInfo,
    pub snippets: Vec<SnippetInfo>,
    pub relationships: Vec<RelationshipInfo>,
    pub annotations: Vec<AnnotationInfo>,
    pub other_licenses: Vec<ExtractedLicenseInfo>,
}

/// Flatten `doc` into records, keeping `root` as the package info.
///
/// Other packages become child releases rather than package infos, and
/// files exist in records only as the source of their snippets.
/// Relationships pointing at files are dropped. Every license the
/// document references is kept once, listed ones included.
pub fn flatten(doc: &SpdxDocument, root: &SpdxPackage) -> Result<FlattenedDocument> {
    let mut flattened = FlattenedDocument::default();

    for node in doc.nodes() {
        match node {
            GraphNode::CreationInfo(creation) => {
                flattened.creation_info = creation_from_graph(creation);
            }
            GraphNode::Package(package) => {
                if package.id == root.id {
                    flattened.package_info = package_from_graph(package, 0);
                }
            }
            GraphNode::File(_) => {}
            GraphNode::Snippet(snippet) => {
                let source_file = match doc.element(&snippet.snippet_from_file) {
                    Some(Element::File(file)) => file_from_graph(file),
                    _ => snippet.snippet_from_file.clone(),
                };
                let index = flattened.snippets.len();
                flattened
                    .snippets
                    .push(snippet_from_graph(snippet, source_file, index)?);
            }
            GraphNode::Relationship(relationship) => {
                if let Some(Element::File(_)) = doc.element(&relationship.related) {
                    tracing::debug!(
                        "Not storing relationship {} -> file {}",
                        relationship.source,
                        relationship.related
                    );
                    continue;
                }
                let index = flattened.relationships.len();
                flattened
                    .relationships
                    .push(relationship_from_graph(relationship, index));
            }
            GraphNode::Annotation(annotation) => {
                let index = flattened.annotations.len();
                flattened
                    .annotations
                    .push(annotation_from_graph(annotation, index));
            }
            GraphNode::ExtractedLicense(license) => {
                let index = flattened.other_licenses.len();
                flattened
                    .other_licenses
                    .push(extracted_license_from_graph(license, index));
            }
        }
    }

    Ok(flattened)
}
