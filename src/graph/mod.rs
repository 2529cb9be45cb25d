//! In-memory SPDX interchange graph.
//!
//! An [`SpdxDocument`] owns its elements in an arena keyed by SPDX id.
//! Relationships name their endpoints by id, so the graph never holds
//! references between elements; walking it means looking ids up in the
//! arena. The document is built once per export and consumed once per
//! import.
//!
//! ```
//! use sbom_interchange::graph::{
//!     DocumentCreation, Element, Relationship, RelationshipType, SpdxDocument, SpdxPackage,
//! };
//!
//! let mut doc = SpdxDocument::new(DocumentCreation::default());
//! doc.add_element(Element::Package(SpdxPackage {
//!     id: "SPDXRef-Package".to_string(),
//!     name: "zlib".to_string(),
//!     ..Default::default()
//! }));
//! let root = doc.spdx_id().to_string();
//! doc.relationships
//!     .push(Relationship::new(root, RelationshipType::Describes, "SPDXRef-Package"));
//!
//! assert_eq!(doc.described_packages().len(), 1);
//! ```

mod checksum;
mod element;
mod license;
mod pointer;
mod relationship;
mod verify;

use std::rc::Rc;

use indexmap::IndexMap;

pub use checksum::*;
pub use element::*;
pub use license::*;
pub use pointer::*;
pub use relationship::*;

use crate::error::{InterchangeError, MappingErrorKind, Result};

/// SPDX id every document uses for itself.
pub const DOCUMENT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

/// Document-level metadata, the creation-info node of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCreation {
    pub spdx_id: String,
    pub spec_version: String,
    pub name: String,
    pub namespace: String,
    pub data_license: AnyLicense,
    pub comment: Option<String>,
    pub creators: Vec<String>,
    pub created: String,
    pub creator_comment: Option<String>,
    pub license_list_version: Option<String>,
    pub external_document_refs: Vec<ExternalDocumentRef>,
}

impl Default for DocumentCreation {
    fn default() -> Self {
        Self {
            spdx_id: DOCUMENT_SPDX_ID.to_string(),
            spec_version: String::new(),
            name: String::new(),
            namespace: String::new(),
            data_license: AnyLicense::NoAssertion,
            comment: None,
            creators: Vec::new(),
            created: String::new(),
            creator_comment: None,
            license_list_version: None,
            external_document_refs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDocumentRef {
    /// `DocumentRef-...` identifier
    pub id: String,
    pub namespace: String,
    pub checksum: Checksum,
}

/// One node of the graph, as visited by [`SpdxDocument::nodes`].
///
/// This is the closed set of element kinds the engine understands.
#[derive(Debug, Clone, Copy)]
pub enum GraphNode<'a> {
    CreationInfo(&'a DocumentCreation),
    Package(&'a SpdxPackage),
    File(&'a SpdxFile),
    Snippet(&'a SpdxSnippet),
    Relationship(&'a Relationship),
    Annotation(&'a Annotation),
    ExtractedLicense(&'a Rc<ExtractedLicense>),
}

/// A rooted interchange document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpdxDocument {
    pub creation: DocumentCreation,
    elements: IndexMap<String, Element>,
    pub relationships: Vec<Relationship>,
    pub annotations: Vec<Annotation>,
    pub extracted_licenses: Vec<Rc<ExtractedLicense>>,
}

impl SpdxDocument {
    pub fn new(creation: DocumentCreation) -> Self {
        Self {
            creation,
            ..Self::default()
        }
    }

    pub fn spdx_id(&self) -> &str {
        &self.creation.spdx_id
    }

    /// Add an element to the arena.
    ///
    /// The first element registered under an id wins; returns `false` when
    /// the id was already taken and the element was dropped.
    pub fn add_element(&mut self, element: Element) -> bool {
        if self.elements.contains_key(element.id()) {
            return false;
        }
        self.elements.insert(element.id().to_string(), element);
        true
    }

    /// Add a snippet whose source file is already part of the document.
    ///
    /// A snippet whose id is already taken is an error rather than dropped.
    pub fn attach_snippet(&mut self, snippet: SpdxSnippet) -> Result<()> {
        match self.elements.get(&snippet.snippet_from_file) {
            Some(Element::File(_)) => {}
            _ => {
                return Err(InterchangeError::mapping(
                    format!("attaching snippet {}", snippet.id),
                    MappingErrorKind::InvalidValue {
                        field: "snippetFromFile".to_string(),
                        message: format!(
                            "file {} is not part of the document",
                            snippet.snippet_from_file
                        ),
                    },
                ));
            }
        }
        let id = snippet.id.clone();
        if !self.add_element(Element::Snippet(snippet)) {
            return Err(InterchangeError::mapping(
                format!("attaching snippet {id}"),
                MappingErrorKind::InvalidValue {
                    field: "SPDXID".to_string(),
                    message: format!("{id} is already used by another element"),
                },
            ));
        }
        Ok(())
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn packages(&self) -> impl Iterator<Item = &SpdxPackage> {
        self.elements().filter_map(Element::as_package)
    }

    pub fn files(&self) -> impl Iterator<Item = &SpdxFile> {
        self.elements().filter_map(|element| match element {
            Element::File(file) => Some(file),
            _ => None,
        })
    }

    pub fn snippets(&self) -> impl Iterator<Item = &SpdxSnippet> {
        self.elements().filter_map(|element| match element {
            Element::Snippet(snippet) => Some(snippet),
            _ => None,
        })
    }

    /// Relationships whose source is `source_id`.
    pub fn relationships_of<'a>(
        &'a self,
        source_id: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships
            .iter()
            .filter(move |relationship| relationship.source == source_id)
    }

    /// Ids the document declares it describes.
    pub fn described_ids(&self) -> Vec<&str> {
        self.relationships_of(self.spdx_id())
            .filter(|relationship| relationship.relationship_type == RelationshipType::Describes)
            .map(|relationship| relationship.related.as_str())
            .collect()
    }

    /// Described elements that are packages, without duplicates.
    pub fn described_packages(&self) -> Vec<&SpdxPackage> {
        let mut packages: Vec<&SpdxPackage> = Vec::new();
        for id in self.described_ids() {
            if let Some(package) = self.element(id).and_then(Element::as_package) {
                if !packages.iter().any(|seen| seen.id == package.id) {
                    packages.push(package);
                }
            }
        }
        packages
    }

    /// Walk every node once: creation info, elements, relationships,
    /// document annotations, then extracted licenses.
    pub fn nodes(&self) -> impl Iterator<Item = GraphNode<'_>> {
        let elements = self.elements.values().map(|element| match element {
            Element::Package(package) => GraphNode::Package(package),
            Element::File(file) => GraphNode::File(file),
            Element::Snippet(snippet) => GraphNode::Snippet(snippet),
        });

        std::iter::once(GraphNode::CreationInfo(&self.creation))
            .chain(elements)
            .chain(self.relationships.iter().map(GraphNode::Relationship))
            .chain(self.annotations.iter().map(GraphNode::Annotation))
            .chain(self.extracted_licenses.iter().map(GraphNode::ExtractedLicense))
    }
}
