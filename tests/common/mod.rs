//! Shared builders for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use sbom_interchange::model::{
    AnnotationInfo, ChecksumRecord, Component, CreationInfo, Creator, ExtractedLicenseInfo,
    PackageInfo, RangeType, RelationshipInfo, Release, SnippetInfo, SnippetRange,
    SpdxDocumentRecord,
};
use sbom_interchange::{InMemoryStore, SpdxStore};

pub const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should exist")
}

pub const SOURCE_FILE: &str = "SPDXRef-File-inflate.c";

pub fn creation_info() -> CreationInfo {
    CreationInfo {
        spdx_id: "SPDXRef-DOCUMENT".to_string(),
        spdx_version: "SPDX-2.3".to_string(),
        name: "zlib-1.3".to_string(),
        data_license: "CC0-1.0".to_string(),
        document_namespace: "https://example.org/spdxdocs/zlib-1.3".to_string(),
        creators: vec![
            Creator::parse("Tool: scanner-2.1", 0).expect("valid creator"),
            Creator::parse("Organization: Example Inc.", 1).expect("valid creator"),
        ],
        created: "2024-01-15T10:00:00Z".to_string(),
        ..Default::default()
    }
}

pub fn package_info() -> PackageInfo {
    PackageInfo {
        spdx_id: "SPDXRef-zlib".to_string(),
        name: "zlib".to_string(),
        version_info: "1.3".to_string(),
        supplier: "Organization: zlib project".to_string(),
        download_location: "https://zlib.net/zlib-1.3.tar.gz".to_string(),
        checksums: vec![ChecksumRecord {
            algorithm: "SHA256".to_string(),
            value: "ff0ba4c292013dbc27530b3a81e1f9a813cd39de01ca5e0f8bf355702efa593e".to_string(),
            index: 0,
        }],
        homepage: "https://zlib.net".to_string(),
        license_concluded: "MIT".to_string(),
        license_declared: "MIT".to_string(),
        license_info_from_files: ["MIT".to_string(), "LicenseRef-zlib-doc".to_string()].into(),
        copyright_text: "Copyright (C) 1995-2023 Jean-loup Gailly and Mark Adler".to_string(),
        summary: "compression library".to_string(),
        description: "A massively spiffy yet delicately unobtrusive compression library."
            .to_string(),
        ..Default::default()
    }
}

pub fn range(range_type: RangeType, start: i64, end: i64, index: usize) -> SnippetRange {
    SnippetRange {
        range_type,
        start_pointer: Some(start),
        end_pointer: Some(end),
        reference: SOURCE_FILE.to_string(),
        index,
    }
}

pub fn snippet() -> SnippetInfo {
    SnippetInfo {
        spdx_id: "SPDXRef-Snippet-inflate".to_string(),
        snippet_from_file: SOURCE_FILE.to_string(),
        snippet_ranges: vec![
            range(RangeType::Byte, 100, 200, 0),
            range(RangeType::Line, 10, 20, 1),
        ],
        license_concluded: "MIT".to_string(),
        license_info_in_snippets: ["MIT".to_string()].into(),
        copyright_text: "Copyright (C) 1995 Mark Adler".to_string(),
        name: "inflate_fast".to_string(),
        snippet_attribution_text: "Mark Adler|zlib authors".to_string(),
        index: 0,
        ..Default::default()
    }
}

pub fn relationship(source: &str, kind: &str, related: &str, index: usize) -> RelationshipInfo {
    RelationshipInfo {
        spdx_element_id: source.to_string(),
        relationship_type: kind.to_string(),
        related_spdx_element: related.to_string(),
        index,
        ..Default::default()
    }
}

pub fn annotation(annotator: &str, index: usize) -> AnnotationInfo {
    AnnotationInfo {
        annotator: annotator.to_string(),
        annotation_date: "2024-01-16T08:30:00Z".to_string(),
        annotation_type: "REVIEW".to_string(),
        annotation_comment: format!("review #{index}"),
        index,
    }
}

pub fn document_record(release_id: &str) -> SpdxDocumentRecord {
    let mut document = SpdxDocumentRecord::for_release(release_id);
    document.snippets = vec![snippet()];
    document.relationships = vec![
        relationship("SPDXRef-DOCUMENT", "DESCRIBES", "SPDXRef-zlib", 0),
        relationship("SPDXRef-zlib", "DEPENDS_ON", "SPDXRef-libc", 1),
    ];
    document.annotations = vec![annotation("Person: Jane Doe", 0)];
    document.other_licenses = vec![ExtractedLicenseInfo {
        license_id: "LicenseRef-zlib-doc".to_string(),
        extracted_text: "Permission is granted to anyone to use this documentation.".to_string(),
        license_name: "zlib documentation license".to_string(),
        ..Default::default()
    }];
    document
}

/// A store holding the zlib 1.3 release with a full SPDX document.
///
/// `edit` adjusts the document record before it is stored.
pub fn seeded_store(edit: impl FnOnce(&mut SpdxDocumentRecord)) -> (InMemoryStore, String) {
    let mut store = InMemoryStore::new();
    let component = store.add_component(Component::new("zlib")).expect("store");
    let mut release = Release::new("zlib", "1.3");
    release.component_id = component.id;
    let release_id = store.add_release(release).expect("store").id;

    let creation = store
        .add_or_update_creation_info(creation_info())
        .expect("store");
    let package = store
        .add_or_update_package_info(package_info())
        .expect("store");

    let mut document = document_record(&release_id);
    document.creation_info_id = Some(creation.id);
    document.package_info_ids = vec![package.id];
    edit(&mut document);
    let document_id = store.add_or_update_document(document).expect("store").id;

    let mut release = store
        .get_release(&release_id)
        .expect("store")
        .expect("release exists");
    release.spdx_id = Some(document_id);
    store.update_release(release).expect("store");
    (store, release_id)
}

/// The stored document record of a release.
pub fn document_of(store: &InMemoryStore, release_id: &str) -> SpdxDocumentRecord {
    let release = store
        .get_release(release_id)
        .expect("store")
        .expect("release exists");
    let document_id = release.spdx_id.expect("release has a document");
    store
        .get_interchange_document(&document_id)
        .expect("store")
        .expect("document exists")
}

/// The first stored package info of a release's document.
pub fn package_of(store: &InMemoryStore, release_id: &str) -> PackageInfo {
    let document = document_of(store, release_id);
    let id = document.package_info_ids.first().expect("package info id");
    store
        .get_package_info(id)
        .expect("store")
        .expect("package info exists")
}
