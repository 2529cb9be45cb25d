//! Benchmarks for export, JSON serialization and import flattening.
//!
//! Run with: cargo bench --bench round_trip

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sbom_interchange::bridge::json::{from_json, to_json};
use sbom_interchange::import::{flatten, select_root};
use sbom_interchange::model::{
    Component, CreationInfo, Creator, ExtractedLicenseInfo, PackageInfo, RangeType,
    RelationshipInfo, Release, SnippetInfo, SnippetRange, SpdxDocumentRecord,
};
use sbom_interchange::{InMemoryStore, SpdxExporter, SpdxStore};
use std::hint::black_box;

fn range(range_type: RangeType, start: i64, end: i64, index: usize) -> SnippetRange {
    SnippetRange {
        range_type,
        start_pointer: Some(start),
        end_pointer: Some(end),
        index,
        ..Default::default()
    }
}

/// A store with one release whose document has `count` snippets,
/// relationships and licenses.
fn generate_store(count: usize) -> (InMemoryStore, String) {
    let mut store = InMemoryStore::new();
    let component = store.add_component(Component::new("bench")).unwrap();
    let mut release = Release::new("bench", "1.0");
    release.component_id = component.id;
    let release_id = store.add_release(release).unwrap().id;

    let creation = store
        .add_or_update_creation_info(CreationInfo {
            spdx_id: "SPDXRef-DOCUMENT".to_string(),
            spdx_version: "SPDX-2.3".to_string(),
            name: "bench-1.0".to_string(),
            data_license: "CC0-1.0".to_string(),
            document_namespace: "https://example.org/spdxdocs/bench".to_string(),
            creators: vec![Creator::parse("Tool: bench", 0).unwrap()],
            created: "2024-01-15T10:00:00Z".to_string(),
            ..Default::default()
        })
        .unwrap();
    let package = store
        .add_or_update_package_info(PackageInfo {
            spdx_id: "SPDXRef-bench".to_string(),
            name: "bench".to_string(),
            version_info: "1.0".to_string(),
            download_location: "NOASSERTION".to_string(),
            license_concluded: "MIT".to_string(),
            license_info_from_files: (0..count).map(|i| format!("LicenseRef-{i}")).collect(),
            ..Default::default()
        })
        .unwrap();

    let mut document = SpdxDocumentRecord::for_release(&release_id);
    document.creation_info_id = Some(creation.id);
    document.package_info_ids = vec![package.id];
    document.relationships.push(RelationshipInfo {
        spdx_element_id: "SPDXRef-DOCUMENT".to_string(),
        relationship_type: "DESCRIBES".to_string(),
        related_spdx_element: "SPDXRef-bench".to_string(),
        ..Default::default()
    });
    for i in 0..count {
        let start = i64::try_from(i).unwrap() * 100;
        document.snippets.push(SnippetInfo {
            spdx_id: format!("SPDXRef-Snippet-{i}"),
            snippet_from_file: format!("./src/file{}.c", i % 16),
            snippet_ranges: vec![
                range(RangeType::Byte, start, start + 99, 0),
                range(RangeType::Line, start / 40, start / 40 + 3, 1),
            ],
            license_concluded: format!("LicenseRef-{i}"),
            index: i,
            ..Default::default()
        });
        document.relationships.push(RelationshipInfo {
            spdx_element_id: "SPDXRef-bench".to_string(),
            relationship_type: "DEPENDS_ON".to_string(),
            related_spdx_element: format!("SPDXRef-dep-{i}"),
            index: i + 1,
            ..Default::default()
        });
        document.other_licenses.push(ExtractedLicenseInfo {
            license_id: format!("LicenseRef-{i}"),
            extracted_text: format!("License text number {i}"),
            index: i,
            ..Default::default()
        });
    }
    let document_id = store.add_or_update_document(document).unwrap().id;

    let mut release = store.get_release(&release_id).unwrap().unwrap();
    release.spdx_id = Some(document_id);
    store.update_release(release).unwrap();
    (store, release_id)
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_release");
    for size in [10, 100, 1000] {
        let (store, release_id) = generate_store(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                SpdxExporter::new(&store)
                    .export_release(black_box(&release_id))
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");
    for size in [10, 100, 1000] {
        let (store, release_id) = generate_store(size);
        let doc = SpdxExporter::new(&store)
            .export_release(&release_id)
            .unwrap()
            .document;
        let json = to_json(&doc).unwrap();

        group.bench_with_input(BenchmarkId::new("write", size), &doc, |b, doc| {
            b.iter(|| to_json(black_box(doc)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("read", size), &json, |b, json| {
            b.iter(|| from_json(black_box(json)).unwrap());
        });
    }
    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");
    for size in [10, 100, 1000] {
        let (store, release_id) = generate_store(size);
        let doc = SpdxExporter::new(&store)
            .export_release(&release_id)
            .unwrap()
            .document;
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| {
                let root = select_root(doc).unwrap();
                flatten(black_box(doc), root).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_export, bench_json, bench_flatten);
criterion_main!(benches);
