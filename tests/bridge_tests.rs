//! Format bridge sequencing with a recording codec.

mod common;

use std::cell::RefCell;
use std::path::Path;

use common::seeded_store;
use sbom_interchange::bridge::json;
use sbom_interchange::error::{CodecErrorKind, InterchangeError, Result};
use sbom_interchange::{
    AppConfig, DocumentFormat, ImportOptions, InterchangeService, RequestStatus, SpdxCodec,
    SpdxDocument,
};
use tempfile::TempDir;

/// Codec that records its calls and tags every output with the step name.
#[derive(Default)]
struct RecordingCodec {
    calls: RefCell<Vec<String>>,
    fail_convert: bool,
}

impl RecordingCodec {
    fn failing() -> Self {
        Self {
            fail_convert: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SpdxCodec for RecordingCodec {
    fn graph_to_text(&self, doc: &SpdxDocument) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push("graph_to_text".to_string());
        Ok(format!("SPDXVersion: SPDX-2.3\nDocumentName: {}\n", doc.creation.name).into_bytes())
    }

    fn text_to_rdf(&self, tag_value: &[u8], warnings: &mut Vec<String>) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push("text_to_rdf".to_string());
        warnings.push("LicenseListVersion is missing".to_string());
        let mut rdf = b"<rdf:RDF>".to_vec();
        rdf.extend_from_slice(tag_value);
        Ok(rdf)
    }

    fn convert(&self, rdf: &[u8], target: DocumentFormat) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push(format!("convert:{target}"));
        if self.fail_convert {
            return Err(InterchangeError::codec(
                "converting",
                CodecErrorKind::Failed("serializer crashed".to_string()),
            ));
        }
        let mut out = format!("# {target}\n").into_bytes();
        out.extend_from_slice(rdf);
        Ok(out)
    }

    fn read_document(&self, content: &[u8], format: DocumentFormat) -> Result<SpdxDocument> {
        self.calls.borrow_mut().push(format!("read_document:{format}"));
        json::from_json_slice(content)
    }
}

fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn yaml_export_runs_every_step_in_order() {
    let (mut store, release_id) = seeded_store(|_| {});
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let path = out.path().join("zlib.spdx.yaml");
    let codec = RecordingCodec::default();
    let config = AppConfig::builder().temp_dir(temp.path()).build();

    let summary = InterchangeService::new(&mut store, config)
        .with_codec(&codec)
        .export_as_text(&release_id, DocumentFormat::Yaml, &path);

    assert_eq!(summary.status, RequestStatus::Success, "{}", summary.message);
    assert_eq!(codec.calls(), ["graph_to_text", "text_to_rdf", "convert:yaml"]);
    assert!(summary.message.contains("LicenseListVersion is missing"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# yaml\n<rdf:RDF>SPDXVersion"));
    assert_eq!(entries(temp.path()), 0, "intermediates must not survive");
}

#[test]
fn tag_value_export_stops_after_first_step() {
    let (mut store, release_id) = seeded_store(|_| {});
    let out = TempDir::new().unwrap();
    let path = out.path().join("zlib.spdx");
    let codec = RecordingCodec::default();

    let summary = InterchangeService::new(&mut store, AppConfig::default())
        .with_codec(&codec)
        .export_as_text(&release_id, DocumentFormat::TagValue, &path);

    assert!(summary.is_success());
    assert_eq!(codec.calls(), ["graph_to_text"]);
}

#[test]
fn rdf_export_skips_conversion() {
    let (mut store, release_id) = seeded_store(|_| {});
    let out = TempDir::new().unwrap();
    let path = out.path().join("zlib.rdf");
    let codec = RecordingCodec::default();

    let summary = InterchangeService::new(&mut store, AppConfig::default())
        .with_codec(&codec)
        .export_as_text(&release_id, DocumentFormat::Rdf, &path);

    assert!(summary.is_success());
    assert_eq!(codec.calls(), ["graph_to_text", "text_to_rdf"]);
}

#[test]
fn failed_conversion_leaves_nothing_behind() {
    let (mut store, release_id) = seeded_store(|_| {});
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let path = out.path().join("zlib.spdx.xml");
    let codec = RecordingCodec::failing();
    let config = AppConfig::builder().temp_dir(temp.path()).build();

    let summary = InterchangeService::new(&mut store, config)
        .with_codec(&codec)
        .export_as_text(&release_id, DocumentFormat::Xml, &path);

    assert_eq!(summary.status, RequestStatus::Failure);
    assert!(summary.message.contains("converting RDF to xml"), "{}", summary.message);
    assert_eq!(entries(temp.path()), 0);
    assert_eq!(entries(out.path()), 0);
}

#[test]
fn kept_intermediates_sit_next_to_the_output() {
    let (mut store, release_id) = seeded_store(|_| {});
    let out = TempDir::new().unwrap();
    let path = out.path().join("zlib.json");
    let codec = RecordingCodec::default();
    let config = AppConfig::builder().keep_intermediate(true).build();

    let summary = InterchangeService::new(&mut store, config)
        .with_codec(&codec)
        .export_as_text(&release_id, DocumentFormat::Json, &path);

    assert!(summary.is_success());
    assert!(out.path().join("zlib.json.spdx").exists());
    assert!(out.path().join("zlib.json.rdf").exists());
    assert_eq!(entries(out.path()), 3);
}

#[test]
fn import_reads_through_the_codec() {
    let mut store = sbom_interchange::InMemoryStore::new();
    let codec = RecordingCodec::default();
    let content = common::fixture("spdx/zlib.spdx.json");
    let options = ImportOptions {
        format: Some(DocumentFormat::TagValue),
        ..ImportOptions::default()
    };

    let summary = InterchangeService::new(&mut store, AppConfig::default())
        .with_codec(&codec)
        .import_as_release(content.as_bytes(), &options);

    assert!(summary.is_success(), "{}", summary.message);
    assert_eq!(codec.calls(), ["read_document:tag-value"]);
}
