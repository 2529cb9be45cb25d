//! The interchange service.

use std::io::Read;
use std::path::Path;

use crate::bridge::{DocumentFormat, FormatBridge, SpdxCodec};
use crate::config::AppConfig;
use crate::error::{CodecErrorKind, InterchangeError, Result};
use crate::export::{ExportOutcome, SpdxExporter};
use crate::graph::SpdxDocument;
use crate::import::{select_root, ImportKind, ImportOptions, SpdxImporter};
use crate::store::SpdxStore;

use super::{ImportPreparation, RequestStatus, RequestSummary, WARNING_SEPARATOR};

/// Export and import requests against one store.
pub struct InterchangeService<'a, S: SpdxStore + ?Sized> {
    store: &'a mut S,
    codec: Option<&'a dyn SpdxCodec>,
    config: AppConfig,
}

impl<'a, S: SpdxStore + ?Sized> InterchangeService<'a, S> {
    pub fn new(store: &'a mut S, config: AppConfig) -> Self {
        Self {
            store,
            codec: None,
            config,
        }
    }

    /// Use `codec` for tag-value, RDF and the formats converted from RDF.
    #[must_use]
    pub fn with_codec(mut self, codec: &'a dyn SpdxCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn bridge(&self) -> FormatBridge<'a> {
        FormatBridge::new(self.codec, &self.config.export)
    }

    /// Write the document of a release to `path`.
    ///
    /// On success the message carries the verification warnings, joined
    /// with `|||`.
    pub fn export_as_text(
        &mut self,
        release_id: &str,
        format: DocumentFormat,
        path: &Path,
    ) -> RequestSummary {
        let outcome = SpdxExporter::new(&*self.store).export_release(release_id);
        self.finish_export(outcome, format, path)
    }

    /// Write the document of a project to `path`.
    pub fn export_project_as_text(
        &mut self,
        project_id: &str,
        format: DocumentFormat,
        path: &Path,
    ) -> RequestSummary {
        let outcome =
            SpdxExporter::new(&*self.store).export_project(project_id, &self.config.export);
        self.finish_export(outcome, format, path)
    }

    fn finish_export(
        &self,
        outcome: Result<ExportOutcome>,
        format: DocumentFormat,
        path: &Path,
    ) -> RequestSummary {
        let ExportOutcome { document, skipped } = match outcome {
            Ok(outcome) => outcome,
            Err(err) => return failure("Export", &err),
        };

        let mut warnings = if self.config.export.verify {
            document.verify()
        } else {
            Vec::new()
        };
        match self.bridge().write_document(&document, format, path) {
            Ok(written) => warnings.extend(written.warnings),
            Err(err) => return failure("Export", &err),
        }

        let written = document.nodes().count();
        RequestSummary::success(
            written + skipped.len(),
            written,
            warnings.join(WARNING_SEPARATOR),
        )
    }

    /// Read a document and report what an import would create.
    pub fn prepare_import(
        &self,
        reader: impl Read,
        format: Option<DocumentFormat>,
    ) -> ImportPreparation {
        let prepared = self.read(reader, format).and_then(|doc| {
            let root = select_root(&doc)?;
            Ok(ImportPreparation {
                status: RequestStatus::Success,
                name: root.name.clone(),
                version: root.version_info.clone().unwrap_or_default(),
                package_names: doc.packages().map(|package| package.name.clone()).collect(),
                message: String::new(),
            })
        });
        prepared.unwrap_or_else(|err| {
            tracing::error!("Import preparation failed: {}", err);
            ImportPreparation {
                message: err.to_string(),
                ..ImportPreparation::default()
            }
        })
    }

    /// Import a document as a release; the message is the release id.
    pub fn import_as_release(&mut self, reader: impl Read, options: &ImportOptions) -> RequestSummary {
        self.import(reader, ImportKind::Release, options)
    }

    /// Import a document as a project; the message is the project id.
    pub fn import_as_project(&mut self, reader: impl Read, options: &ImportOptions) -> RequestSummary {
        self.import(reader, ImportKind::Project, options)
    }

    fn import(&mut self, reader: impl Read, kind: ImportKind, options: &ImportOptions) -> RequestSummary {
        let doc = match self.read(reader, options.format) {
            Ok(doc) => doc,
            Err(err) => return failure("Import", &err),
        };
        let config = self.config.import.clone();
        match SpdxImporter::new(&mut *self.store, config).import(&doc, kind, options) {
            Ok(outcome) => RequestSummary::success(
                outcome.response.count(),
                outcome.response.count_affected(),
                outcome.response.id,
            ),
            Err(err) => failure("Import", &err),
        }
    }

    fn read(&self, mut reader: impl Read, format: Option<DocumentFormat>) -> Result<SpdxDocument> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        let format = format
            .or_else(|| DocumentFormat::detect(&content))
            .ok_or_else(|| {
                InterchangeError::codec("reading document", CodecErrorKind::UnknownFormat)
            })?;
        tracing::debug!("Reading {} bytes as {}", content.len(), format);
        self.bridge().read_document(&content, format)
    }
}

fn failure(operation: &str, err: &InterchangeError) -> RequestSummary {
    tracing::error!("{} failed: {}", operation, err);
    RequestSummary::failure(err.to_string())
}
