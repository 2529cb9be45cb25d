//! Moving documents between the graph and the filesystem.
//!
//! [`FormatBridge`] sequences an [`SpdxCodec`]: tag-value is always produced
//! first, then RDF/XML, then the requested target. Intermediates are staged
//! in temporary files that are removed on every exit path, and the final
//! file is written atomically. Without a codec only SPDX JSON is available,
//! through the bundled [`json`] module.

mod codec;
mod format;
pub mod json;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

pub use codec::SpdxCodec;
pub use format::DocumentFormat;

use crate::config::ExportConfig;
use crate::error::{CodecErrorKind, ErrorContext, InterchangeError, Result};
use crate::graph::SpdxDocument;

/// Result of writing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Validation warnings reported by the codec
    pub warnings: Vec<String>,
    /// Intermediate files kept next to the output
    pub intermediates: Vec<PathBuf>,
}

/// Sequences codec calls and manages the files in between.
pub struct FormatBridge<'a> {
    codec: Option<&'a dyn SpdxCodec>,
    temp_dir: Option<PathBuf>,
    keep_intermediate: bool,
}

impl<'a> FormatBridge<'a> {
    pub fn new(codec: Option<&'a dyn SpdxCodec>, config: &ExportConfig) -> Self {
        Self {
            codec,
            temp_dir: config.temp_dir.clone(),
            keep_intermediate: config.keep_intermediate,
        }
    }

    fn codec(&self, format: DocumentFormat) -> Result<&'a dyn SpdxCodec> {
        self.codec.ok_or_else(|| {
            InterchangeError::codec(
                "no text codec available",
                CodecErrorKind::NotConfigured(format.to_string()),
            )
        })
    }

    /// Serialize a graph as tag-value text.
    pub fn graph_to_text(&self, doc: &SpdxDocument) -> Result<Vec<u8>> {
        self.codec(DocumentFormat::TagValue)?
            .graph_to_text(doc)
            .context("writing tag-value")
    }

    /// Convert tag-value text to RDF/XML. Codec warnings are logged and
    /// appended to `warnings`.
    pub fn text_to_rdf(&self, tag_value: &[u8], warnings: &mut Vec<String>) -> Result<Vec<u8>> {
        let before = warnings.len();
        let rdf = self
            .codec(DocumentFormat::Rdf)?
            .text_to_rdf(tag_value, warnings)
            .context("converting tag-value to RDF")?;
        for warning in &warnings[before..] {
            tracing::warn!("SPDX codec warning: {}", warning);
        }
        Ok(rdf)
    }

    /// Convert RDF/XML to `target`.
    pub fn convert(&self, rdf: &[u8], target: DocumentFormat) -> Result<Vec<u8>> {
        if target == DocumentFormat::Rdf {
            return Ok(rdf.to_vec());
        }
        self.codec(target)?
            .convert(rdf, target)
            .with_context(|| format!("converting RDF to {target}"))
    }

    /// Parse serialized content in `format`.
    pub fn read_document(&self, content: &[u8], format: DocumentFormat) -> Result<SpdxDocument> {
        match (self.codec, format) {
            (Some(codec), _) => codec
                .read_document(content, format)
                .with_context(|| format!("reading {format} document")),
            (None, DocumentFormat::Json) => {
                json::from_json_slice(content).context("reading json document")
            }
            (None, _) => Err(InterchangeError::codec(
                "no text codec available",
                CodecErrorKind::NotConfigured(format.to_string()),
            )),
        }
    }

    /// Write `doc` to `path` in `format`.
    ///
    /// On failure nothing is left at `path` and no intermediate survives.
    pub fn write_document(
        &self,
        doc: &SpdxDocument,
        format: DocumentFormat,
        path: &Path,
    ) -> Result<WriteOutcome> {
        let mut outcome = WriteOutcome::default();

        let content = match self.codec {
            None if format == DocumentFormat::Json => json::to_json(doc)?.into_bytes(),
            _ => self.sequence(doc, format, path, &mut outcome)?,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(parent).map_err(|e| InterchangeError::io(parent, e))?;
        staged
            .write_all(&content)
            .map_err(|e| InterchangeError::io(staged.path().to_path_buf(), e))?;
        staged
            .persist(path)
            .map_err(|e| InterchangeError::io(path, e.error))?;

        tracing::info!(
            "Wrote {} document to {} ({} bytes)",
            format,
            path.display(),
            content.len()
        );
        Ok(outcome)
    }

    /// Tag-value, then RDF, then the target.
    fn sequence(
        &self,
        doc: &SpdxDocument,
        format: DocumentFormat,
        path: &Path,
        outcome: &mut WriteOutcome,
    ) -> Result<Vec<u8>> {
        let tag_value = self.graph_to_text(doc)?;
        let tag_value_file = self.stage(&tag_value)?;
        if self.keep_intermediate && format != DocumentFormat::TagValue {
            outcome
                .intermediates
                .push(keep(&tag_value_file, path, DocumentFormat::TagValue)?);
        }
        if format == DocumentFormat::TagValue {
            return Ok(tag_value);
        }

        let staged_tag_value = read_staged(&tag_value_file)?;
        let rdf = self.text_to_rdf(&staged_tag_value, &mut outcome.warnings)?;
        let rdf_file = self.stage(&rdf)?;
        if self.keep_intermediate && format != DocumentFormat::Rdf {
            outcome
                .intermediates
                .push(keep(&rdf_file, path, DocumentFormat::Rdf)?);
        }
        if format == DocumentFormat::Rdf {
            return Ok(rdf);
        }

        self.convert(&read_staged(&rdf_file)?, format)
    }

    fn stage(&self, content: &[u8]) -> Result<NamedTempFile> {
        let mut file = match &self.temp_dir {
            Some(dir) => NamedTempFile::new_in(dir).map_err(|e| InterchangeError::io(dir, e))?,
            None => NamedTempFile::new()?,
        };
        file.write_all(content)
            .map_err(|e| InterchangeError::io(file.path().to_path_buf(), e))?;
        tracing::debug!("Staged {} bytes in {}", content.len(), file.path().display());
        Ok(file)
    }
}

fn read_staged(file: &NamedTempFile) -> Result<Vec<u8>> {
    std::fs::read(file.path()).map_err(|e| InterchangeError::io(file.path().to_path_buf(), e))
}

/// Copy a staged intermediate next to the output, e.g. `out.json.spdx`.
fn keep(file: &NamedTempFile, output: &Path, format: DocumentFormat) -> Result<PathBuf> {
    let mut name = output.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    let target = PathBuf::from(name);
    std::fs::copy(file.path(), &target).map_err(|e| InterchangeError::io(target.as_path(), e))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DocumentCreation;

    fn document() -> SpdxDocument {
        SpdxDocument::new(DocumentCreation {
            name: "zlib".to_string(),
            spec_version: "SPDX-2.3".to_string(),
            ..DocumentCreation::default()
        })
    }

    #[test]
    fn test_json_without_codec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zlib.spdx.json");
        let bridge = FormatBridge::new(None, &ExportConfig::default());

        let outcome = bridge
            .write_document(&document(), DocumentFormat::Json, &path)
            .unwrap();
        assert!(outcome.warnings.is_empty());

        let content = std::fs::read(&path).unwrap();
        let doc = bridge.read_document(&content, DocumentFormat::Json).unwrap();
        assert_eq!(doc.creation.name, "zlib");
    }

    #[test]
    fn test_json_that_is_not_utf8_is_rejected() {
        let bridge = FormatBridge::new(None, &ExportConfig::default());
        let err = bridge
            .read_document(b"{\"name\": \"zl\xffib\"}", DocumentFormat::Json)
            .unwrap_err();
        match err {
            InterchangeError::Codec { context, source } => {
                assert!(context.contains("reading json document"), "{context}");
                assert!(matches!(source, CodecErrorKind::InvalidJson(_)));
            }
            other => panic!("expected codec error, got {other:?}"),
        }
    }

    #[test]
    fn test_text_formats_need_codec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zlib.spdx");
        let bridge = FormatBridge::new(None, &ExportConfig::default());

        let err = bridge
            .write_document(&document(), DocumentFormat::TagValue, &path)
            .unwrap_err();
        assert!(matches!(
            err,
            InterchangeError::Codec {
                source: CodecErrorKind::NotConfigured(_),
                ..
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_intermediate_names() {
        let dir = tempfile::tempdir().unwrap();
        let staged = NamedTempFile::new_in(dir.path()).unwrap();
        let output = dir.path().join("zlib.spdx.json");
        let kept = keep(&staged, &output, DocumentFormat::Rdf).unwrap();
        assert_eq!(kept, dir.path().join("zlib.spdx.json.rdf"));
    }
}
