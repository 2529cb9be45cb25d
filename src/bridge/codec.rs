//! The low-level text codec the bridge delegates to.

use crate::error::Result;
use crate::graph::SpdxDocument;

use super::DocumentFormat;

/// Converts between the interchange graph and serialized SPDX.
///
/// Implementations own the text grammars. Conversions may report
/// validation warnings; those are informational and never turn a
/// successful conversion into a failure.
pub trait SpdxCodec {
    /// Serialize a graph as tag-value text.
    fn graph_to_text(&self, doc: &SpdxDocument) -> Result<Vec<u8>>;

    /// Convert tag-value text to RDF/XML, appending any validation warnings.
    fn text_to_rdf(&self, tag_value: &[u8], warnings: &mut Vec<String>) -> Result<Vec<u8>>;

    /// Convert RDF/XML to another serialized format.
    fn convert(&self, rdf: &[u8], target: DocumentFormat) -> Result<Vec<u8>>;

    /// Parse a serialized document into a graph.
    fn read_document(&self, content: &[u8], format: DocumentFormat) -> Result<SpdxDocument>;
}

impl<C: SpdxCodec + ?Sized> SpdxCodec for &C {
    fn graph_to_text(&self, doc: &SpdxDocument) -> Result<Vec<u8>> {
        (**self).graph_to_text(doc)
    }

    fn text_to_rdf(&self, tag_value: &[u8], warnings: &mut Vec<String>) -> Result<Vec<u8>> {
        (**self).text_to_rdf(tag_value, warnings)
    }

    fn convert(&self, rdf: &[u8], target: DocumentFormat) -> Result<Vec<u8>> {
        (**self).convert(rdf, target)
    }

    fn read_document(&self, content: &[u8], format: DocumentFormat) -> Result<SpdxDocument> {
        (**self).read_document(content, format)
    }
}
