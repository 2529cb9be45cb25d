//! Creation-info record: document-level metadata of an interchange document.

use serde::{Deserialize, Serialize};

/// Document-level metadata stored apart from the document record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationInfo {
    /// Storage id, `None` until first persisted
    pub id: Option<String>,
    /// Id of the owning document record
    pub spdx_document_id: String,
    /// SPDX identifier of the document, usually `SPDXRef-DOCUMENT`
    pub spdx_id: String,
    pub name: String,
    pub spdx_version: String,
    pub data_license: String,
    pub document_namespace: String,
    pub external_document_refs: Vec<ExternalDocumentRef>,
    pub license_list_version: String,
    pub creators: Vec<Creator>,
    pub created: String,
    pub creator_comment: String,
    pub document_comment: String,
}

/// One document creator, e.g. `Tool: scanner-1.2`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Creator {
    /// `Person`, `Organization` or `Tool`
    pub creator_type: String,
    pub value: String,
    pub index: usize,
}

impl Creator {
    /// Parse a `"Type: Value"` creator string.
    ///
    /// Returns `None` when the string has no colon or nothing follows it.
    /// The value keeps any further colons, so `"Tool: scanner:1.2"` has the
    /// value `scanner:1.2`.
    pub fn parse(raw: &str, index: usize) -> Option<Self> {
        let (creator_type, value) = raw.split_once(':')?;
        if value.is_empty() {
            return None;
        }
        Some(Self {
            creator_type: creator_type.trim().to_string(),
            value: value.trim().to_string(),
            index,
        })
    }

    /// Render as the single creator string used by the interchange graph.
    pub fn to_spdx_string(&self) -> String {
        format!("{}: {}", self.creator_type, self.value)
    }
}

/// Reference to another interchange document, pinned by checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalDocumentRef {
    /// `DocumentRef-...` identifier
    pub external_document_id: String,
    /// Namespace URI of the referenced document
    pub spdx_document: String,
    pub checksum: ChecksumRecord,
    pub index: usize,
}

/// Checksum as stored internally: algorithm by internal name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumRecord {
    /// Internal algorithm name such as `SHA1` or `SHA3_256`
    pub algorithm: String,
    pub value: String,
    pub index: usize,
}
