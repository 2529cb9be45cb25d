//! Creation-info builder.

use crate::error::{ErrorContext, InterchangeError, MappingErrorKind, Result};
use crate::graph::{AnyLicense, DocumentCreation, ExternalDocumentRef, DOCUMENT_SPDX_ID};
use crate::model::{in_index_order, CreationInfo, Creator};

use super::checksum::{checksum_from_graph, checksum_to_graph};
use super::{non_empty, or_empty};

/// Build the document-level node. Every failure here is fatal to the export.
pub fn creation_to_graph(info: &CreationInfo) -> Result<DocumentCreation> {
    let data_license = data_license(&info.data_license)?;

    let mut external_document_refs = Vec::with_capacity(info.external_document_refs.len());
    for reference in in_index_order(&info.external_document_refs) {
        let checksum = checksum_to_graph(&reference.checksum).with_context(|| {
            format!(
                "external document reference {}",
                reference.external_document_id
            )
        })?;
        external_document_refs.push(ExternalDocumentRef {
            id: reference.external_document_id.clone(),
            namespace: reference.spdx_document.clone(),
            checksum,
        });
    }

    let spdx_id = if info.spdx_id.is_empty() {
        DOCUMENT_SPDX_ID.to_string()
    } else {
        info.spdx_id.clone()
    };

    Ok(DocumentCreation {
        spdx_id,
        spec_version: info.spdx_version.clone(),
        name: info.name.clone(),
        namespace: info.document_namespace.clone(),
        data_license,
        comment: non_empty(&info.document_comment),
        creators: in_index_order(&info.creators)
            .into_iter()
            .map(Creator::to_spdx_string)
            .collect(),
        created: info.created.clone(),
        creator_comment: non_empty(&info.creator_comment),
        license_list_version: non_empty(&info.license_list_version),
        external_document_refs,
    })
}

/// Read the document-level node back into a record.
///
/// Creator strings without a `Type:` prefix are dropped with a warning.
pub fn creation_from_graph(creation: &DocumentCreation) -> CreationInfo {
    let mut creators = Vec::with_capacity(creation.creators.len());
    for raw in &creation.creators {
        match Creator::parse(raw, creators.len()) {
            Some(creator) => creators.push(creator),
            None => tracing::warn!("Dropping malformed creator '{raw}'"),
        }
    }

    CreationInfo {
        id: None,
        spdx_document_id: String::new(),
        spdx_id: creation.spdx_id.clone(),
        name: creation.name.clone(),
        spdx_version: creation.spec_version.clone(),
        data_license: creation.data_license.id().to_string(),
        document_namespace: creation.namespace.clone(),
        external_document_refs: creation
            .external_document_refs
            .iter()
            .enumerate()
            .map(|(index, reference)| crate::model::ExternalDocumentRef {
                external_document_id: reference.id.clone(),
                spdx_document: reference.namespace.clone(),
                checksum: checksum_from_graph(&reference.checksum, 0),
                index,
            })
            .collect(),
        license_list_version: or_empty(creation.license_list_version.as_ref()),
        creators,
        created: creation.created.clone(),
        creator_comment: or_empty(creation.creator_comment.as_ref()),
        document_comment: or_empty(creation.comment.as_ref()),
    }
}

/// The data license must be on the SPDX license list.
fn data_license(id: &str) -> Result<AnyLicense> {
    let id = id.trim();
    match spdx::license_id(id) {
        Some(license) => Ok(AnyLicense::Listed(license.name.to_string())),
        None => Err(InterchangeError::mapping(
            "resolving data license",
            MappingErrorKind::UnlistedLicense(id.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChecksumRecord;

    fn info() -> CreationInfo {
        CreationInfo {
            spdx_id: "SPDXRef-DOCUMENT".to_string(),
            name: "zlib-1.3".to_string(),
            spdx_version: "SPDX-2.3".to_string(),
            data_license: "CC0-1.0".to_string(),
            document_namespace: "https://example.org/zlib-1.3".to_string(),
            external_document_refs: vec![crate::model::ExternalDocumentRef {
                external_document_id: "DocumentRef-libc".to_string(),
                spdx_document: "https://example.org/libc".to_string(),
                checksum: ChecksumRecord {
                    algorithm: "SHA1".to_string(),
                    value: "d6a770ba38583ed4bb4525bd96e50461655d2759".to_string(),
                    index: 0,
                },
                index: 0,
            }],
            creators: vec![
                Creator {
                    creator_type: "Organization".to_string(),
                    value: "Acme".to_string(),
                    index: 1,
                },
                Creator {
                    creator_type: "Tool".to_string(),
                    value: "scanner-2.0".to_string(),
                    index: 0,
                },
            ],
            created: "2024-03-01T10:00:00Z".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let original = info();
        let node = creation_to_graph(&original).unwrap();
        assert_eq!(
            node.creators,
            vec!["Tool: scanner-2.0".to_string(), "Organization: Acme".to_string()]
        );
        assert_eq!(node.data_license, AnyLicense::Listed("CC0-1.0".to_string()));
        assert_eq!(node.comment, None);

        let back = creation_from_graph(&node);
        assert_eq!(back.name, original.name);
        assert_eq!(back.data_license, "CC0-1.0");
        assert_eq!(back.external_document_refs, original.external_document_refs);
        assert_eq!(back.creators[0].value, "scanner-2.0");
        assert_eq!(back.creators[1].creator_type, "Organization");
        assert_eq!(back.document_comment, "");
    }

    #[test]
    fn test_unlisted_data_license_is_fatal() {
        let mut info = info();
        info.data_license = "LicenseRef-mine".to_string();
        assert!(matches!(
            creation_to_graph(&info),
            Err(InterchangeError::Mapping {
                source: MappingErrorKind::UnlistedLicense(_),
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_external_checksum_is_fatal() {
        let mut info = info();
        info.external_document_refs[0].checksum.algorithm = "CRC32".to_string();
        let err = creation_to_graph(&info).unwrap_err();
        assert!(err.to_string().contains("DocumentRef-libc"), "{err}");
    }

    #[test]
    fn test_malformed_creators_are_dropped() {
        let node = DocumentCreation {
            creators: vec![
                "Person: Jane".to_string(),
                "nobody".to_string(),
                "Tool: x:1".to_string(),
            ],
            ..Default::default()
        };
        let info = creation_from_graph(&node);
        assert_eq!(info.creators.len(), 2);
        assert_eq!(info.creators[1].value, "x:1");
        assert_eq!(info.creators[1].index, 1);
        assert_eq!(info.data_license, "NOASSERTION");
    }
}
