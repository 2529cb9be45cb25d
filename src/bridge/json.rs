//! SPDX 2.x JSON reader and writer.
//!
//! Used for [`DocumentFormat::Json`](super::DocumentFormat::Json) when no
//! external codec is configured. Only the parts of the format the graph
//! models are read; unknown keys are ignored.

use serde::{Deserialize, Serialize};

use crate::convert::LicenseInterner;
use crate::error::{InterchangeError, MappingErrorKind, Result};
use crate::graph::{
    Annotation, AnyLicense, Checksum, ChecksumAlgorithm, DocumentCreation, Element,
    ExternalDocumentRef, ExternalRef, PackageVerificationCode, Relationship,
    RelationshipType, SinglePointer, SpdxDocument, SpdxFile, SpdxPackage, SpdxSnippet,
    StartEndPointer, NOASSERTION,
};

// SPDX JSON structures

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonDocument {
    spdx_version: String,
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: String,
    data_license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    document_namespace: String,
    creation_info: JsonCreationInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    external_document_refs: Vec<JsonExternalDocRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    document_describes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    packages: Vec<JsonPackage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<JsonFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    snippets: Vec<JsonSnippet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<JsonRelationship>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<JsonAnnotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    has_extracted_licensing_infos: Vec<JsonExtractedLicense>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonCreationInfo {
    created: String,
    creators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_list_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonChecksum {
    algorithm: String,
    checksum_value: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonExternalDocRef {
    external_document_id: String,
    spdx_document: String,
    checksum: JsonChecksum,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonPackage {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    originator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files_analyzed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package_verification_code: Option<JsonVerificationCode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    checksums: Vec<JsonChecksum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_concluded: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    license_info_from_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_declared: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    external_refs: Vec<JsonExternalRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attribution_texts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<JsonAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_package_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    built_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_until_date: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonVerificationCode {
    package_verification_code_value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    package_verification_code_excluded_files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonExternalRef {
    reference_category: String,
    reference_type: String,
    reference_locator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonFile {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    file_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    checksums: Vec<JsonChecksum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_concluded: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    license_info_in_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonSnippet {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    snippet_from_file: String,
    ranges: Vec<JsonRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_concluded: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    license_info_in_snippets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attribution_texts: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_pointer: Option<JsonPointer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_pointer: Option<JsonPointer>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonPointer {
    reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_number: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonRelationship {
    spdx_element_id: String,
    relationship_type: String,
    related_spdx_element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonAnnotation {
    annotator: String,
    annotation_date: String,
    annotation_type: String,
    comment: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsonExtractedLicense {
    license_id: String,
    extracted_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    see_alsos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

// ============================================================================
// Writing
// ============================================================================

/// Serialize a document as pretty-printed SPDX JSON.
///
/// Extracted licenses whose id is a standard SPDX expression are left out of
/// `hasExtractedLicensingInfos`; license fields still name them.
pub fn to_json(doc: &SpdxDocument) -> Result<String> {
    let creation = &doc.creation;
    let wire = JsonDocument {
        spdx_version: creation.spec_version.clone(),
        spdx_id: creation.spdx_id.clone(),
        name: creation.name.clone(),
        data_license: creation.data_license.id().to_string(),
        comment: creation.comment.clone(),
        document_namespace: creation.namespace.clone(),
        creation_info: JsonCreationInfo {
            created: creation.created.clone(),
            creators: creation.creators.clone(),
            license_list_version: creation.license_list_version.clone(),
            comment: creation.creator_comment.clone(),
        },
        external_document_refs: creation
            .external_document_refs
            .iter()
            .map(|reference| JsonExternalDocRef {
                external_document_id: reference.id.clone(),
                spdx_document: reference.namespace.clone(),
                checksum: checksum_to_json(&reference.checksum),
            })
            .collect(),
        document_describes: Vec::new(),
        packages: doc.packages().map(package_to_json).collect(),
        files: doc.files().map(file_to_json).collect(),
        snippets: doc.snippets().map(snippet_to_json).collect(),
        relationships: doc
            .relationships
            .iter()
            .map(|relationship| JsonRelationship {
                spdx_element_id: relationship.source.clone(),
                relationship_type: relationship.relationship_type.to_string(),
                related_spdx_element: relationship.related.clone(),
                comment: relationship.comment.clone(),
            })
            .collect(),
        annotations: doc.annotations.iter().map(annotation_to_json).collect(),
        has_extracted_licensing_infos: doc
            .extracted_licenses
            .iter()
            .filter(|license| !license.is_standard())
            .map(|license| JsonExtractedLicense {
                license_id: license.license_id.clone(),
                extracted_text: license.extracted_text.clone(),
                name: license.name.clone(),
                see_alsos: license.cross_refs.clone(),
                comment: license.comment.clone(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&wire)?)
}

fn checksum_to_json(checksum: &Checksum) -> JsonChecksum {
    JsonChecksum {
        algorithm: checksum.algorithm.json_name().to_string(),
        checksum_value: checksum.value.clone(),
    }
}

fn license_ids(licenses: &[AnyLicense]) -> Vec<String> {
    licenses.iter().map(|license| license.id().to_string()).collect()
}

fn annotation_to_json(annotation: &Annotation) -> JsonAnnotation {
    JsonAnnotation {
        annotator: annotation.annotator.clone(),
        annotation_date: annotation.date.clone(),
        annotation_type: annotation.annotation_type.as_str().to_string(),
        comment: annotation.comment.clone(),
    }
}

fn package_to_json(package: &SpdxPackage) -> JsonPackage {
    JsonPackage {
        spdx_id: package.id.clone(),
        name: package.name.clone(),
        version_info: package.version_info.clone(),
        package_file_name: package.package_file_name.clone(),
        supplier: package.supplier.clone(),
        originator: package.originator.clone(),
        download_location: Some(package.download_location.clone()),
        files_analyzed: Some(package.files_analyzed),
        package_verification_code: package.verification_code.as_ref().map(|code| {
            JsonVerificationCode {
                package_verification_code_value: code.value.clone(),
                package_verification_code_excluded_files: code.excluded_files.clone(),
            }
        }),
        checksums: package.checksums.iter().map(checksum_to_json).collect(),
        homepage: package.homepage.clone(),
        source_info: package.source_info.clone(),
        license_concluded: Some(package.license_concluded.id().to_string()),
        license_info_from_files: license_ids(&package.license_info_from_files),
        license_declared: Some(package.license_declared.id().to_string()),
        license_comments: package.license_comments.clone(),
        copyright_text: package.copyright_text.clone(),
        summary: package.summary.clone(),
        description: package.description.clone(),
        comment: package.comment.clone(),
        external_refs: package
            .external_refs
            .iter()
            .map(|reference| JsonExternalRef {
                reference_category: reference.category.as_str().to_string(),
                reference_type: reference.reference_type.clone(),
                reference_locator: reference.locator.clone(),
                comment: reference.comment.clone(),
            })
            .collect(),
        attribution_texts: package.attribution_text.clone(),
        annotations: package.annotations.iter().map(annotation_to_json).collect(),
        primary_package_purpose: package.primary_package_purpose.clone(),
        release_date: package.release_date.clone(),
        built_date: package.built_date.clone(),
        valid_until_date: package.valid_until_date.clone(),
    }
}

fn file_to_json(file: &SpdxFile) -> JsonFile {
    JsonFile {
        spdx_id: file.id.clone(),
        file_name: file.name.clone(),
        checksums: file.checksums.iter().map(checksum_to_json).collect(),
        license_concluded: Some(file.license_concluded.id().to_string()),
        license_info_in_files: license_ids(&file.license_info_in_file),
        copyright_text: file.copyright_text.clone(),
        comment: file.comment.clone(),
    }
}

fn pointer_to_json(pointer: &SinglePointer) -> JsonPointer {
    match pointer {
        SinglePointer::ByteOffset { reference, offset } => JsonPointer {
            reference: reference.clone(),
            offset: Some(*offset),
            line_number: None,
        },
        SinglePointer::LineNumber { reference, line } => JsonPointer {
            reference: reference.clone(),
            offset: None,
            line_number: Some(*line),
        },
        SinglePointer::Unknown { reference } => JsonPointer {
            reference: reference.clone(),
            ..JsonPointer::default()
        },
    }
}

fn range_to_json(range: &StartEndPointer) -> JsonRange {
    JsonRange {
        start_pointer: range.start.as_ref().map(pointer_to_json),
        end_pointer: range.end.as_ref().map(pointer_to_json),
    }
}

fn snippet_to_json(snippet: &SpdxSnippet) -> JsonSnippet {
    let mut ranges = vec![range_to_json(&snippet.byte_range)];
    ranges.extend(snippet.line_range.as_ref().map(range_to_json));

    JsonSnippet {
        spdx_id: snippet.id.clone(),
        name: snippet.name.clone(),
        snippet_from_file: snippet.snippet_from_file.clone(),
        ranges,
        license_concluded: Some(snippet.license_concluded.id().to_string()),
        license_info_in_snippets: license_ids(&snippet.license_info_in_snippet),
        license_comments: snippet.license_comments.clone(),
        copyright_text: snippet.copyright_text.clone(),
        comment: snippet.comment.clone(),
        attribution_texts: snippet.attribution_text.clone(),
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Parse an SPDX JSON document into the graph.
///
/// License strings are resolved through one interner, so every license id
/// maps to a single shared instance; `documentDescribes` entries become
/// DESCRIBES relationships.
pub fn from_json(content: &str) -> Result<SpdxDocument> {
    from_json_slice(content.as_bytes())
}

/// [`from_json`] over raw bytes; content that is not UTF-8 is a codec error.
pub fn from_json_slice(content: &[u8]) -> Result<SpdxDocument> {
    let wire: JsonDocument = serde_json::from_slice(content)?;
    let mut interner = LicenseInterner::new();

    // Text-bearing licenses first, so they become the canonical instances.
    for license in wire.has_extracted_licensing_infos {
        interner.intern(crate::graph::ExtractedLicense {
            license_id: license.license_id,
            extracted_text: license.extracted_text,
            name: license.name,
            cross_refs: license.see_alsos,
            comment: license.comment,
        });
    }

    let data_license = match spdx::license_id(&wire.data_license) {
        Some(license) => AnyLicense::Listed(license.name.to_string()),
        None => interner.license(&wire.data_license),
    };

    let creation = DocumentCreation {
        spdx_id: wire.spdx_id,
        spec_version: wire.spdx_version,
        name: wire.name,
        namespace: wire.document_namespace,
        data_license,
        comment: wire.comment,
        creators: wire.creation_info.creators,
        created: wire.creation_info.created,
        creator_comment: wire.creation_info.comment,
        license_list_version: wire.creation_info.license_list_version,
        external_document_refs: wire
            .external_document_refs
            .into_iter()
            .map(|reference| {
                Ok(ExternalDocumentRef {
                    id: reference.external_document_id,
                    namespace: reference.spdx_document,
                    checksum: checksum_from_json(reference.checksum)?,
                })
            })
            .collect::<Result<_>>()?,
    };
    let mut doc = SpdxDocument::new(creation);

    for package in wire.packages {
        let package = package_from_json(package, &mut interner)?;
        if !doc.add_element(Element::Package(package)) {
            tracing::debug!("Ignoring duplicate SPDX id in packages");
        }
    }
    for file in wire.files {
        let file = file_from_json(file, &mut interner)?;
        if !doc.add_element(Element::File(file)) {
            tracing::debug!("Ignoring duplicate SPDX id in files");
        }
    }
    for snippet in wire.snippets {
        doc.attach_snippet(snippet_from_json(snippet, &mut interner))?;
    }

    let root = doc.spdx_id().to_string();
    for described in wire.document_describes {
        let already_related = doc.relationships.iter().any(|relationship| {
            relationship.relationship_type == RelationshipType::Describes
                && relationship.related == described
        });
        if !already_related {
            doc.relationships
                .push(Relationship::new(&root, RelationshipType::Describes, described));
        }
    }
    for relationship in wire.relationships {
        let already_described = relationship.spdx_element_id == root
            && RelationshipType::from(relationship.relationship_type.as_str())
                == RelationshipType::Describes
            && doc.described_ids().contains(&relationship.related_spdx_element.as_str());
        if already_described {
            continue;
        }
        doc.relationships.push(Relationship {
            source: relationship.spdx_element_id,
            relationship_type: RelationshipType::from(relationship.relationship_type.as_str()),
            related: relationship.related_spdx_element,
            comment: relationship.comment,
        });
    }
    doc.annotations = annotations_from_json(wire.annotations, &doc.creation.spdx_id);
    doc.extracted_licenses = interner.into_licenses();

    Ok(doc)
}

fn checksum_from_json(checksum: JsonChecksum) -> Result<Checksum> {
    let algorithm = ChecksumAlgorithm::from_json_name(&checksum.algorithm).ok_or_else(|| {
        InterchangeError::mapping(
            "reading SPDX JSON checksum",
            MappingErrorKind::UnknownChecksumAlgorithm(checksum.algorithm.clone()),
        )
    })?;
    Ok(Checksum::new(algorithm, checksum.checksum_value))
}

fn license_from_json(value: Option<&str>, interner: &mut LicenseInterner) -> AnyLicense {
    interner.license(value.unwrap_or(NOASSERTION))
}

fn licenses_from_json(values: &[String], interner: &mut LicenseInterner) -> Vec<AnyLicense> {
    values.iter().map(|value| interner.license(value)).collect()
}

/// Annotations are best-effort: one with an unknown type is left out.
fn annotations_from_json(annotations: Vec<JsonAnnotation>, owner: &str) -> Vec<Annotation> {
    annotations
        .into_iter()
        .filter_map(|annotation| match annotation.annotation_type.parse() {
            Ok(annotation_type) => Some(Annotation {
                annotator: annotation.annotator,
                annotation_type,
                date: annotation.annotation_date,
                comment: annotation.comment,
            }),
            Err(message) => {
                tracing::warn!("Skipping annotation on {owner}: {message}");
                None
            }
        })
        .collect()
}

fn package_from_json(package: JsonPackage, interner: &mut LicenseInterner) -> Result<SpdxPackage> {
    let external_refs = package
        .external_refs
        .into_iter()
        .filter_map(|reference| match reference.reference_category.parse() {
            Ok(category) => Some(ExternalRef {
                category,
                reference_type: reference.reference_type,
                locator: reference.reference_locator,
                comment: reference.comment,
            }),
            Err(message) => {
                tracing::warn!("Skipping external ref of {}: {message}", package.spdx_id);
                None
            }
        })
        .collect();
    let annotations = annotations_from_json(package.annotations, &package.spdx_id);

    Ok(SpdxPackage {
        license_concluded: license_from_json(package.license_concluded.as_deref(), interner),
        license_info_from_files: licenses_from_json(&package.license_info_from_files, interner),
        license_declared: license_from_json(package.license_declared.as_deref(), interner),
        checksums: package
            .checksums
            .into_iter()
            .map(checksum_from_json)
            .collect::<Result<_>>()?,
        annotations,
        id: package.spdx_id,
        name: package.name,
        version_info: package.version_info,
        package_file_name: package.package_file_name,
        supplier: package.supplier,
        originator: package.originator,
        download_location: package
            .download_location
            .unwrap_or_else(|| NOASSERTION.to_string()),
        files_analyzed: package.files_analyzed.unwrap_or(true),
        verification_code: package
            .package_verification_code
            .map(|code| PackageVerificationCode {
                value: code.package_verification_code_value,
                excluded_files: code.package_verification_code_excluded_files,
            }),
        homepage: package.homepage,
        source_info: package.source_info,
        license_comments: package.license_comments,
        copyright_text: package.copyright_text,
        summary: package.summary,
        description: package.description,
        comment: package.comment,
        external_refs,
        attribution_text: package.attribution_texts,
        primary_package_purpose: package.primary_package_purpose,
        release_date: package.release_date,
        built_date: package.built_date,
        valid_until_date: package.valid_until_date,
    })
}

fn file_from_json(file: JsonFile, interner: &mut LicenseInterner) -> Result<SpdxFile> {
    Ok(SpdxFile {
        license_concluded: license_from_json(file.license_concluded.as_deref(), interner),
        license_info_in_file: licenses_from_json(&file.license_info_in_files, interner),
        checksums: file
            .checksums
            .into_iter()
            .map(checksum_from_json)
            .collect::<Result<_>>()?,
        id: file.spdx_id,
        name: file.file_name,
        copyright_text: file.copyright_text,
        comment: file.comment,
    })
}

fn pointer_from_json(pointer: JsonPointer) -> SinglePointer {
    match (pointer.offset, pointer.line_number) {
        (Some(offset), _) => SinglePointer::ByteOffset {
            reference: pointer.reference,
            offset,
        },
        (None, Some(line)) => SinglePointer::LineNumber {
            reference: pointer.reference,
            line,
        },
        (None, None) => SinglePointer::Unknown {
            reference: pointer.reference,
        },
    }
}

fn snippet_from_json(snippet: JsonSnippet, interner: &mut LicenseInterner) -> SpdxSnippet {
    let mut byte_range = None;
    let mut line_range = None;
    for range in snippet.ranges {
        let pointer = StartEndPointer {
            start: range.start_pointer.map(pointer_from_json),
            end: range.end_pointer.map(pointer_from_json),
        };
        // A range is classified by its start pointer; anything that is not
        // a line range lands in the byte slot so conversion reports it.
        if matches!(pointer.start, Some(SinglePointer::LineNumber { .. })) && line_range.is_none()
        {
            line_range = Some(pointer);
        } else if byte_range.is_none() {
            byte_range = Some(pointer);
        }
    }

    SpdxSnippet {
        license_concluded: license_from_json(snippet.license_concluded.as_deref(), interner),
        license_info_in_snippet: licenses_from_json(&snippet.license_info_in_snippets, interner),
        id: snippet.spdx_id,
        name: snippet.name,
        snippet_from_file: snippet.snippet_from_file,
        byte_range: byte_range.unwrap_or_default(),
        line_range,
        license_comments: snippet.license_comments,
        copyright_text: snippet.copyright_text,
        comment: snippet.comment,
        attribution_text: snippet.attribution_texts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    const MINIMAL: &str = r#"{
        "spdxVersion": "SPDX-2.3",
        "SPDXID": "SPDXRef-DOCUMENT",
        "name": "zlib-1.3",
        "dataLicense": "CC0-1.0",
        "documentNamespace": "https://example.org/spdx/zlib-1.3",
        "creationInfo": {
            "created": "2024-01-15T10:00:00Z",
            "creators": ["Tool: sbom-interchange"]
        },
        "documentDescribes": ["SPDXRef-zlib"],
        "packages": [{
            "SPDXID": "SPDXRef-zlib",
            "name": "zlib",
            "versionInfo": "1.3",
            "licenseConcluded": "Zlib",
            "licenseDeclared": "LicenseRef-zlib-custom",
            "checksums": [{"algorithm": "SHA256", "checksumValue": "abc"}]
        }],
        "files": [{"SPDXID": "SPDXRef-File-inflate", "fileName": "./inflate.c"}],
        "snippets": [{
            "SPDXID": "SPDXRef-Snippet-1",
            "snippetFromFile": "SPDXRef-File-inflate",
            "ranges": [
                {"startPointer": {"reference": "SPDXRef-File-inflate", "lineNumber": 10},
                 "endPointer": {"reference": "SPDXRef-File-inflate", "lineNumber": 20}},
                {"startPointer": {"reference": "SPDXRef-File-inflate", "offset": 100},
                 "endPointer": {"reference": "SPDXRef-File-inflate", "offset": 200}}
            ],
            "licenseConcluded": "Zlib"
        }],
        "hasExtractedLicensingInfos": [{
            "licenseId": "LicenseRef-zlib-custom",
            "extractedText": "Custom zlib terms"
        }]
    }"#;

    #[test]
    fn test_read_minimal_document() {
        let doc = from_json(MINIMAL).unwrap();

        assert_eq!(doc.creation.name, "zlib-1.3");
        assert_eq!(doc.creation.data_license, AnyLicense::Listed("CC0-1.0".to_string()));
        assert_eq!(doc.described_ids(), vec!["SPDXRef-zlib"]);

        let package = doc.described_packages()[0];
        assert_eq!(package.download_location, NOASSERTION);
        assert_eq!(package.checksums[0].algorithm, ChecksumAlgorithm::Sha256);
        let declared = package.license_declared.as_extracted().unwrap();
        assert_eq!(declared.extracted_text, "Custom zlib terms");

        let snippet = doc.snippets().next().unwrap();
        assert!(matches!(
            snippet.byte_range.start,
            Some(SinglePointer::ByteOffset { offset: 100, .. })
        ));
        assert!(matches!(
            snippet.line_range.as_ref().and_then(|r| r.end.as_ref()),
            Some(SinglePointer::LineNumber { line: 20, .. })
        ));
    }

    #[test]
    fn test_license_ids_share_one_instance() {
        let doc = from_json(MINIMAL).unwrap();
        let package = doc.packages().next().unwrap();
        let snippet = doc.snippets().next().unwrap();

        let from_package = package.license_concluded.as_extracted().unwrap();
        let from_snippet = snippet.license_concluded.as_extracted().unwrap();
        assert!(Rc::ptr_eq(from_package, from_snippet));
        assert_eq!(doc.extracted_licenses.len(), 2);
    }

    #[test]
    fn test_write_omits_standard_licenses() {
        let doc = from_json(MINIMAL).unwrap();
        let json = to_json(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let extracted = value["hasExtractedLicensingInfos"].as_array().unwrap();
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0]["licenseId"], "LicenseRef-zlib-custom");
        assert_eq!(value["packages"][0]["licenseConcluded"], "Zlib");
        assert_eq!(value["relationships"][0]["relationshipType"], "DESCRIBES");
    }

    #[test]
    fn test_rewrite_is_stable() {
        let first = to_json(&from_json(MINIMAL).unwrap()).unwrap();
        let second = to_json(&from_json(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_checksum_algorithm_is_rejected() {
        let content = MINIMAL.replace("\"SHA256\"", "\"CRC32\"");
        match from_json(&content) {
            Err(InterchangeError::Mapping {
                source: MappingErrorKind::UnknownChecksumAlgorithm(name),
                ..
            }) => assert_eq!(name, "CRC32"),
            other => panic!("expected unknown algorithm, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_annotation_and_ref_are_left_out() {
        let content = MINIMAL.replace(
            "\"versionInfo\": \"1.3\",",
            r#""versionInfo": "1.3",
            "externalRefs": [
                {"referenceCategory": "PACKAGE-MANAGER", "referenceType": "purl",
                 "referenceLocator": "pkg:generic/zlib@1.3"},
                {"referenceCategory": "TELEPATHY", "referenceType": "x",
                 "referenceLocator": "y"}
            ],
            "annotations": [
                {"annotator": "Person: Jane", "annotationDate": "2024-01-16T08:30:00Z",
                 "annotationType": "BOGUS", "comment": "?"}
            ],"#,
        );
        let content = content.replace(
            "\"documentDescribes\"",
            r#""annotations": [
                {"annotator": "Person: Jane", "annotationDate": "2024-01-16T08:30:00Z",
                 "annotationType": "REVIEW", "comment": "ok"},
                {"annotator": "Tool: lint", "annotationDate": "2024-01-16T08:30:00Z",
                 "annotationType": "BOGUS", "comment": "?"},
                {"annotator": "Person: Joe", "annotationDate": "2024-01-17T08:30:00Z",
                 "annotationType": "OTHER", "comment": "ok"}
            ],
            "documentDescribes""#,
        );
        let doc = from_json(&content).unwrap();

        let annotators: Vec<&str> = doc.annotations.iter().map(|a| a.annotator.as_str()).collect();
        assert_eq!(annotators, ["Person: Jane", "Person: Joe"]);
        let package = doc.packages().next().unwrap();
        assert_eq!(package.external_refs.len(), 1);
        assert_eq!(package.external_refs[0].reference_type, "purl");
        assert!(package.annotations.is_empty());
    }

    #[test]
    fn test_invalid_json_is_codec_error() {
        let err = from_json("{ not json").unwrap_err();
        assert!(matches!(err, InterchangeError::Codec { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_codec_error() {
        let mut content = MINIMAL.as_bytes().to_vec();
        let at = MINIMAL.find("zlib-1.3").unwrap();
        content[at] = 0xff;
        let err = from_json_slice(&content).unwrap_err();
        assert!(matches!(err, InterchangeError::Codec { .. }), "{err}");
    }
}
