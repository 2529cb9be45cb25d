//! Package builder.

use crate::error::{ErrorContext, Result};
use crate::graph::{ExternalRef, PackageVerificationCode, ReferenceCategory, SpdxPackage};
use crate::model::{in_index_order, ExternalReference, PackageInfo, VerificationCode};

use super::annotation::{annotation_from_graph, annotation_to_graph};
use super::checksum::{checksum_from_graph, checksum_to_graph};
use super::{non_empty, or_empty, BuildContext, ElementKind};

/// Build a fully populated package node.
///
/// Checksum failures are fatal; external references and annotations that
/// cannot be mapped are skipped and recorded in `ctx.skipped`.
pub fn package_to_graph(info: &PackageInfo, ctx: &mut BuildContext) -> Result<SpdxPackage> {
    let mut checksums = Vec::with_capacity(info.checksums.len());
    for record in in_index_order(&info.checksums) {
        checksums.push(
            checksum_to_graph(record)
                .with_context(|| format!("building package {}", info.spdx_id))?,
        );
    }

    let mut external_refs = Vec::with_capacity(info.external_refs.len());
    for reference in in_index_order(&info.external_refs) {
        match reference.reference_category.parse::<ReferenceCategory>() {
            Ok(category) => external_refs.push(ExternalRef {
                category,
                reference_type: reference.reference_type.clone(),
                locator: reference.reference_locator.clone(),
                comment: non_empty(&reference.comment),
            }),
            Err(reason) => ctx.skipped.record(
                ElementKind::Package,
                format!("{} external ref #{}", info.spdx_id, reference.index),
                reason,
            ),
        }
    }

    let mut annotations = Vec::with_capacity(info.annotations.len());
    for annotation in in_index_order(&info.annotations) {
        match annotation_to_graph(annotation) {
            Ok(node) => annotations.push(node),
            Err(err) => ctx.skipped.record(
                ElementKind::Annotation,
                format!("{} annotation #{}", info.spdx_id, annotation.index),
                err,
            ),
        }
    }

    let verification_code = (!info.verification_code.is_empty()).then(|| PackageVerificationCode {
        value: info.verification_code.value.clone(),
        excluded_files: info.verification_code.excluded_files.iter().cloned().collect(),
    });

    Ok(SpdxPackage {
        id: info.spdx_id.clone(),
        name: info.name.clone(),
        version_info: non_empty(&info.version_info),
        package_file_name: non_empty(&info.package_file_name),
        supplier: non_empty(&info.supplier),
        originator: non_empty(&info.originator),
        download_location: info.download_location.clone(),
        files_analyzed: info.files_analyzed,
        verification_code,
        checksums,
        homepage: non_empty(&info.homepage),
        source_info: non_empty(&info.source_info),
        license_concluded: ctx.interner.license(&info.license_concluded),
        license_info_from_files: info
            .license_info_from_files
            .iter()
            .map(|license| ctx.interner.license(license))
            .collect(),
        license_declared: ctx.interner.license(&info.license_declared),
        license_comments: non_empty(&info.license_comments),
        copyright_text: non_empty(&info.copyright_text),
        summary: non_empty(&info.summary),
        description: non_empty(&info.description),
        comment: non_empty(&info.package_comment),
        external_refs,
        attribution_text: info.attribution_text.iter().cloned().collect(),
        annotations,
        primary_package_purpose: non_empty(&info.primary_package_purpose),
        release_date: non_empty(&info.release_date),
        built_date: non_empty(&info.built_date),
        valid_until_date: non_empty(&info.valid_until_date),
    })
}

pub fn package_from_graph(package: &SpdxPackage, index: usize) -> PackageInfo {
    let verification_code = package
        .verification_code
        .as_ref()
        .map(|code| VerificationCode {
            value: code.value.clone(),
            excluded_files: code.excluded_files.iter().cloned().collect(),
        })
        .unwrap_or_default();

    PackageInfo {
        id: None,
        spdx_document_id: String::new(),
        spdx_id: package.id.clone(),
        name: package.name.clone(),
        version_info: or_empty(package.version_info.as_ref()),
        package_file_name: or_empty(package.package_file_name.as_ref()),
        supplier: or_empty(package.supplier.as_ref()),
        originator: or_empty(package.originator.as_ref()),
        download_location: package.download_location.clone(),
        files_analyzed: package.files_analyzed,
        verification_code,
        checksums: package
            .checksums
            .iter()
            .enumerate()
            .map(|(index, checksum)| checksum_from_graph(checksum, index))
            .collect(),
        homepage: or_empty(package.homepage.as_ref()),
        source_info: or_empty(package.source_info.as_ref()),
        license_concluded: package.license_concluded.id().to_string(),
        license_info_from_files: package
            .license_info_from_files
            .iter()
            .map(|license| license.id().to_string())
            .collect(),
        license_declared: package.license_declared.id().to_string(),
        license_comments: or_empty(package.license_comments.as_ref()),
        copyright_text: or_empty(package.copyright_text.as_ref()),
        summary: or_empty(package.summary.as_ref()),
        description: or_empty(package.description.as_ref()),
        package_comment: or_empty(package.comment.as_ref()),
        external_refs: package
            .external_refs
            .iter()
            .enumerate()
            .map(|(index, reference)| ExternalReference {
                reference_category: reference.category.record_name().to_string(),
                reference_locator: reference.locator.clone(),
                reference_type: reference.reference_type.clone(),
                comment: or_empty(reference.comment.as_ref()),
                index,
            })
            .collect(),
        attribution_text: package.attribution_text.iter().cloned().collect(),
        annotations: package
            .annotations
            .iter()
            .enumerate()
            .map(|(index, annotation)| annotation_from_graph(annotation, index))
            .collect(),
        primary_package_purpose: or_empty(package.primary_package_purpose.as_ref()),
        release_date: or_empty(package.release_date.as_ref()),
        built_date: or_empty(package.built_date.as_ref()),
        valid_until_date: or_empty(package.valid_until_date.as_ref()),
        index,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::graph::{AnyLicense, ChecksumAlgorithm};
    use crate::model::{AnnotationInfo, ChecksumRecord};

    fn info() -> PackageInfo {
        PackageInfo {
            spdx_id: "SPDXRef-Package-zlib".to_string(),
            name: "zlib".to_string(),
            version_info: "1.3".to_string(),
            download_location: "https://zlib.net/zlib-1.3.tar.gz".to_string(),
            files_analyzed: true,
            verification_code: VerificationCode {
                value: "d6a770ba38583ed4bb4525bd96e50461655d2758".to_string(),
                excluded_files: ["./package.spdx".to_string()].into(),
            },
            checksums: vec![ChecksumRecord {
                algorithm: "SHA256".to_string(),
                value: "ff0ba4c292013dbc27530b3a81e1f9a813cd39de01ca5e0f8bf355702efa593e"
                    .to_string(),
                index: 0,
            }],
            license_concluded: "Zlib".to_string(),
            license_declared: "Zlib".to_string(),
            license_info_from_files: ["Zlib".to_string(), "LicenseRef-zlib-doc".to_string()]
                .into(),
            copyright_text: "Copyright (C) 1995-2023 Jean-loup Gailly and Mark Adler".to_string(),
            external_refs: vec![ExternalReference {
                reference_category: "PACKAGE_MANAGER".to_string(),
                reference_locator: "pkg:generic/zlib@1.3".to_string(),
                reference_type: "purl".to_string(),
                comment: String::new(),
                index: 0,
            }],
            attribution_text: ["zlib authors".to_string()].into(),
            annotations: vec![AnnotationInfo {
                annotator: "Tool: reviewer".to_string(),
                annotation_date: "2024-03-01T10:00:00Z".to_string(),
                annotation_type: "REVIEW".to_string(),
                annotation_comment: "ok".to_string(),
                index: 0,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_is_field_equal() {
        let mut ctx = BuildContext::new();
        let original = info();
        let node = package_to_graph(&original, &mut ctx).unwrap();

        assert_eq!(node.checksums[0].algorithm, ChecksumAlgorithm::Sha256);
        assert_eq!(node.supplier, None);
        assert!(ctx.skipped.is_empty());

        assert_eq!(package_from_graph(&node, 0), original);
    }

    #[test]
    fn test_concluded_and_declared_share_license() {
        let mut ctx = BuildContext::new();
        let node = package_to_graph(&info(), &mut ctx).unwrap();
        match (&node.license_concluded, &node.license_declared) {
            (AnyLicense::Extracted(a), AnyLicense::Extracted(b)) => assert!(Rc::ptr_eq(a, b)),
            other => panic!("unexpected licenses {other:?}"),
        }
        assert_eq!(ctx.interner.len(), 2);
    }

    #[test]
    fn test_best_effort_parts_are_skipped() {
        let mut info = info();
        info.external_refs[0].reference_category = "VCS".to_string();
        info.annotations.push(AnnotationInfo {
            annotation_type: "REVIEW".to_string(),
            index: 1,
            ..Default::default()
        });

        let mut ctx = BuildContext::new();
        let node = package_to_graph(&info, &mut ctx).unwrap();
        assert!(node.external_refs.is_empty());
        assert_eq!(node.annotations.len(), 1);
        assert_eq!(ctx.skipped.count_of(ElementKind::Package), 1);
        assert_eq!(ctx.skipped.count_of(ElementKind::Annotation), 1);
    }

    #[test]
    fn test_unknown_checksum_is_fatal() {
        let mut info = info();
        info.checksums[0].algorithm = "CRC32".to_string();
        assert!(package_to_graph(&info, &mut BuildContext::new()).is_err());
    }
}
