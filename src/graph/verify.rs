//! Structural checks over a finished document.
//!
//! Findings are warnings: export reports them to the caller but never fails
//! because of them.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::DateTime;
use packageurl::PackageUrl;
use regex::Regex;

use super::{
    Element, ReferenceCategory, SinglePointer, SpdxDocument, SpdxPackage, SpdxSnippet,
    StartEndPointer, NOASSERTION, NONE,
};

static SPDX_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SPDXRef-[A-Za-z0-9.\-]+$").expect("static regex"));
static LICENSE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(DocumentRef-[A-Za-z0-9.\-]+:)?LicenseRef-[A-Za-z0-9.\-]+$")
        .expect("static regex")
});

impl SpdxDocument {
    /// Check the document for problems a consumer would reject or
    /// misread. Returns one message per finding, in document order.
    pub fn verify(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        self.verify_creation(&mut warnings);

        for element in self.elements() {
            if !SPDX_REF.is_match(element.id()) {
                warnings.push(format!(
                    "Invalid SPDX identifier for {}: '{}'",
                    element.kind(),
                    element.id()
                ));
            }
            match element {
                Element::Package(package) => verify_package(package, &mut warnings),
                Element::File(file) => {
                    if file.name.is_empty() {
                        warnings.push(format!("File {} has no name", file.id));
                    }
                }
                Element::Snippet(snippet) => self.verify_snippet(snippet, &mut warnings),
            }
        }

        for relationship in &self.relationships {
            if !self.resolves(&relationship.source) {
                warnings.push(format!(
                    "Relationship source {} is not part of the document",
                    relationship.source
                ));
            }
            if !self.resolves(&relationship.related) {
                warnings.push(format!(
                    "Relationship {} {} references unknown element {}",
                    relationship.source, relationship.relationship_type, relationship.related
                ));
            }
        }

        match self.described_packages().len() {
            0 => warnings.push("Document does not describe any package".to_string()),
            1 => {}
            n => warnings.push(format!("Document describes {n} packages")),
        }

        for annotation in &self.annotations {
            if DateTime::parse_from_rfc3339(&annotation.date).is_err() {
                warnings.push(format!(
                    "Annotation by {} has an invalid date '{}'",
                    annotation.annotator, annotation.date
                ));
            }
        }

        for license in &self.extracted_licenses {
            if !license.is_standard() && !LICENSE_REF.is_match(&license.license_id) {
                warnings.push(format!(
                    "Extracted license id '{}' is neither a LicenseRef nor a valid license expression",
                    license.license_id
                ));
            }
            if LICENSE_REF.is_match(&license.license_id) && license.extracted_text.is_empty() {
                warnings.push(format!(
                    "Extracted license {} has no text",
                    license.license_id
                ));
            }
        }

        warnings
    }

    fn verify_creation(&self, warnings: &mut Vec<String>) {
        let creation = &self.creation;
        if creation.name.is_empty() {
            warnings.push("Document name is missing".to_string());
        }
        if creation.namespace.is_empty() {
            warnings.push("Document namespace is missing".to_string());
        }
        if !creation.spec_version.starts_with("SPDX-") {
            warnings.push(format!(
                "Unexpected SPDX version '{}'",
                creation.spec_version
            ));
        }
        if creation.creators.is_empty() {
            warnings.push("Document has no creators".to_string());
        }
        if DateTime::parse_from_rfc3339(&creation.created).is_err() {
            warnings.push(format!(
                "Document creation date '{}' is not an RFC 3339 timestamp",
                creation.created
            ));
        }
    }

    fn verify_snippet(&self, snippet: &SpdxSnippet, warnings: &mut Vec<String>) {
        if !matches!(
            self.element(&snippet.snippet_from_file),
            Some(Element::File(_))
        ) {
            warnings.push(format!(
                "Snippet {} references missing file {}",
                snippet.id, snippet.snippet_from_file
            ));
        }
        check_range(&snippet.id, "byte", &snippet.byte_range, warnings);
        if let Some(line_range) = &snippet.line_range {
            check_range(&snippet.id, "line", line_range, warnings);
        }
    }

    fn resolves(&self, id: &str) -> bool {
        id == self.spdx_id()
            || id == NOASSERTION
            || id == NONE
            || id.starts_with("DocumentRef-")
            || self.element(id).is_some()
    }
}

fn verify_package(package: &SpdxPackage, warnings: &mut Vec<String>) {
    if package.name.is_empty() {
        warnings.push(format!("Package {} has no name", package.id));
    }
    if package.download_location.is_empty() {
        warnings.push(format!("Package {} has no download location", package.id));
    }
    for external_ref in &package.external_refs {
        if external_ref.category == ReferenceCategory::PackageManager
            && external_ref.reference_type == "purl"
        {
            if let Err(err) = PackageUrl::from_str(&external_ref.locator) {
                warnings.push(format!(
                    "Package {} has an invalid purl '{}': {err}",
                    package.id, external_ref.locator
                ));
            }
        }
    }
    for date in [
        &package.release_date,
        &package.built_date,
        &package.valid_until_date,
    ]
    .into_iter()
    .flatten()
    {
        if DateTime::parse_from_rfc3339(date).is_err() {
            warnings.push(format!("Package {} has an invalid date '{date}'", package.id));
        }
    }
}

fn check_range(id: &str, unit: &str, range: &StartEndPointer, warnings: &mut Vec<String>) {
    let value = |pointer: &Option<SinglePointer>| match pointer {
        Some(SinglePointer::ByteOffset { offset, .. }) => Some(*offset),
        Some(SinglePointer::LineNumber { line, .. }) => Some(*line),
        _ => None,
    };
    match (value(&range.start), value(&range.end)) {
        (Some(start), Some(end)) => {
            if start < 0 || end < 0 {
                warnings.push(format!("Snippet {id} has a negative {unit} range"));
            } else if start > end {
                warnings.push(format!(
                    "Snippet {id} has an inverted {unit} range {start}..{end}"
                ));
            }
        }
        _ => warnings.push(format!("Snippet {id} has an incomplete {unit} range")),
    }
}
