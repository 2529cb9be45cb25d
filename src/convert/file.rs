//! File builder.
//!
//! Records have no file entity of their own: a file node exists in the graph
//! only as the parent a snippet points into.

use crate::graph::{AnyLicense, SpdxFile, NOASSERTION};

/// SPDX id of the file node for a snippet's source file.
///
/// A source file that already is an SPDX id is used as is; anything else
/// (a path, usually) is turned into `SPDXRef-File-<sanitized>`.
pub fn file_id_for(source_file: &str) -> String {
    if source_file.starts_with("SPDXRef-") {
        return source_file.to_string();
    }
    let sanitized: String = source_file
        .trim_start_matches("./")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("SPDXRef-File-{sanitized}")
}

/// Synthetic file node named after the snippet's source file.
pub fn file_to_graph(source_file: &str) -> SpdxFile {
    SpdxFile {
        id: file_id_for(source_file),
        name: source_file.to_string(),
        checksums: Vec::new(),
        license_concluded: AnyLicense::NoAssertion,
        license_info_in_file: Vec::new(),
        copyright_text: Some(NOASSERTION.to_string()),
        comment: None,
    }
}

/// The source file a snippet record stores for this file: its name, or
/// the id when the file has none.
pub fn file_from_graph(file: &SpdxFile) -> String {
    if file.name.is_empty() {
        file.id.clone()
    } else {
        file.name.clone()
    }
}
