//! Snippet record and its ranges.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit of a snippet range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RangeType {
    #[default]
    Byte,
    Line,
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => write!(f, "BYTE"),
            Self::Line => write!(f, "LINE"),
        }
    }
}

/// Start/end pair of a snippet inside its source file.
///
/// Endpoints are optional so that incomplete records can be stored; the
/// range codec rejects them when building pointers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetRange {
    pub range_type: RangeType,
    pub start_pointer: Option<i64>,
    pub end_pointer: Option<i64>,
    /// Id of the file the pointers refer to
    pub reference: String,
    pub index: usize,
}

/// A snippet taken from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetInfo {
    pub spdx_id: String,
    /// SPDX id of the file the snippet is taken from
    pub snippet_from_file: String,
    pub snippet_ranges: Vec<SnippetRange>,
    pub license_concluded: String,
    pub license_info_in_snippets: BTreeSet<String>,
    pub license_comments: String,
    pub copyright_text: String,
    pub comment: String,
    pub name: String,
    /// Attribution texts joined with `|`
    pub snippet_attribution_text: String,
    pub index: usize,
}

impl SnippetInfo {
    /// The range of the given type, if present.
    pub fn range(&self, range_type: RangeType) -> Option<&SnippetRange> {
        self.snippet_ranges
            .iter()
            .find(|range| range.range_type == range_type)
    }
}
