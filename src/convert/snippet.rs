//! Snippet builder.

use crate::error::{ErrorContext, InterchangeError, Result};
use crate::graph::{SpdxSnippet, StartEndPointer};
use crate::model::{RangeType, SnippetInfo, SnippetRange};

use super::range::{from_pointer_pair, to_pointer_pair};
use super::{non_empty, or_empty, BuildContext};

/// Separator of the stored attribution texts.
const ATTRIBUTION_SEPARATOR: &str = "|";

/// Build a snippet node pointing into the file `file_id`.
///
/// A snippet needs a complete byte range; the line range is optional but
/// must be complete when present. Failures are fatal to the export.
pub fn snippet_to_graph(
    info: &SnippetInfo,
    file_id: &str,
    ctx: &mut BuildContext,
) -> Result<SpdxSnippet> {
    let context = || format!("building snippet {}", info.spdx_id);

    let byte_range = info
        .range(RangeType::Byte)
        .ok_or_else(|| InterchangeError::missing_field("byteRange", info.spdx_id.clone()))?;
    let byte_range = to_pointer_pair(byte_range, file_id).with_context(context)?;
    let line_range = info
        .range(RangeType::Line)
        .map(|range| to_pointer_pair(range, file_id))
        .transpose()
        .with_context(context)?;

    Ok(SpdxSnippet {
        id: info.spdx_id.clone(),
        name: non_empty(&info.name),
        snippet_from_file: file_id.to_string(),
        byte_range,
        line_range,
        license_concluded: ctx.interner.license(&info.license_concluded),
        license_info_in_snippet: info
            .license_info_in_snippets
            .iter()
            .map(|license| ctx.interner.license(license))
            .collect(),
        license_comments: non_empty(&info.license_comments),
        copyright_text: non_empty(&info.copyright_text),
        comment: non_empty(&info.comment),
        attribution_text: info
            .snippet_attribution_text
            .split(ATTRIBUTION_SEPARATOR)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Read a snippet back; `source_file` is the reference of its parent file.
pub fn snippet_from_graph(
    snippet: &SpdxSnippet,
    source_file: String,
    index: usize,
) -> Result<SnippetInfo> {
    let context = || format!("reading snippet {}", snippet.id);

    let mut snippet_ranges = vec![range_from_graph(&snippet.byte_range, 0).with_context(context)?];
    if let Some(line_range) = &snippet.line_range {
        snippet_ranges.push(range_from_graph(line_range, 1).with_context(context)?);
    }
    // Pointers into the snippet's own file refer to it the way the record does.
    for range in &mut snippet_ranges {
        if range.reference == snippet.snippet_from_file {
            range.reference.clone_from(&source_file);
        }
    }

    Ok(SnippetInfo {
        spdx_id: snippet.id.clone(),
        snippet_from_file: source_file,
        snippet_ranges,
        license_concluded: snippet.license_concluded.id().to_string(),
        license_info_in_snippets: snippet
            .license_info_in_snippet
            .iter()
            .map(|license| license.id().to_string())
            .collect(),
        license_comments: or_empty(snippet.license_comments.as_ref()),
        copyright_text: or_empty(snippet.copyright_text.as_ref()),
        comment: or_empty(snippet.comment.as_ref()),
        name: or_empty(snippet.name.as_ref()),
        snippet_attribution_text: snippet.attribution_text.join(ATTRIBUTION_SEPARATOR),
        index,
    })
}

fn range_from_graph(pair: &StartEndPointer, index: usize) -> Result<SnippetRange> {
    let (start, end, range_type) = from_pointer_pair(pair)?;
    let reference = pair
        .start
        .as_ref()
        .map(|pointer| pointer.reference().to_string())
        .unwrap_or_default();
    Ok(SnippetRange {
        range_type,
        start_pointer: Some(start),
        end_pointer: Some(end),
        reference,
        index,
    })
}
