//! Range codec: snippet ranges to and from start/end pointer pairs.

use crate::error::{InterchangeError, MappingErrorKind, Result};
use crate::graph::{SinglePointer, StartEndPointer};
use crate::model::{RangeType, SnippetRange};

/// Build the pointer pair for `range`, anchored to `file_id`.
///
/// Values are not checked; an inverted range is carried as is.
pub fn to_pointer_pair(range: &SnippetRange, file_id: &str) -> Result<StartEndPointer> {
    let start = range
        .start_pointer
        .ok_or_else(|| malformed(range.range_type, "start"))?;
    let end = range
        .end_pointer
        .ok_or_else(|| malformed(range.range_type, "end"))?;

    Ok(StartEndPointer::new(
        pointer(range.range_type, file_id, start),
        pointer(range.range_type, file_id, end),
    ))
}

/// Read `(start, end, kind)` back from a pointer pair.
///
/// The kind is taken from the start pointer; the end pointer must agree.
pub fn from_pointer_pair(pair: &StartEndPointer) -> Result<(i64, i64, RangeType)> {
    let start = pair
        .start
        .as_ref()
        .ok_or_else(|| malformed_pair(pair, "start"))?;
    let end = pair
        .end
        .as_ref()
        .ok_or_else(|| malformed_pair(pair, "end"))?;

    let (start_value, start_kind) = value_of(start)?;
    let (end_value, end_kind) = value_of(end)?;
    if start_kind != end_kind {
        return Err(InterchangeError::mapping(
            format!("reading range in {}", start.reference()),
            MappingErrorKind::InconsistentPointerKinds,
        ));
    }
    Ok((start_value, end_value, start_kind))
}

fn pointer(range_type: RangeType, file_id: &str, value: i64) -> SinglePointer {
    let reference = file_id.to_string();
    match range_type {
        RangeType::Byte => SinglePointer::ByteOffset {
            reference,
            offset: value,
        },
        RangeType::Line => SinglePointer::LineNumber {
            reference,
            line: value,
        },
    }
}

fn value_of(pointer: &SinglePointer) -> Result<(i64, RangeType)> {
    match pointer {
        SinglePointer::ByteOffset { offset, .. } => Ok((*offset, RangeType::Byte)),
        SinglePointer::LineNumber { line, .. } => Ok((*line, RangeType::Line)),
        SinglePointer::Unknown { reference } => Err(InterchangeError::mapping(
            "reading range",
            MappingErrorKind::UnknownPointerKind(reference.clone()),
        )),
    }
}

fn malformed(range_type: RangeType, endpoint: &'static str) -> InterchangeError {
    InterchangeError::mapping(
        "building pointer pair",
        MappingErrorKind::MalformedRange {
            range_type: range_type.to_string(),
            endpoint,
        },
    )
}

fn malformed_pair(pair: &StartEndPointer, endpoint: &'static str) -> InterchangeError {
    // Name the range by whichever pointer is present.
    let range_type = match pair.start.as_ref().or(pair.end.as_ref()) {
        Some(SinglePointer::ByteOffset { .. }) => "BYTE",
        Some(SinglePointer::LineNumber { .. }) => "LINE",
        _ => "UNKNOWN",
    };
    InterchangeError::mapping(
        "reading pointer pair",
        MappingErrorKind::MalformedRange {
            range_type: range_type.to_string(),
            endpoint,
        },
    )
}
