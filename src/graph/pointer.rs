//! Pointers locating a snippet inside its file.

/// One end of a snippet range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinglePointer {
    /// Byte offset into the referenced file
    ByteOffset { reference: String, offset: i64 },
    /// Line number in the referenced file
    LineNumber { reference: String, line: i64 },
    /// A pointer that carries neither an offset nor a line number, as
    /// produced by codecs for malformed input
    Unknown { reference: String },
}

impl SinglePointer {
    /// Id of the file the pointer refers to.
    pub fn reference(&self) -> &str {
        match self {
            Self::ByteOffset { reference, .. }
            | Self::LineNumber { reference, .. }
            | Self::Unknown { reference } => reference,
        }
    }
}

/// A start/end pointer pair. Either end may be missing in malformed input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartEndPointer {
    pub start: Option<SinglePointer>,
    pub end: Option<SinglePointer>,
}

impl StartEndPointer {
    pub fn new(start: SinglePointer, end: SinglePointer) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}
