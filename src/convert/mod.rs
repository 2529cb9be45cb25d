//! Element builders between internal records and graph elements.
//!
//! Each element kind has a `*_to_graph` / `*_from_graph` pair. Builders are
//! stateless apart from the [`BuildContext`] they are handed, which owns the
//! license interner and the log of elements skipped on a best-effort path.
//! A context lives for exactly one export or import call.
//!
//! Conventions shared by all builders:
//!
//! - optional graph strings (`Option<String>`) become `""` in records, and
//!   `""` in records becomes `None` in the graph;
//! - license fields go through [`LicenseInterner`];
//! - checksum algorithms go through the table in [`checksum`];
//! - `*_from_graph` builders take the element's position as its `index`.

pub mod annotation;
pub mod checksum;
pub mod creation;
pub mod file;
mod interner;
pub mod license;
pub mod package;
pub mod range;
pub mod relationship;
pub mod snippet;

use std::fmt;

pub use interner::LicenseInterner;

/// The seven element kinds the builders cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    CreationInfo,
    Package,
    File,
    Snippet,
    Relationship,
    Annotation,
    ExtractedLicense,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreationInfo => "creation info",
            Self::Package => "package",
            Self::File => "file",
            Self::Snippet => "snippet",
            Self::Relationship => "relationship",
            Self::Annotation => "annotation",
            Self::ExtractedLicense => "extracted license",
        };
        f.write_str(name)
    }
}

/// An element left out of the output on a best-effort path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedElement {
    pub kind: ElementKind,
    /// Best available identification of the element
    pub id: String,
    pub reason: String,
}

/// Accumulated log of skipped elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkippedElements {
    entries: Vec<SkippedElement>,
}

impl SkippedElements {
    /// Record a skipped element and log it.
    pub fn record(&mut self, kind: ElementKind, id: impl Into<String>, reason: impl fmt::Display) {
        let id = id.into();
        let reason = reason.to_string();
        tracing::warn!("Skipping {kind} {id}: {reason}");
        self.entries.push(SkippedElement { kind, id, reason });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkippedElement> {
        self.entries.iter()
    }

    /// Number of skipped elements of one kind.
    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }
}

/// Per-operation state shared by the builders.
#[derive(Debug, Default)]
pub struct BuildContext {
    pub interner: LicenseInterner,
    pub skipped: SkippedElements,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `""` becomes `None`.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// `None` becomes `""`.
pub(crate) fn or_empty(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_defaults() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("x"), Some("x".to_string()));
        assert_eq!(or_empty(None), "");
        assert_eq!(or_empty(Some(&"y".to_string())), "y");
    }

    #[test]
    fn test_skipped_elements_counts_by_kind() {
        let mut skipped = SkippedElements::default();
        skipped.record(ElementKind::Annotation, "#1", "missing annotator");
        skipped.record(ElementKind::Relationship, "A -> B", "package info missing");
        skipped.record(ElementKind::Annotation, "#4", "unknown type");

        assert_eq!(skipped.len(), 3);
        assert_eq!(skipped.count_of(ElementKind::Annotation), 2);
        assert_eq!(skipped.iter().next().map(|s| s.id.as_str()), Some("#1"));
    }
}
