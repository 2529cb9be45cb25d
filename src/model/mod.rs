//! Internal normalized record model.
//!
//! These are the flat records the portal stores: every interchange document
//! belonging to a release is split into a creation-info record, package-info
//! records and a document record that embeds snippets, relationships,
//! annotations and extracted licenses. Records reference each other by
//! string id only.
//!
//! String fields are never absent: an unset value is `""`. Ordered
//! collections carry an explicit `index` on every entry; use
//! [`in_index_order`] when the order matters.

mod creation;
mod document;
mod license;
mod package;
mod portal;
mod relationship;
mod snippet;

pub use creation::*;
pub use document::*;
pub use license::*;
pub use package::*;
pub use portal::*;
pub use relationship::*;
pub use snippet::*;

/// A record entry with a stable position inside its parent collection.
pub trait Indexed {
    fn index(&self) -> usize;
}

/// Borrow the entries of `items` sorted by their `index` field.
///
/// The sort is stable, so entries sharing an index keep their stored order.
pub fn in_index_order<T: Indexed>(items: &[T]) -> Vec<&T> {
    let mut ordered: Vec<&T> = items.iter().collect();
    ordered.sort_by_key(|item| item.index());
    ordered
}

macro_rules! impl_indexed {
    ($($ty:ty),+ $(,)?) => {
        $(impl Indexed for $ty {
            fn index(&self) -> usize {
                self.index
            }
        })+
    };
}

impl_indexed!(
    Creator,
    ExternalDocumentRef,
    ChecksumRecord,
    ExternalReference,
    PackageInfo,
    SnippetRange,
    SnippetInfo,
    RelationshipInfo,
    AnnotationInfo,
    ExtractedLicenseInfo,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_index_order_sorts_by_index() {
        let rels = vec![
            RelationshipInfo {
                related_spdx_element: "b".to_string(),
                index: 1,
                ..Default::default()
            },
            RelationshipInfo {
                related_spdx_element: "a".to_string(),
                index: 0,
                ..Default::default()
            },
        ];

        let ordered: Vec<&str> = in_index_order(&rels)
            .into_iter()
            .map(|r| r.related_spdx_element.as_str())
            .collect();
        assert_eq!(ordered, vec!["a", "b"]);
    }
}
