//! Response tree of an import.

use serde::Serialize;

/// One record created or reused by an import, with the records imported
/// beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportResponse {
    /// Id of the release or project
    pub id: String,
    pub name: String,
    pub version: String,
    /// `false` when an existing record was reused
    pub affected: bool,
    pub children: Vec<ImportResponse>,
}

impl ImportResponse {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        affected: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            affected,
            children: Vec::new(),
        }
    }

    /// Size of the tree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// Nodes of the tree that were written.
    pub fn count_affected(&self) -> usize {
        usize::from(self.affected) + self.children.iter().map(Self::count_affected).sum::<usize>()
    }
}
