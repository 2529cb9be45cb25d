//! Identity interner for extracted licenses.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::graph::{AnyLicense, ExtractedLicense, NOASSERTION, NONE};

/// Canonicalizes extracted licenses by id within one operation.
///
/// The first license seen for an id is kept; later ones with the same id
/// resolve to that same `Rc` and their fields are discarded. Register
/// licenses that carry text before resolving bare license strings so the
/// text-bearing instance is the canonical one.
#[derive(Debug, Default)]
pub struct LicenseInterner {
    licenses: IndexMap<String, Rc<ExtractedLicense>>,
}

impl LicenseInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical instance for the license's id.
    pub fn intern(&mut self, license: ExtractedLicense) -> Rc<ExtractedLicense> {
        if let Some(existing) = self.licenses.get(&license.license_id) {
            return Rc::clone(existing);
        }
        let license = Rc::new(license);
        self.licenses
            .insert(license.license_id.clone(), Rc::clone(&license));
        license
    }

    /// Resolve a license field value.
    ///
    /// `""` and `NOASSERTION` mean no assertion, `NONE` means none; every
    /// other value is interned as an extracted license with no text.
    pub fn license(&mut self, value: &str) -> AnyLicense {
        match value.trim() {
            "" | NOASSERTION => AnyLicense::NoAssertion,
            NONE => AnyLicense::None,
            id => AnyLicense::Extracted(self.intern(ExtractedLicense::new(id, ""))),
        }
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }

    /// Canonical instances in first-seen order.
    pub fn into_licenses(self) -> Vec<Rc<ExtractedLicense>> {
        self.licenses.into_values().collect()
    }
}
