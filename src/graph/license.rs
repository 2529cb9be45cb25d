//! License values of the interchange graph.

use std::fmt;
use std::rc::Rc;

pub const NOASSERTION: &str = "NOASSERTION";
pub const NONE: &str = "NONE";

/// A license found in the material, referenced by id from license fields.
///
/// Inside one document every license id maps to exactly one
/// `Rc<ExtractedLicense>`; see [`crate::convert::LicenseInterner`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLicense {
    pub license_id: String,
    pub extracted_text: String,
    pub name: Option<String>,
    pub cross_refs: Vec<String>,
    pub comment: Option<String>,
}

impl ExtractedLicense {
    pub fn new(license_id: impl Into<String>, extracted_text: impl Into<String>) -> Self {
        Self {
            license_id: license_id.into(),
            extracted_text: extracted_text.into(),
            ..Self::default()
        }
    }

    /// Whether the id is a valid SPDX license expression made only of
    /// listed licenses, i.e. it needs no `LicenseRef-` entry of its own.
    pub fn is_standard(&self) -> bool {
        !self.license_id.contains("LicenseRef-")
            && spdx::Expression::parse(&self.license_id).is_ok()
    }
}

/// Value of a license field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnyLicense {
    #[default]
    NoAssertion,
    None,
    /// A license from the SPDX license list, used for the data license
    Listed(String),
    Extracted(Rc<ExtractedLicense>),
}

impl AnyLicense {
    pub fn id(&self) -> &str {
        match self {
            Self::NoAssertion => NOASSERTION,
            Self::None => NONE,
            Self::Listed(id) => id,
            Self::Extracted(license) => &license.license_id,
        }
    }

    pub fn as_extracted(&self) -> Option<&Rc<ExtractedLicense>> {
        match self {
            Self::Extracted(license) => Some(license),
            _ => None,
        }
    }
}

impl fmt::Display for AnyLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
