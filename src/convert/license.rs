//! Extracted license builder.

use crate::graph::ExtractedLicense;
use crate::model::ExtractedLicenseInfo;

use super::{non_empty, or_empty};

/// Build a license node; the caller interns it.
pub fn extracted_license_to_graph(info: &ExtractedLicenseInfo) -> ExtractedLicense {
    ExtractedLicense {
        license_id: info.license_id.clone(),
        extracted_text: info.extracted_text.clone(),
        name: non_empty(&info.license_name),
        cross_refs: info.license_cross_refs.iter().cloned().collect(),
        comment: non_empty(&info.license_comment),
    }
}

pub fn extracted_license_from_graph(license: &ExtractedLicense, index: usize) -> ExtractedLicenseInfo {
    ExtractedLicenseInfo {
        license_id: license.license_id.clone(),
        extracted_text: license.extracted_text.clone(),
        license_name: or_empty(license.name.as_ref()),
        license_cross_refs: license.cross_refs.iter().cloned().collect(),
        license_comment: or_empty(license.comment.as_ref()),
        index,
    }
}
