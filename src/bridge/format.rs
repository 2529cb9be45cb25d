//! Document formats and format detection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Serialized forms of an interchange document.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    /// SPDX tag-value text
    #[default]
    #[value(alias = "spdx")]
    TagValue,
    /// RDF/XML
    Rdf,
    /// SPDX JSON
    Json,
    /// SPDX YAML
    Yaml,
    /// SPDX XML
    Xml,
}

impl DocumentFormat {
    /// Conventional file extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::TagValue => "spdx",
            Self::Rdf => "rdf",
            Self::Json => "spdx.json",
            Self::Yaml => "spdx.yaml",
            Self::Xml => "spdx.xml",
        }
    }

    /// Guess the format from a file name.
    ///
    /// `.rdf.xml` counts as RDF, not XML.
    pub fn from_file_name(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        if name.ends_with(".rdf") || name.ends_with(".rdf.xml") {
            Some(Self::Rdf)
        } else if name.ends_with(".spdx") || name.ends_with(".tag") {
            Some(Self::TagValue)
        } else if name.ends_with(".json") {
            Some(Self::Json)
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            Some(Self::Yaml)
        } else if name.ends_with(".xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    /// Guess the format from the first bytes of a document.
    pub fn detect(content: &[u8]) -> Option<Self> {
        let head = &content[..content.len().min(4096)];
        let text = String::from_utf8_lossy(head);
        let trimmed = text.trim_start_matches('\u{feff}').trim_start();

        if trimmed.starts_with('{') {
            return text.contains("\"spdxVersion\"").then_some(Self::Json);
        }
        if trimmed.starts_with('<') {
            if text.contains("spdx.org/rdf/terms") || text.contains("rdf:RDF") {
                return Some(Self::Rdf);
            }
            return text.contains("spdxVersion").then_some(Self::Xml);
        }
        if trimmed.starts_with("SPDXVersion:") || text.contains("\nSPDXVersion:") {
            return Some(Self::TagValue);
        }
        if text.contains("spdxVersion:") {
            return Some(Self::Yaml);
        }
        None
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagValue => write!(f, "tag-value"),
            Self::Rdf => write!(f, "rdf"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    /// Accepts the portal's format names (`SPDX`, `RDF`, `JSON`, ...) in
    /// any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SPDX" | "TAG-VALUE" | "TAGVALUE" | "TV" => Ok(Self::TagValue),
            "RDF" | "RDF/XML" | "RDF-XML" => Ok(Self::Rdf),
            "JSON" => Ok(Self::Json),
            "YAML" | "YML" => Ok(Self::Yaml),
            "XML" => Ok(Self::Xml),
            other => Err(format!("unsupported document format '{other}'")),
        }
    }
}
