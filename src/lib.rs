//! **SPDX interchange for normalized SBOM records.**
//!
//! `sbom-interchange` moves software bills of materials between a portal's
//! stored records (components, releases, projects and their SPDX
//! sub-documents) and SPDX 2.x interchange documents.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The stored records: portal entities plus the SPDX
//!   sub-documents (creation info, package info, snippets, relationships,
//!   annotations, other licenses) attached to a release.
//! - **[`graph`]**: The in-memory SPDX document. Elements live in one arena
//!   keyed by SPDX id; licenses referenced from several elements share one
//!   instance.
//! - **[`convert`]**: Element mappings in both directions.
//! - **[`export`]**: Graph construction from a release or a project.
//! - **[`import`]**: Graph flattening into records, with child releases for
//!   contained packages.
//! - **[`bridge`]**: Reading and writing documents. SPDX JSON is built in;
//!   tag-value, RDF/XML, YAML and XML go through an external [`SpdxCodec`].
//! - **[`pipeline`]**: [`InterchangeService`], the request-level surface
//!   returning [`RequestSummary`] values.
//! - **[`store`]**: The [`SpdxStore`] seam and the bundled [`InMemoryStore`].
//!
//! ## Exporting a Release
//!
//! ```no_run
//! use std::path::Path;
//! use sbom_interchange::{AppConfig, DocumentFormat, InMemoryStore, InterchangeService};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = InMemoryStore::load(Path::new("records.json"))?;
//!     let mut service = InterchangeService::new(&mut store, AppConfig::default());
//!
//!     let summary = service.export_as_text(
//!         "release-0001",
//!         DocumentFormat::Json,
//!         Path::new("zlib.spdx.json"),
//!     );
//!     println!("{:?}: {}", summary.status, summary.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Importing a Document
//!
//! ```no_run
//! use std::fs::File;
//! use sbom_interchange::{AppConfig, ImportOptions, InMemoryStore, InterchangeService};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = InMemoryStore::new();
//!     let mut service = InterchangeService::new(&mut store, AppConfig::default());
//!
//!     let summary = service.import_as_release(
//!         File::open("zlib.spdx.json")?,
//!         &ImportOptions::default(),
//!     );
//!     println!("imported release {}", summary.message);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod bridge;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod graph;
pub mod import;
pub mod model;
pub mod pipeline;
pub mod store;

// Re-export main types for convenience
pub use bridge::{DocumentFormat, FormatBridge, SpdxCodec};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{ErrorContext, InterchangeError, OptionContext, Result};
pub use export::{ExportOutcome, SpdxExporter};
pub use graph::SpdxDocument;
pub use import::{ImportKind, ImportOptions, ImportOutcome, SpdxImporter};
pub use pipeline::{ImportPreparation, InterchangeService, RequestStatus, RequestSummary};
pub use store::{AddStatus, AddSummary, InMemoryStore, SpdxStore};
