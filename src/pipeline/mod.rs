//! Request-level orchestration of exports and imports.
//!
//! [`InterchangeService`] is the surface callers use. Every operation ends in
//! a [`RequestSummary`] or [`ImportPreparation`]: document-level failures are
//! reported through their status and message, never as an `Err`.

mod service;

use serde::{Deserialize, Serialize};

pub use service::InterchangeService;

/// Outcome of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Success,
    #[default]
    Failure,
}

/// Summary of an export or import request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub status: RequestStatus,
    /// Elements or records the request covered
    pub total_elements: usize,
    /// Elements or records the request wrote
    pub affected_elements: usize,
    /// Id of the imported record, verification warnings, or the failure
    pub message: String,
}

impl RequestSummary {
    pub fn success(total_elements: usize, affected_elements: usize, message: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Success,
            total_elements,
            affected_elements,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Failure,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RequestStatus::Success
    }
}

/// What an import would create, read without writing anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPreparation {
    pub status: RequestStatus,
    /// Name of the described package
    pub name: String,
    /// Version of the described package
    pub version: String,
    /// Names of every package in the document, in document order
    pub package_names: Vec<String>,
    pub message: String,
}

/// Separator of verification warnings in an export message.
pub const WARNING_SEPARATOR: &str = "|||";

/// Exit codes of the command-line tool
pub mod exit_codes {
    /// The request succeeded
    pub const SUCCESS: i32 = 0;
    /// The request was processed and reported a failure
    pub const REQUEST_FAILED: i32 = 1;
    /// An error occurred before the request could run
    pub const ERROR: i32 = 3;
}
