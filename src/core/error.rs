//! Error types for the planner engine and payload loading
//!
//! Business-rule violations (unmet prerequisites, offering mismatches, ...)
//! are never errors; they are reported as validation outcomes. The errors
//! here are fatal to a single request.

use thiserror::Error;

/// Fatal conditions for a single engine request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A course key is not in the catalog or not at the expected place in the schedule
    #[error("Course not found: {0}")]
    NotFound(String),

    /// A catalog entry is missing required data or is inconsistent
    #[error("Malformed catalog entry '{course_id}': {reason}")]
    MalformedCatalog {
        /// Offending course key
        course_id: String,
        /// What is wrong with it
        reason: String,
    },

    /// A semester index outside the schedule
    #[error("Semester {index} is out of range (schedule has {len} semesters)")]
    SemesterOutOfRange {
        /// Requested index
        index: usize,
        /// Number of semesters in the schedule
        len: usize,
    },

    /// A move request that does not match the schedule it targets
    #[error("Malformed move request: {0}")]
    MalformedRequest(String),
}

impl EngineError {
    /// Shorthand for a [`EngineError::MalformedCatalog`]
    pub fn malformed(course_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            course_id: course_id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading catalog and schedule payloads
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML payload could not be parsed
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON payload could not be parsed or written
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is not a supported payload format
    #[error("Unsupported payload format: '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// Payload parsed but violates the catalog or schedule model
    #[error(transparent)]
    Engine(#[from] EngineError),
}
