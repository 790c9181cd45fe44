//! Error types for layout ordering.
//!
//! This module defines all error types that can occur while filtering
//! detections and reconstructing reading order.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during page processing.
///
/// An empty page is not an error: every entry point returns an empty result
/// for it. A failing page fails as a unit, no partial orderings are returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A region's geometry or page metadata cannot be used
    #[error("Malformed region at index {index}: invalid {field} ({reason})")]
    MalformedRegion {
        /// Index of the region in the caller's input list
        index: usize,
        /// Name of the offending field (`poly`, `page_size`)
        field: &'static str,
        /// What is wrong with the field
        reason: String,
    },

    /// Layout tree construction reached a state its invariants rule out
    #[error("Layout invariant violated: {0}")]
    InvariantViolation(String),

    /// A supplied ordering is not a permutation of the region indices
    #[error("Invalid reading order: {0}")]
    InvalidPermutation(String),

    /// JSON decoding error (fixtures, configuration)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::MalformedRegion`] on the polygon field.
    pub(crate) fn malformed_polygon(index: usize, reason: impl Into<String>) -> Self {
        Error::MalformedRegion {
            index,
            field: "poly",
            reason: reason.into(),
        }
    }
}
