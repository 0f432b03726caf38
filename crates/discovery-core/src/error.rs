//! Error types for discovery operations.
//!
//! This module defines [`DiscoveryError`] which covers all error cases that can occur
//! when fetching provider records, reshaping them into tables, or writing them out.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while retrieving, rendering, or exporting discovery data.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Network-related errors (connection failures, non-success statuses, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The requested article does not exist at the provider.
    #[error("Article not found: {0}")]
    ArticleNotFound(u64),

    /// Error parsing data from a provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A timestamp could not be interpreted as an ISO-8601 date-time.
    #[error("Malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Writing a table to a file failed.
    #[error("Export error: {0}")]
    Export(String),

    /// Writing to the console failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure building or transforming a table.
    #[error("Frame error: {0}")]
    Frame(#[from] PolarsError),

    /// The requested feature is not supported.
    #[error("Feature not supported: {0}")]
    NotSupported(String),
}

/// Result type alias using [`DiscoveryError`].
pub type Result<T> = std::result::Result<T, DiscoveryError>;
