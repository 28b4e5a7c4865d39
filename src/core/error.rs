//! Error types for imgfilter.
//!
//! Uses thiserror for structured errors with context. Errors carry the filter
//! name wherever one is involved so the final message tells the user which
//! command failed.

use crate::core::types::ValueType;
use thiserror::Error;

/// Errors raised by a filter while it runs.
///
/// The dispatcher never recovers from these; they travel to the process
/// boundary untouched.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A filter read an option that has no value
    #[error("Missing option '{option}' for filter {filter}")]
    MissingOption {
        /// Filter name
        filter: String,
        /// Option `dest`
        option: String,
    },

    /// An option holds a value of another type than requested
    #[error("Option '{option}' of filter {filter} expected {expected}, got {got}")]
    TypeMismatch {
        /// Filter name
        filter: String,
        /// Option `dest`
        option: String,
        /// Requested type
        expected: ValueType,
        /// Kind of the stored value
        got: String,
    },

    /// An option or positional value is unusable
    #[error("Invalid argument for filter {filter}: {reason}")]
    InvalidArgument {
        /// Filter name
        filter: String,
        /// What is wrong with the value
        reason: String,
    },

    /// The filter failed while processing
    #[error("Filter {filter} failed: {error}")]
    Execution {
        /// Filter name
        filter: String,
        /// Failure description
        error: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding error from the `image` crate
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors from building the filter registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Another filter with the same lowercased name exists
    #[error("Filter '{name}' is already registered")]
    DuplicateFilter {
        /// Lowercased filter name
        name: String,
    },

    /// Metadata cannot be turned into a command line
    #[error("Invalid metadata for filter '{filter}': {reason}")]
    InvalidMetadata {
        /// Filter name
        filter: String,
        /// What is wrong with the metadata
        reason: String,
    },
}

/// Errors surfaced by the command dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Bad command line for a filter. The clap error knows how to print
    /// itself and which status to exit with.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// The filter itself failed
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Writing to stdout or stderr failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatchError {
    /// Check if this is a command-line usage error.
    pub fn is_usage(&self) -> bool {
        matches!(self, DispatchError::Usage(_))
    }
}

impl FilterError {
    /// Shorthand for an execution failure.
    pub fn execution(filter: impl Into<String>, error: impl ToString) -> Self {
        FilterError::Execution {
            filter: filter.into(),
            error: error.to_string(),
        }
    }
}

/// Result type alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
