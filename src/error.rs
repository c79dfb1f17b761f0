//! Error types for loading and querying PiFM scans.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying a PiFM scan.
///
/// Every variant that relates to a file carries the offending path, and
/// parser errors carry the 1-based line number.
#[derive(Error, Debug)]
pub enum PifmError {
    /// I/O error while reading or writing a file
    #[error("IO error on {path:?}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A parameter-file line that is neither structural nor `key : value`
    #[error("Malformed line {line} in {path:?}: {content:?}")]
    MalformedLine {
        /// Parameter file path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Trimmed line content
        content: String,
    },

    /// A descriptor block was opened but the file ended before it closed
    #[error("Unterminated {kind} block opened at line {line} in {path:?}")]
    UnterminatedBlock {
        /// Parameter file path
        path: PathBuf,
        /// Block kind ("channel" or "spectrum")
        kind: &'static str,
        /// Line of the opening marker
        line: usize,
    },

    /// File content cannot be decoded under the configured text encoding
    #[error("Cannot decode line {line} of {path:?} as {encoding}")]
    EncodingError {
        /// File path
        path: PathBuf,
        /// 1-based line number of the first undecodable byte
        line: usize,
        /// Encoding name
        encoding: &'static str,
    },

    /// A required scan or descriptor key is absent
    #[error("Missing required parameter '{key}' in {context}")]
    MissingParameter {
        /// Name of the missing key
        key: String,
        /// Where the key was expected (scan parameters, channel caption, ...)
        context: String,
    },

    /// A key is present but its value does not parse
    #[error("Invalid value for parameter '{key}': {value:?}")]
    InvalidParameter {
        /// Key name
        key: String,
        /// Raw value
        value: String,
    },

    /// Binary channel file length does not match the scan geometry
    #[error("Truncated data in {path:?}: {bytes} bytes, expected {expected}")]
    TruncatedData {
        /// Binary file path
        path: PathBuf,
        /// Actual length in bytes
        bytes: usize,
        /// Expected length in bytes
        expected: usize,
    },

    /// A wavelength file row that does not parse as numbers
    #[error("Invalid wavelength row {line} in {path:?}: {content:?}")]
    InvalidWavelengthAxis {
        /// Wavelength file path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Row content
        content: String,
    },

    /// The wavelength file contains no data rows
    #[error("Wavelength file {path:?} has no data rows")]
    EmptyWavelengthAxis {
        /// Wavelength file path
        path: PathBuf,
    },

    /// Requested wavenumber is absent from the truncated wavelength axis
    #[error("Wavenumber {0} not found on the wavelength axis")]
    WavenumberNotFound(i64),

    /// The requested range resolves to nothing
    #[error("Empty range: {message}")]
    EmptyRange {
        /// Description of the empty range
        message: String,
    },

    /// Array dimensions disagree with what an operation requires
    #[error("Shape mismatch: {message}")]
    ShapeMismatch {
        /// Description of the mismatch
        message: String,
    },

    /// NumPy array output error
    #[error("NPY write error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PifmError {
    /// Create an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing parameter error.
    pub fn missing(key: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingParameter {
            key: key.into(),
            context: context.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an empty range error with a message.
    pub fn empty_range(message: impl Into<String>) -> Self {
        Self::EmptyRange {
            message: message.into(),
        }
    }

    /// Create a shape mismatch error with a message.
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PifmError>;
