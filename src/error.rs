//! Error types shared by detection, editing and export.

use thiserror::Error;

/// Errors reported by the seam splitter.
///
/// An empty detection result is not an error, and neither is a band shorter
/// than the configured minimum: the latter is surfaced through
/// [`crate::session::EditSession::short_slice_warning`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Zero-sized image, stride too small, or buffer length mismatched to the
    /// declared dimensions.
    #[error("invalid image {width}x{height} (stride {stride}, {len} bytes): {reason}")]
    InvalidImage {
        width: usize,
        height: usize,
        stride: usize,
        len: usize,
        reason: &'static str,
    },

    /// A session operation referenced a seam that does not exist or was
    /// issued outside the state it requires. Session state is left untouched.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Seams handed to the exporter are unsorted, duplicated, or out of range.
    #[error("invalid seams: {0}")]
    InvalidSeams(String),

    /// File-level helper failure (image load/save, config, JSON).
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for seam splitter operations
pub type SplitResult<T> = Result<T, SplitError>;
