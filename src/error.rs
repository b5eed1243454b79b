//! Error types for the sheet-layout library

use thiserror::Error;

/// Result type alias using LayoutError
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while laying out or writing cells
///
/// Only structurally invalid input produces an error. Missing fields, unknown
/// cell types and headers wider than the table degrade silently instead.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A textual cell reference did not match `[A-Z]+[0-9]+`
    #[error("Malformed cell reference: {0:?}")]
    MalformedReference(String),

    /// Layout or packing configuration is structurally invalid
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// A position does not fit the target worksheet
    #[error("Position out of bounds: {0}")]
    OutOfBounds(String),

    /// Error from the underlying xlsx writer
    #[cfg(feature = "xlsx")]
    #[error("Worksheet operation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
