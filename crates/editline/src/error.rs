//! Error types for the editline binding.

use std::ffi::NulError;

/// Errors synthesized by this binding.
///
/// Only load and resolution failures are mapped into this enum. Native
/// status codes are returned raw by the operations that produce them and are
/// never interpreted here; consult the libedit documentation for their
/// meaning.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The expected shared library is not resident or could not be loaded.
    #[error("library '{library}' unavailable: {reason}")]
    ResourceUnavailable { library: String, reason: String },

    /// A required exported symbol or global could not be resolved, or
    /// resolved to a null value, within an otherwise-loaded library.
    #[error("symbol '{symbol}' not found in '{library}'")]
    SymbolNotFound { symbol: String, library: String },

    /// A native constructor returned a null handle.
    #[error("{call} returned a null handle")]
    HandleCreationFailed { call: &'static str },

    /// Input text contained an interior NUL byte and cannot cross the
    /// boundary as a null-terminated string.
    #[error("text contains an interior NUL byte: {0}")]
    Nul(#[from] NulError),
}

/// Result type for binding operations.
pub type EditResult<T> = Result<T, EditError>;
