//! Error types for the permit2report library.
//!
//! Extraction is all-or-nothing: a run either produces a complete
//! [`crate::model::ExtractionResult`] or fails with an [`ExtractError`].
//! Missing *fields* inside a successfully parsed document are not errors —
//! the data model carries them as `Option`s — so every variant here is an
//! environment problem (unreadable input, unwritable output), never a
//! partially-extracted document.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the permit2report library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("HTML file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid UTF-8 text.
    #[error("File '{path}' is not valid UTF-8.\nThe portal exports pages as UTF-8; re-save the file with UTF-8 encoding.")]
    InvalidEncoding { path: PathBuf },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The extraction result could not be serialized to JSON.
    #[error("Failed to serialize report: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },

    /// Could not create or write the report file.
    #[error("Failed to write report file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
