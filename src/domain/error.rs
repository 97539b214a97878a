//! Error types for gallery administration.
//!
//! This module defines the centralized error type [`GalleryError`] and a type alias
//! [`Result`] used throughout the crate. Each user-facing operation owns one error
//! kind, so a failed load, save, delete or upload is reported the same way whether
//! the network call failed, the response could not be parsed, or the service
//! answered with a non-success status.

use thiserror::Error;

/// The main error type for gallery operations.
///
/// Every variant is terminal for the operation that produced it: nothing is
/// retried, and the in-memory collection is left as it was before the call.
/// The `Display` output is short enough to be shown as a status line.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Fetching the entry collection failed.
    ///
    /// Covers transport errors, non-success statuses and bodies that are not
    /// an array of entries.
    #[error("Load error: {0}")]
    Load(String),

    /// The edit form cannot be turned into an entry.
    ///
    /// Raised client-side before any remote call is issued, for example when
    /// the id field is blank.
    #[error("{0}")]
    Validation(String),

    /// Creating or updating an entry failed.
    #[error("Save error: {0}")]
    Save(String),

    /// Deleting an entry failed.
    ///
    /// A not-found answer from the service is reported with this variant like
    /// any other non-success status.
    #[error("Delete error: {0}")]
    Delete(String),

    /// Uploading a media file failed.
    ///
    /// Also raised when no file was supplied or the service response carries
    /// no usable `url`.
    #[error("Upload error: {0}")]
    Upload(String),

    /// Another operation is still in flight.
    #[error("Another operation is still in progress")]
    Busy,

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local filesystem access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
