//! The crate error taxonomy (spec.md §7).
//!
//! A single `thiserror`-derived [`Error`] enum with a crate [`Result`] alias.
//! Core modules return `crate::error::Result`; the command layer composes
//! these with `anyhow`.

use std::io;
use std::path::PathBuf;

/// Crate-wide result type aliased to the taxonomy [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The fixed error taxonomy for goman.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed `source@version` identifier, or a name that cannot be derived.
    #[error("invalid package identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },

    /// A forced name was supplied alongside more than one identifier.
    #[error("cannot use --name when installing multiple packages")]
    ConflictingOptions,

    /// Registry file create/read/write/sync failure.
    #[error("registry file {action} failed for {path}: {source}")]
    StorageIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed or unsupported registry JSON.
    #[error("malformed registry file {path}: {detail}")]
    StorageFormat { path: PathBuf, detail: String },

    /// Operation targets a name absent from the registry.
    #[error("'{0}' not found in registry")]
    NotFound(String),

    /// External installer subprocess failure or non-empty error stream.
    #[error("install of '{reference}' failed: {detail}")]
    Install { reference: String, detail: String },

    /// Filesystem removal failure during uninstall.
    #[error("failed to remove binary {path}: {source}")]
    BinaryRemoval {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
