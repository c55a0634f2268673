//! Error types for the docxpack library.

use std::io;
use thiserror::Error;
use zip::result::ZipError;

/// Result type alias for docxpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or saving a package.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path or stream could not be opened or read.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[source] io::Error),

    /// The input bytes are not a parseable ZIP archive.
    #[error("Invalid ZIP archive: {0}")]
    ArchiveFormat(#[source] ZipError),

    /// A listed entry could not be opened or decompressed.
    #[error("Failed to read entry {name}: {source}")]
    ArchiveRead {
        /// Entry name, or `#<index>` when the entry header itself is unreadable
        name: String,
        #[source]
        source: ZipError,
    },

    /// An entry could not be written, or the archive could not be finalized.
    #[error("Failed to write archive: {0}")]
    ArchiveWrite(#[source] ZipError),

    /// The output file could not be created or synced to storage.
    #[error("Destination unavailable: {0}")]
    DestinationUnavailable(#[source] io::Error),
}

impl Error {
    pub(crate) fn read_entry(name: impl Into<String>, source: ZipError) -> Self {
        Error::ArchiveRead {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn write_io(err: io::Error) -> Self {
        Error::ArchiveWrite(ZipError::Io(err))
    }
}
