//! Save options configuration.

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime};

/// Compression applied to every entry on save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Store entries uncompressed
    Stored,
    /// Deflate entries (what Office itself writes)
    #[default]
    Deflated,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Options for writing a package back to a ZIP archive.
///
/// All entries are stamped with the ZIP epoch (1980-01-01 00:00:00), so saving
/// the same entry table twice yields byte-identical archives.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Compression method for all entries
    pub compression: Compression,

    /// Compression level, `None` for the writer default.
    /// Ignored for stored entries.
    pub compression_level: Option<i64>,
}

impl SaveOptions {
    /// Create default save options (deflate, default level).
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that store every entry uncompressed.
    pub fn stored() -> Self {
        Self::new().with_compression(Compression::Stored)
    }

    /// Set the compression method.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the compression level.
    pub fn with_compression_level(mut self, level: Option<i64>) -> Self {
        self.compression_level = level;
        self
    }

    pub(crate) fn file_options(&self) -> SimpleFileOptions {
        let options = SimpleFileOptions::default()
            .compression_method(self.compression.method())
            .last_modified_time(DateTime::default());

        match self.compression {
            Compression::Stored => options,
            Compression::Deflated => options.compression_level(self.compression_level),
        }
    }
}
