//! ZIP container abstraction for OOXML packages.
//!
//! A [`DocxContainer`] holds every entry of a ZIP archive fully decompressed
//! in memory. Entries are kept in the order they were first seen in the
//! source archive and written back in that order on save.

use crate::error::{Error, Result};
use crate::options::SaveOptions;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::{ZipArchive, ZipWriter};

/// Entry name of the main document body in a Word package.
pub const DOCUMENT_PATH: &str = "word/document.xml";

/// Name and size of a single package entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    /// Archive-relative path (e.g., "word/styles.xml")
    pub name: String,
    /// Uncompressed size in bytes
    pub size: usize,
}

/// OOXML package held as an ordered table of entry name to raw bytes.
///
/// Payloads are opaque: nothing here parses or validates the XML inside.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DocxContainer {
    entries: Vec<(String, Vec<u8>)>,
    index: HashMap<String, usize>,
}

impl DocxContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a package from a file path.
    ///
    /// The file is closed before this returns, on success and on failure.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxpack::DocxContainer;
    ///
    /// let container = DocxContainer::open("document.docx")?;
    /// # Ok::<(), docxpack::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::SourceUnavailable)?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(Error::ArchiveFormat)?;
        let container = Self::from_archive(&mut archive)?;
        log::debug!("loaded {} entries from {}", container.len(), path.display());
        Ok(container)
    }

    /// Load a package from an in-memory archive.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(Error::ArchiveFormat)?;
        Self::from_archive(&mut archive)
    }

    /// Load a package from a reader.
    ///
    /// The stream is read to the end before decoding.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(Error::SourceUnavailable)?;
        Self::from_bytes(data)
    }

    /// Load a package from an already opened ZIP archive.
    ///
    /// Every entry is decompressed eagerly. A later entry with the same name
    /// as an earlier one replaces its bytes.
    pub fn from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Self> {
        let mut container = Self::new();

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::read_entry(format!("#{}", i), e))?;
            let name = file.name().to_string();

            let mut data = Vec::new();
            if let Err(e) = file.read_to_end(&mut data) {
                return Err(Error::read_entry(name, zip::result::ZipError::Io(e)));
            }

            container.insert_loaded(name, data);
        }

        Ok(container)
    }

    fn insert_loaded(&mut self, name: String, data: Vec<u8>) {
        if self.contains(&name) {
            log::warn!("duplicate entry {}, keeping the last copy", name);
        }
        self.set(name, data);
    }

    /// Get the main document body (`word/document.xml`).
    ///
    /// Returns `None` if the package has no document body.
    pub fn document(&self) -> Option<&[u8]> {
        self.get(DOCUMENT_PATH)
    }

    /// Replace the main document body, inserting it if absent.
    pub fn set_document(&mut self, body: impl Into<Vec<u8>>) {
        self.set(DOCUMENT_PATH, body);
    }

    /// Get the bytes of an entry.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Replace an entry's bytes, or append a new entry.
    pub fn set(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let name = name.into();
        let data = data.into();
        let existing = self.index.get(&name).copied();
        match existing {
            Some(i) => self.entries[i].1 = data,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, data));
            }
        }
    }

    /// Check if an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the package has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in archive order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries as `(name, bytes)` pairs in archive order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    /// List entry names and sizes.
    pub fn entry_infos(&self) -> Vec<EntryInfo> {
        self.entries
            .iter()
            .map(|(name, data)| EntryInfo {
                name: name.clone(),
                size: data.len(),
            })
            .collect()
    }

    /// Save the package to a file with default options.
    ///
    /// Any existing file at `path` is truncated. The data is synced to
    /// storage before this returns.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with_options(path, &SaveOptions::default())
    }

    /// Save the package to a file.
    pub fn save_with_options(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(Error::DestinationUnavailable)?;

        let writer = self.write_zip(ZipWriter::new(BufWriter::new(file)), options)?;
        let file = writer
            .into_inner()
            .map_err(|e| Error::write_io(e.into_error()))?;
        file.sync_all().map_err(Error::DestinationUnavailable)?;

        log::debug!("saved {} entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Write the package to a stream with default options.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.write_to_with_options(writer, &SaveOptions::default())
    }

    /// Write the package to a stream.
    ///
    /// The archive is built in memory first since the ZIP writer needs to seek.
    pub fn write_to_with_options<W: Write>(
        &self,
        mut writer: W,
        options: &SaveOptions,
    ) -> Result<()> {
        let data = self.to_bytes_with_options(options)?;
        writer.write_all(&data).map_err(Error::write_io)?;
        writer.flush().map_err(Error::write_io)
    }

    /// Encode the package to an in-memory archive with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with_options(&SaveOptions::default())
    }

    /// Encode the package to an in-memory archive.
    pub fn to_bytes_with_options(&self, options: &SaveOptions) -> Result<Vec<u8>> {
        let cursor = self.write_zip(ZipWriter::new(Cursor::new(Vec::new())), options)?;
        Ok(cursor.into_inner())
    }

    /// Write every entry to a ZIP writer and finalize it.
    ///
    /// Returns the underlying writer after the central directory is written.
    pub fn write_zip<W: Write + Seek>(
        &self,
        mut zip: ZipWriter<W>,
        options: &SaveOptions,
    ) -> Result<W> {
        let file_options = options.file_options();

        for (name, data) in &self.entries {
            if name.ends_with('/') && data.is_empty() {
                zip.add_directory(name.as_str(), file_options)
                    .map_err(Error::ArchiveWrite)?;
                continue;
            }
            zip.start_file(name.as_str(), file_options)
                .map_err(Error::ArchiveWrite)?;
            zip.write_all(data).map_err(Error::write_io)?;
        }

        zip.finish().map_err(Error::ArchiveWrite)
    }
}

impl std::fmt::Debug for DocxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocxContainer")
            .field("files", &self.len())
            .field("has_document", &self.contains(DOCUMENT_PATH))
            .finish()
    }
}
