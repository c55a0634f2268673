//! # docxpack
//!
//! Read, modify, and re-save Office Open XML packages.
//!
//! A package (`.docx`, `.xlsx`, `.pptx`) is a ZIP archive of named parts.
//! This crate loads every part into memory, gives direct access to the
//! main document body (`word/document.xml`), and writes the complete part
//! set back out so that untouched parts survive byte-for-byte.
//!
//! ## Quick Start
//!
//! ```no_run
//! let mut container = docxpack::open("report.docx")?;
//!
//! if let Some(body) = container.document() {
//!     let xml = String::from_utf8_lossy(body).replace("DRAFT", "FINAL");
//!     container.set_document(xml);
//! }
//!
//! container.save("report-final.docx")?;
//! # Ok::<(), docxpack::Error>(())
//! ```
//!
//! Payloads are opaque bytes; building or parsing the XML is left to the
//! caller.

pub mod container;
pub mod detect;
pub mod error;
pub mod options;

// Re-exports
pub use container::{DocxContainer, EntryInfo, DOCUMENT_PATH};
pub use detect::{detect_format, is_zip_file, FormatType};
pub use error::{Error, Result};
pub use options::{Compression, SaveOptions};

use std::path::Path;

/// Open a package from a file path.
///
/// # Example
///
/// ```no_run
/// let container = docxpack::open("document.docx")?;
/// println!("Parts: {}", container.len());
/// # Ok::<(), docxpack::Error>(())
/// ```
pub fn open(path: impl AsRef<Path>) -> Result<DocxContainer> {
    DocxContainer::open(path)
}

/// Load a package from bytes.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("document.docx")?;
/// let container = docxpack::from_bytes(&data)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_bytes(data: &[u8]) -> Result<DocxContainer> {
    DocxContainer::from_bytes(data.to_vec())
}
