//! Package kind detection for loaded containers.

use crate::container::DocxContainer;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for DOCX main document part.
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Content type for XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Content type for PPTX presentation part.
const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";

const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// Detected Office package format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Microsoft Word document (.docx)
    Docx,
    /// Microsoft Excel workbook (.xlsx)
    Xlsx,
    /// Microsoft PowerPoint presentation (.pptx)
    Pptx,
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Docx => "docx",
            FormatType::Xlsx => "xlsx",
            FormatType::Pptx => "pptx",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Docx => "Word Document",
            FormatType::Xlsx => "Excel Workbook",
            FormatType::Pptx => "PowerPoint Presentation",
        }
    }

    /// Entry name of the format's main part.
    pub fn main_part(&self) -> &'static str {
        match self {
            FormatType::Docx => crate::container::DOCUMENT_PATH,
            FormatType::Xlsx => "xl/workbook.xml",
            FormatType::Pptx => "ppt/presentation.xml",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the package format of a loaded container.
///
/// Looks for the main-part content type in `[Content_Types].xml` first,
/// then falls back to the top-level folder layout. Returns `None` when
/// neither is conclusive.
///
/// # Example
///
/// ```no_run
/// use docxpack::{detect_format, DocxContainer, FormatType};
///
/// let container = DocxContainer::open("document.docx")?;
/// assert_eq!(detect_format(&container), Some(FormatType::Docx));
/// # Ok::<(), docxpack::Error>(())
/// ```
pub fn detect_format(container: &DocxContainer) -> Option<FormatType> {
    if let Some(bytes) = container.get(CONTENT_TYPES_PATH) {
        let content_types = decode_content_types(bytes);
        if content_types.contains(DOCX_CONTENT_TYPE) {
            return Some(FormatType::Docx);
        } else if content_types.contains(XLSX_CONTENT_TYPE) {
            return Some(FormatType::Xlsx);
        } else if content_types.contains(PPTX_CONTENT_TYPE) {
            return Some(FormatType::Pptx);
        }
    }

    detect_by_folder_structure(container)
}

/// Decode `[Content_Types].xml` to text.
///
/// UTF-16 parts are recognized by their byte order mark. Anything else is
/// read as UTF-8, lossily.
fn decode_content_types(bytes: &[u8]) -> String {
    let utf16 = |rest: &[u8], from: fn([u8; 2]) -> u16| {
        let units = rest.chunks_exact(2).map(|c| from([c[0], c[1]]));
        char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>()
    };

    match bytes {
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Fallback detection by checking folder structure.
fn detect_by_folder_structure(container: &DocxContainer) -> Option<FormatType> {
    let has_word = container.names().any(|n| n.starts_with("word/"));
    let has_xl = container.names().any(|n| n.starts_with("xl/"));
    let has_ppt = container.names().any(|n| n.starts_with("ppt/"));

    match (has_word, has_xl, has_ppt) {
        (true, false, false) => Some(FormatType::Docx),
        (false, true, false) => Some(FormatType::Xlsx),
        (false, false, true) => Some(FormatType::Pptx),
        _ => None,
    }
}
