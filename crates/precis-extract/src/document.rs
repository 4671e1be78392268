//! File text extraction for the supported document formats.

use std::path::Path;

use precis_core::{Error, Result};
use tracing::debug;

use crate::docx;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Docx,
    Pdf,
}

impl DocumentFormat {
    /// Detect format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Extract the raw text of a document.
///
/// Dispatches on the file extension; unknown extensions are rejected
/// before any I/O. Failures never yield partial text.
pub fn extract_text(path: &Path) -> Result<String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let format = DocumentFormat::from_extension(ext)
        .ok_or_else(|| Error::UnsupportedFormat(describe_extension(ext)))?;

    debug!("Extracting {:?} text from {}", format, path.display());

    match format {
        DocumentFormat::PlainText => read_plain_text(path),
        DocumentFormat::Docx => docx::extract(path),
        DocumentFormat::Pdf => extract_pdf(path),
    }
}

pub(crate) fn read_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Read {
        path: path.to_path_buf(),
        cause: err.to_string(),
    }
}

fn describe_extension(ext: &str) -> String {
    if ext.is_empty() {
        "no extension".to_string()
    } else {
        format!(".{}", ext.to_lowercase())
    }
}

/// Read a `.txt` file verbatim as UTF-8.
fn read_plain_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| read_error(path, e))
}

/// Extract text from every page of a PDF, in document order.
fn extract_pdf(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| read_error(path, e))
}
