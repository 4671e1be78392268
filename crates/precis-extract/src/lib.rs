//! Precis Extract — extension-dispatched document text extraction.
//!
//! Supports `.txt` (verbatim UTF-8), `.docx` (Word body text), and
//! `.pdf` (page text in document order). Anything else is rejected
//! before any I/O.

pub mod document;
mod docx;

pub use document::{extract_text, DocumentFormat};
