//! DOCX body text extraction.
//!
//! A `.docx` file is a ZIP container with the body text in
//! `word/document.xml`. Text lives in `<w:t>` runs; `<w:p>` paragraphs
//! become newline-separated lines in the output.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use precis_core::Result;

use crate::document::read_error;

/// Extract plain text from the Word document body, discarding formatting.
pub(crate) fn extract(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| read_error(path, e))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| read_error(path, e))?
        .read_to_string(&mut document_xml)
        .map_err(|e| read_error(path, e))?;

    parse_body_text(&document_xml).map_err(|e| read_error(path, e))
}

/// Walk the document XML, collecting `<w:t>` text and paragraph breaks.
///
/// Whitespace between elements is ignored; whitespace inside a text run
/// is significant (`xml:space="preserve"`) and kept as-is.
fn parse_body_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.name().as_ref() == b"w:t" {
                    in_text_run = true;
                }
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push('\n'),
                _ => {}
            },
            Event::Text(e) => {
                if in_text_run {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    // Trim empty paragraphs at both ends; interior blank lines keep the
    // body's own spacing.
    while paragraphs.first().is_some_and(|p| p.trim().is_empty()) {
        paragraphs.remove(0);
    }
    while paragraphs.last().is_some_and(|p| p.trim().is_empty()) {
        paragraphs.pop();
    }

    Ok(paragraphs.join("\n"))
}
