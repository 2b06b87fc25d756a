//! Byte-to-text decoding for uploaded resume documents.
//!
//! Format is picked from the filename extension. PDFs go through
//! `pdf-extract`; `.docx` and `.doc` are opened as a zip archive and
//! the text runs of `word/document.xml` are stitched together, one
//! line per paragraph. Legacy binary `.doc` files fail the zip open
//! and surface as a decode error, matching how the upload form
//! advertises but cannot truly parse them.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Pdf,
    Doc,
    Docx,
}

impl DocFormat {
    pub fn from_filename(name: &str) -> Result<Self, AppError> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Ok(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(Self::Docx)
        } else if lower.ends_with(".doc") {
            Ok(Self::Doc)
        } else {
            Err(AppError::UnsupportedFormat(format!(
                "'{name}' is not a supported resume format (pdf, doc, docx)"
            )))
        }
    }
}

/// Turns raw upload bytes into plain text. Behind a trait so handlers
/// and batch ranking can run against a stub in tests.
pub trait DocumentDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8], format: DocFormat) -> Result<String, AppError>;
}

pub struct OfficeDecoder;

impl DocumentDecoder for OfficeDecoder {
    fn decode(&self, bytes: &[u8], format: DocFormat) -> Result<String, AppError> {
        let text = match format {
            DocFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| AppError::Decode(format!("Failed to parse PDF: {e}")))?,
            DocFormat::Doc | DocFormat::Docx => decode_word_document(bytes)?,
        };
        if text.trim().is_empty() {
            return Err(AppError::Extraction("No text extracted from file".to_string()));
        }
        Ok(text)
    }
}

fn decode_word_document(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Decode(format!("Not a readable Word document: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::Decode(format!("Word document has no body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Decode(format!("Word document body is unreadable: {e}")))?;
    collect_paragraph_text(&xml)
}

/// Walks the document XML collecting `w:t` text runs; each closed
/// `w:p` paragraph becomes one output line, empty paragraphs dropped.
fn collect_paragraph_text(xml: &str) -> Result<String, AppError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::Text(ref e)) if in_text_run => {
                current.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    let paragraph = current.trim();
                    if !paragraph.is_empty() {
                        paragraphs.push(paragraph.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Decode(format!("Malformed document XML: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    // A text run outside any closed paragraph still counts
    let tail = current.trim();
    if !tail.is_empty() {
        paragraphs.push(tail.to_string());
    }
    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    const TWO_PARAGRAPHS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Experience</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Built a billing service in Rust.</w:t></w:r></w:p>
    <w:p><w:r><w:t></w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(DocFormat::from_filename("resume.pdf").unwrap(), DocFormat::Pdf);
        assert_eq!(DocFormat::from_filename("RESUME.PDF").unwrap(), DocFormat::Pdf);
        assert_eq!(DocFormat::from_filename("cv.docx").unwrap(), DocFormat::Docx);
        assert_eq!(DocFormat::from_filename("cv.doc").unwrap(), DocFormat::Doc);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = DocFormat::from_filename("notes.txt").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let bytes = docx_bytes(TWO_PARAGRAPHS);
        let text = OfficeDecoder.decode(&bytes, DocFormat::Docx).unwrap();
        assert_eq!(text, "Experience\nBuilt a billing service in Rust.");
    }

    #[test]
    fn test_docx_entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>C&amp;D Logistics</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let text = OfficeDecoder.decode(&docx_bytes(xml), DocFormat::Docx).unwrap();
        assert_eq!(text, "C&D Logistics");
    }

    #[test]
    fn test_garbage_bytes_fail_as_decode_error() {
        let err = OfficeDecoder
            .decode(b"definitely not a zip archive", DocFormat::Docx)
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_docx_without_body_entry_is_rejected() {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer
                .start_file("unrelated.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<nothing/>").unwrap();
            writer.finish().unwrap();
        }
        let err = OfficeDecoder.decode(&buf, DocFormat::Docx).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_empty_document_fails_extraction() {
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p></w:p></w:body></w:document>"#;
        let err = OfficeDecoder
            .decode(&docx_bytes(xml), DocFormat::Docx)
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
