//! Upload-time text extraction.
//!
//! This stage sits in front of the retrieval pipeline: the HTTP layer hands
//! over raw bytes and a filename, and this module returns plain UTF-8 text
//! or [`AppError::UnsupportedFormat`]. Supported: `.pdf`, `.docx`, `.txt`.

use crate::types::{AppError, Result};
use quick_xml::events::Event;
use std::io::Read;

/// Decompressed byte cap for `word/document.xml` (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Extract plain text from an uploaded file, dispatched on its extension.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String> {
    let extension = filename
        .rsplit('.')
        .next()
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => extract_pdf(bytes),
        "docx" => extract_docx(bytes),
        "txt" => extract_txt(bytes),
        other => Err(AppError::UnsupportedFormat(format!(
            "unsupported file type: .{}",
            other
        ))),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnsupportedFormat(format!("PDF extraction failed: {}", e)))
}

fn extract_txt(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| AppError::UnsupportedFormat(format!("text file is not UTF-8: {}", e)))
}

/// Pull the paragraph text runs out of the OOXML main document part.
fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| AppError::UnsupportedFormat(format!("DOCX archive error: {}", e)))?;

    let mut doc_xml = Vec::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::UnsupportedFormat(format!("DOCX missing document part: {}", e)))?
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut doc_xml)
        .map_err(|e| AppError::UnsupportedFormat(format!("DOCX read error: {}", e)))?;
    if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(AppError::UnsupportedFormat(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }

    let mut reader = quick_xml::Reader::from_reader(&doc_xml[..]);
    let mut out = String::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(text)) => {
                let run = text
                    .unescape()
                    .map_err(|e| AppError::UnsupportedFormat(format!("DOCX XML error: {}", e)))?;
                out.push_str(&run);
            }
            Ok(Event::End(end)) if end.name().as_ref() == b"w:p" => out.push('\n'),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::UnsupportedFormat(format!("DOCX XML error: {}", e)));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_passes_through() {
        let text = extract_text("notes.txt", b"plain contents").unwrap();
        assert_eq!(text, "plain contents");
    }

    #[test]
    fn extension_dispatch_is_case_insensitive() {
        let text = extract_text("NOTES.TXT", b"upper").unwrap();
        assert_eq!(text, "upper");
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = extract_text("photo.png", &[0u8; 4]).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn invalid_utf8_txt_is_unsupported() {
        let err = extract_text("bad.txt", &[0xff, 0xfe, 0xfd]).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn corrupt_docx_is_unsupported() {
        let err = extract_text("broken.docx", b"not a zip").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }
}
