//! DOCX text extraction
//!
//! Reads `word/document.xml` from the OOXML zip container and keeps the text
//! of body-level paragraphs. Tables, headers, footers and text boxes are
//! not recovered.

use super::{Extractor, Source};
use crate::error::CrawlError;
use crate::text::collapse_whitespace;
use crate::types::{DocumentText, ExtractionRecord};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts text from `.docx` sources
pub struct DocxExtractor;

impl Extractor for DocxExtractor {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn matches(&self, source: &Source<'_>) -> bool {
        source.has_suffix(&[".docx"])
    }

    fn extract(&self, source: &Source<'_>) -> Result<ExtractionRecord, CrawlError> {
        let text = docx_text(source.bytes())?;
        Ok(ExtractionRecord::Docx(DocumentText::new(source.origin(), text)))
    }
}

/// Normalized text of a DOCX document
pub fn docx_text(bytes: &[u8]) -> Result<String, CrawlError> {
    let xml = read_document_part(bytes)?;
    let paragraphs = body_paragraphs(&xml)?;
    let kept: Vec<&str> = paragraphs
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect();
    Ok(collapse_whitespace(&kept.join("\n")))
}

fn read_document_part(bytes: &[u8]) -> Result<String, CrawlError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| CrawlError::decode("docx", e))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| CrawlError::decode("docx", format!("{}: {}", DOCUMENT_PART, e)))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| CrawlError::decode("docx", e))?;
    Ok(xml)
}

/// Text of every `w:p` that is a direct child of `w:body`, in order
fn body_paragraphs(xml: &str) -> Result<Vec<String>, CrawlError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    // Local names of the open elements
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // Stack depth at which the current body paragraph was opened
    let mut paragraph_depth: Option<usize> = None;
    let mut in_text = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                if paragraph_depth.is_none()
                    && name == b"p"
                    && stack.last().map(Vec::as_slice) == Some(b"body".as_slice())
                {
                    paragraph_depth = Some(stack.len());
                    current.clear();
                }
                in_text = paragraph_depth.is_some() && name == b"t";
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if paragraph_depth.is_some() {
                    match name.as_ref() {
                        b"tab" => current.push('\t'),
                        b"br" | b"cr" => current.push('\n'),
                        _ => {}
                    }
                } else if name.as_ref() == b"p"
                    && stack.last().map(Vec::as_slice) == Some(b"body".as_slice())
                {
                    paragraphs.push(String::new());
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
                in_text = false;
                if paragraph_depth == Some(stack.len()) {
                    paragraphs.push(std::mem::take(&mut current));
                    paragraph_depth = None;
                }
            }
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|e| CrawlError::decode("docx", e))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CrawlError::decode("docx", e)),
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Wrap body XML in a minimal DOCX container
    pub fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }
}
