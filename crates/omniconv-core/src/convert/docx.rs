//! Minimal WordprocessingML (DOCX) reading and writing.
//!
//! Reading collects paragraph text from `word/document.xml`. Writing produces
//! the smallest package Word and LibreOffice accept: content types, the
//! package relationship, and a main document part.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const DOCUMENT_PART: &str = "word/document.xml";
const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("invalid document XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Plain text of every paragraph, joined with newlines.
pub fn read_text(path: &Path) -> Result<String, DocxError> {
    let file = File::open(path)?;
    read_text_from(file)
}

pub fn read_text_from<R: Read + Seek>(reader: R) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    Ok(paragraphs(&xml)?.join("\n"))
}

/// Paragraph text in document order.
///
/// Paragraphs nested in text boxes are emitted before the paragraph that
/// anchors them. Paragraph properties (`w:pPr`, including tab-stop
/// definitions) contribute no text.
fn paragraphs(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut properties_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"pPr" => properties_depth += 1,
                b"t" if properties_depth == 0 => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                let name = e.local_name();
                if name.as_ref() == b"p" {
                    paragraphs.push(String::new());
                } else if properties_depth == 0 {
                    if let Some(text) = open.last_mut() {
                        match name.as_ref() {
                            b"tab" => text.push('\t'),
                            b"br" | b"cr" => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(t) if in_text => {
                if let Some(text) = open.last_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"pPr" => properties_depth = properties_depth.saturating_sub(1),
                b"p" => {
                    if let Some(text) = open.pop() {
                        paragraphs.push(text);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Write `text` as a single-paragraph document; line breaks become `w:br`.
pub fn write_text(path: &Path, text: &str) -> Result<(), DocxError> {
    let file = File::create(path)?;
    write_text_to(file, text)?;
    Ok(())
}

pub fn write_text_to<W: Write + Seek>(writer: W, text: &str) -> Result<W, DocxError> {
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS_XML.as_bytes())?;
    zip.start_file(DOCUMENT_PART, options)?;
    zip.write_all(&document_xml(text)?)?;

    Ok(zip.finish()?)
}

fn document_xml(text: &str) -> Result<Vec<u8>, DocxError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:document").with_attributes([("xmlns:w", WORDPROCESSING_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    let normalized = text.replace("\r\n", "\n");
    for (index, line) in normalized.split('\n').enumerate() {
        if index > 0 {
            writer.write_event(Event::Empty(BytesStart::new("w:br")))?;
        }
        if line.is_empty() {
            continue;
        }
        writer.write_event(Event::Start(
            BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
        ))?;
        writer.write_event(Event::Text(BytesText::new(line)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(writer.into_inner().into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_text_reads_back() {
        let text = "First line\nSecond <line> & \"quotes\"\n\n\tindented";
        let buffer = write_text_to(Cursor::new(Vec::new()), text).unwrap();
        let read = read_text_from(Cursor::new(buffer.into_inner())).unwrap();
        assert_eq!(read, text);
    }

    #[test]
    fn paragraphs_are_joined_with_newlines() {
        let xml = format!(
            r#"<w:document xmlns:w="{WORDPROCESSING_NS}"><w:body>
<w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>Col A</w:t><w:tab/><w:t>Col B</w:t></w:r></w:p>
</w:body></w:document>"#
        );
        assert_eq!(
            paragraphs(&xml).unwrap(),
            vec!["Hello world".to_string(), String::new(), "Col A\tCol B".to_string()]
        );
    }

    #[test]
    fn tab_stop_definitions_add_no_text() {
        let xml = format!(
            r#"<w:document xmlns:w="{WORDPROCESSING_NS}"><w:body>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/><w:tab w:val="right" w:pos="9000"/></w:tabs></w:pPr><w:r><w:t>Title</w:t><w:tab/><w:t>1</w:t></w:r></w:p>
</w:body></w:document>"#
        );
        assert_eq!(paragraphs(&xml).unwrap(), vec!["Title\t1".to_string()]);
    }

    #[test]
    fn text_box_keeps_surrounding_paragraph() {
        let xml = format!(
            r#"<w:document xmlns:w="{WORDPROCESSING_NS}"><w:body>
<w:p><w:r><w:t>Before</w:t></w:r><w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r><w:r><w:t xml:space="preserve"> After</w:t></w:r></w:p>
<w:p><w:r><w:t>Next</w:t></w:r></w:p>
</w:body></w:document>"#
        );
        assert_eq!(
            paragraphs(&xml).unwrap(),
            vec![
                "Boxed".to_string(),
                "Before After".to_string(),
                "Next".to_string()
            ]
        );
    }

    #[test]
    fn missing_document_part_is_an_error() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("readme.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"not a docx").unwrap();
        let buffer = zip.finish().unwrap();

        assert!(matches!(
            read_text_from(Cursor::new(buffer.into_inner())),
            Err(DocxError::Zip(_))
        ));
    }
}
