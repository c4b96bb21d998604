//! Document conversions: PDF and DOCX to text, text to DOCX, PDF recompression.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::output_path;
#[cfg(not(all(feature = "pdf", feature = "docx")))]
use crate::capabilities::Capability;
use crate::error::ConvertError;
use crate::format::DocumentFormat;

/// Suffix added to recompressed PDFs so the source is never overwritten.
pub const COMPRESSED_SUFFIX: &str = "_compressed";

/// Convert one document. Only PDF→TXT, DOCX→TXT, TXT→DOCX and PDF→PDF exist;
/// every other pairing fails as unsupported for that file.
pub fn convert_document(
    input: &Path,
    destination: &Path,
    target: DocumentFormat,
) -> Result<PathBuf, ConvertError> {
    let source = DocumentFormat::from_path(input);
    debug!(input = %input.display(), ?source, target = target.label(), "Converting document");

    match (source, target) {
        #[cfg(feature = "pdf")]
        (Some(DocumentFormat::Pdf), DocumentFormat::Txt) => pdf_to_text(input, destination),
        #[cfg(feature = "pdf")]
        (Some(DocumentFormat::Pdf), DocumentFormat::Pdf) => recompress_pdf(input, destination),
        #[cfg(not(feature = "pdf"))]
        (Some(DocumentFormat::Pdf), DocumentFormat::Txt | DocumentFormat::Pdf) => {
            Err(ConvertError::Unavailable(Capability::Pdf))
        }
        #[cfg(feature = "docx")]
        (Some(DocumentFormat::Docx), DocumentFormat::Txt) => docx_to_text(input, destination),
        #[cfg(feature = "docx")]
        (Some(DocumentFormat::Txt), DocumentFormat::Docx) => text_to_docx(input, destination),
        #[cfg(not(feature = "docx"))]
        (Some(DocumentFormat::Docx), DocumentFormat::Txt)
        | (Some(DocumentFormat::Txt), DocumentFormat::Docx) => {
            Err(ConvertError::Unavailable(Capability::Docx))
        }
        (source, target) => Err(ConvertError::unsupported(
            source_label(input, source),
            target.label(),
        )),
    }
}

fn source_label(input: &Path, source: Option<DocumentFormat>) -> String {
    match source {
        Some(format) => format.label().to_string(),
        None => input
            .extension()
            .map(|ext| ext.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "file without extension".to_string()),
    }
}

#[cfg(feature = "pdf")]
fn pdf_to_text(input: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
    let document = lopdf::Document::load(input)?;
    let mut pages = Vec::new();
    for page_number in document.get_pages().into_keys() {
        pages.push(document.extract_text(&[page_number])?);
    }

    let output = output_path(input, destination, DocumentFormat::Txt.extension(), None);
    fs::write(&output, pages.join("\n"))?;
    Ok(output)
}

#[cfg(feature = "pdf")]
fn recompress_pdf(input: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
    let mut document = lopdf::Document::load(input)?;
    document.prune_objects();
    document.delete_zero_length_streams();
    document.renumber_objects();
    document.compress();

    let output = output_path(
        input,
        destination,
        DocumentFormat::Pdf.extension(),
        Some(COMPRESSED_SUFFIX),
    );
    document.save(&output)?;
    Ok(output)
}

#[cfg(feature = "docx")]
fn docx_to_text(input: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
    let text = super::docx::read_text(input)?;
    let output = output_path(input, destination, DocumentFormat::Txt.extension(), None);
    fs::write(&output, text)?;
    Ok(output)
}

#[cfg(feature = "docx")]
fn text_to_docx(input: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
    // Non-UTF-8 input surfaces as an InvalidData IO error.
    let text = fs::read_to_string(input)?;
    let output = output_path(input, destination, DocumentFormat::Docx.extension(), None);
    super::docx::write_text(&output, &text)?;
    Ok(output)
}
