use std::io;

use thiserror::Error;

use crate::capabilities::Capability;

/// Failure converting a single file. Recorded in the batch report, never fatal to the batch.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[cfg(feature = "docx")]
    #[error("DOCX error: {0}")]
    Docx(#[from] crate::convert::docx::DocxError),
    #[error("ffmpeg exited with {status}: {stderr}")]
    Transcode { status: String, stderr: String },
    #[error("cannot convert {input} to {target}")]
    Unsupported { input: String, target: String },
    #[error("{0} support is not available")]
    Unavailable(Capability),
}

impl ConvertError {
    pub fn unsupported(input: impl Into<String>, target: impl Into<String>) -> Self {
        ConvertError::Unsupported {
            input: input.into(),
            target: target.into(),
        }
    }
}
