//! Per-file converters and the dispatch from a [`ConversionJob`] to them.

pub mod document;
#[cfg(feature = "docx")]
pub mod docx;
pub mod image;
pub mod media;

use std::path::{Path, PathBuf};

use crate::capabilities::{Capabilities, Capability};
use crate::error::ConvertError;
use crate::settings::ConversionJob;

/// Converts a single input file into a destination directory.
///
/// Implemented by [`Converter`] for real work and by closures so batch
/// orchestration can be exercised without touching codecs.
pub trait FileConverter {
    fn convert(&self, input: &Path, destination: &Path) -> Result<PathBuf, ConvertError>;
}

impl<F> FileConverter for F
where
    F: Fn(&Path, &Path) -> Result<PathBuf, ConvertError>,
{
    fn convert(&self, input: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
        self(input, destination)
    }
}

/// Routes each file to the backend for the job's category.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    job: &'a ConversionJob,
    capabilities: &'a Capabilities,
}

impl<'a> Converter<'a> {
    pub fn new(job: &'a ConversionJob, capabilities: &'a Capabilities) -> Self {
        Self { job, capabilities }
    }

    fn ffmpeg(&self) -> Result<&'a Path, ConvertError> {
        self.capabilities
            .ffmpeg
            .as_deref()
            .ok_or(ConvertError::Unavailable(Capability::Ffmpeg))
    }
}

impl FileConverter for Converter<'_> {
    fn convert(&self, input: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
        match self.job {
            ConversionJob::Image(job) => image::convert_image(input, destination, job),
            ConversionJob::Document(target) => document::convert_document(input, destination, *target),
            ConversionJob::Audio(settings) => {
                media::convert_audio(self.ffmpeg()?, input, destination, settings)
            }
            ConversionJob::Video(settings) => {
                media::convert_video(self.ffmpeg()?, input, destination, settings)
            }
        }
    }
}

/// `{destination}/{stem}{suffix}.{extension}` for an input file.
pub fn output_path(input: &Path, destination: &Path, extension: &str, suffix: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "output".to_string());
    destination.join(format!("{stem}{}.{extension}", suffix.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AudioSettings;

    #[test]
    fn output_keeps_stem_and_swaps_extension() {
        assert_eq!(
            output_path(Path::new("/photos/holiday.final.png"), Path::new("/out"), "jpg", None),
            PathBuf::from("/out/holiday.final.jpg")
        );
    }

    #[test]
    fn output_suffix_goes_before_extension() {
        assert_eq!(
            output_path(Path::new("report.pdf"), Path::new("/out"), "pdf", Some("_compressed")),
            PathBuf::from("/out/report_compressed.pdf")
        );
    }

    #[test]
    fn output_without_stem_falls_back() {
        assert_eq!(
            output_path(Path::new("/"), Path::new("/out"), "txt", None),
            PathBuf::from("/out/output.txt")
        );
    }

    #[test]
    fn media_without_ffmpeg_is_unavailable() {
        let job = ConversionJob::Audio(AudioSettings::default());
        let capabilities = Capabilities::with_ffmpeg(None);
        let result = Converter::new(&job, &capabilities).convert(Path::new("song.wav"), Path::new("/out"));
        assert!(matches!(result, Err(ConvertError::Unavailable(Capability::Ffmpeg))));
    }

    #[test]
    fn closures_are_converters() {
        let converter = |input: &Path, destination: &Path| -> Result<PathBuf, ConvertError> {
            Ok(output_path(input, destination, "bin", None))
        };
        assert_eq!(
            converter.convert(Path::new("a.dat"), Path::new("/out")).unwrap(),
            PathBuf::from("/out/a.bin")
        );
    }
}
