//! Closed sets of target formats and tunables for each category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a format, codec, bitrate or resolution name is not recognized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseFormatError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseFormatError {
    fn new(kind: &'static str, value: &str, expected: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}

/// Raster image output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpg,
    Png,
    Bmp,
    Gif,
    Webp,
    Tiff,
    Ico,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 7] = [
        ImageFormat::Jpg,
        ImageFormat::Png,
        ImageFormat::Bmp,
        ImageFormat::Gif,
        ImageFormat::Webp,
        ImageFormat::Tiff,
        ImageFormat::Ico,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "JPG",
            ImageFormat::Png => "PNG",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Gif => "GIF",
            ImageFormat::Webp => "WEBP",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Ico => "ICO",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Ico => "ico",
        }
    }

    /// Whether the encoder can store an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, ImageFormat::Jpg)
    }

    pub(crate) fn encoder_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Webp => image::ImageFormat::WebP,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Ico => image::ImageFormat::Ico,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "bmp" => Ok(ImageFormat::Bmp),
            "gif" => Ok(ImageFormat::Gif),
            "webp" => Ok(ImageFormat::Webp),
            "tiff" | "tif" => Ok(ImageFormat::Tiff),
            "ico" => Ok(ImageFormat::Ico),
            _ => Err(ParseFormatError::new(
                "image format",
                s,
                ImageFormat::ALL.iter().map(|f| f.extension()),
            )),
        }
    }
}

/// Document output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] =
        [DocumentFormat::Pdf, DocumentFormat::Docx, DocumentFormat::Txt];

    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Txt => "TXT",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }

    /// Formats whose backend was compiled into this build, in menu order.
    pub fn available() -> Vec<DocumentFormat> {
        DocumentFormat::ALL
            .into_iter()
            .filter(|format| match format {
                DocumentFormat::Pdf => cfg!(feature = "pdf"),
                DocumentFormat::Docx => cfg!(feature = "docx"),
                DocumentFormat::Txt => true,
            })
            .collect()
    }

    /// Kind of a document input, judged by its extension.
    pub fn from_path(path: &std::path::Path) -> Option<DocumentFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl Default for DocumentFormat {
    fn default() -> Self {
        DocumentFormat::available()
            .first()
            .copied()
            .unwrap_or(DocumentFormat::Txt)
    }
}

impl FromStr for DocumentFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(ParseFormatError::new(
                "document format",
                s,
                DocumentFormat::ALL.iter().map(|f| f.extension()),
            )),
        }
    }
}

/// Audio output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Ogg,
    Flac,
    Aac,
    M4a,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Ogg,
        AudioFormat::Flac,
        AudioFormat::Aac,
        AudioFormat::M4a,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "MP3",
            AudioFormat::Wav => "WAV",
            AudioFormat::Ogg => "OGG",
            AudioFormat::Flac => "FLAC",
            AudioFormat::Aac => "AAC",
            AudioFormat::M4a => "M4A",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::Aac => "aac",
            AudioFormat::M4a => "m4a",
        }
    }

    /// ffmpeg muxer name (`-f`).
    pub fn muxer(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::Aac => "adts",
            AudioFormat::M4a => "mp4",
        }
    }

    /// Lossless containers ignore the bitrate setting.
    pub fn uses_bitrate(self) -> bool {
        !matches!(self, AudioFormat::Wav | AudioFormat::Flac)
    }
}

impl FromStr for AudioFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AudioFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ParseFormatError::new(
                    "audio format",
                    s,
                    AudioFormat::ALL.iter().map(|f| f.extension()),
                )
            })
    }
}

/// Audio bitrate in kbps, restricted to the offered presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Bitrate(u32);

impl Bitrate {
    pub const PRESETS: [u32; 5] = [64, 128, 192, 256, 320];

    pub fn new(kbps: u32) -> Option<Self> {
        Self::PRESETS.contains(&kbps).then_some(Self(kbps))
    }

    pub fn presets() -> impl Iterator<Item = Bitrate> {
        Self::PRESETS.into_iter().map(Bitrate)
    }

    pub fn kbps(self) -> u32 {
        self.0
    }

    /// Value in ffmpeg's `-b:a` syntax, e.g. `256k`.
    pub fn ffmpeg_value(self) -> String {
        format!("{}k", self.0)
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Self(256)
    }
}

impl TryFrom<u32> for Bitrate {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Bitrate::new(value).ok_or_else(|| format!("unsupported bitrate {value} kbps"))
    }
}

impl From<Bitrate> for u32 {
    fn from(value: Bitrate) -> Self {
        value.0
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kbps", self.0)
    }
}

impl FromStr for Bitrate {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['k', 'K']);
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Bitrate::new)
            .ok_or_else(|| ParseFormatError::new("bitrate", s, ["64", "128", "192", "256", "320"]))
    }
}

/// Video container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    #[default]
    Mp4,
    Avi,
    Mkv,
    Mov,
    Webm,
    Flv,
}

impl VideoFormat {
    pub const ALL: [VideoFormat; 6] = [
        VideoFormat::Mp4,
        VideoFormat::Avi,
        VideoFormat::Mkv,
        VideoFormat::Mov,
        VideoFormat::Webm,
        VideoFormat::Flv,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "MP4",
            VideoFormat::Avi => "AVI",
            VideoFormat::Mkv => "MKV",
            VideoFormat::Mov => "MOV",
            VideoFormat::Webm => "WEBM",
            VideoFormat::Flv => "FLV",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Avi => "avi",
            VideoFormat::Mkv => "mkv",
            VideoFormat::Mov => "mov",
            VideoFormat::Webm => "webm",
            VideoFormat::Flv => "flv",
        }
    }
}

impl FromStr for VideoFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ParseFormatError::new(
                    "video format",
                    s,
                    VideoFormat::ALL.iter().map(|f| f.extension()),
                )
            })
    }
}

/// Video encoder choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    #[default]
    Libx264,
    Libx265,
    Mpeg4,
    Copy,
}

impl VideoCodec {
    pub const ALL: [VideoCodec; 4] = [
        VideoCodec::Libx264,
        VideoCodec::Libx265,
        VideoCodec::Mpeg4,
        VideoCodec::Copy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VideoCodec::Libx264 => "libx264 (H.264)",
            VideoCodec::Libx265 => "libx265 (H.265/HEVC)",
            VideoCodec::Mpeg4 => "mpeg4",
            VideoCodec::Copy => "copy",
        }
    }

    /// Encoder name passed to `-c:v`.
    pub fn encoder(self) -> &'static str {
        match self {
            VideoCodec::Libx264 => "libx264",
            VideoCodec::Libx265 => "libx265",
            VideoCodec::Mpeg4 => "mpeg4",
            VideoCodec::Copy => "copy",
        }
    }
}

impl FromStr for VideoCodec {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "libx264" | "h264" | "h.264" => Ok(VideoCodec::Libx264),
            "libx265" | "h265" | "h.265" | "hevc" => Ok(VideoCodec::Libx265),
            "mpeg4" => Ok(VideoCodec::Mpeg4),
            "copy" => Ok(VideoCodec::Copy),
            _ => Err(ParseFormatError::new(
                "video codec",
                s,
                VideoCodec::ALL.iter().map(|c| c.encoder()),
            )),
        }
    }
}

/// Output frame size for video conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Original,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "360p")]
    P360,
}

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::Original,
        Resolution::P1080,
        Resolution::P720,
        Resolution::P480,
        Resolution::P360,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Resolution::Original => "Original",
            Resolution::P1080 => "1920x1080 (1080p)",
            Resolution::P720 => "1280x720 (720p)",
            Resolution::P480 => "854x480 (480p)",
            Resolution::P360 => "640x360 (360p)",
        }
    }

    /// Target frame size, or `None` to keep the source size.
    pub fn dimensions(self) -> Option<(u32, u32)> {
        match self {
            Resolution::Original => None,
            Resolution::P1080 => Some((1920, 1080)),
            Resolution::P720 => Some((1280, 720)),
            Resolution::P480 => Some((854, 480)),
            Resolution::P360 => Some((640, 360)),
        }
    }
}

impl FromStr for Resolution {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(Resolution::Original),
            "1080p" | "1920x1080" => Ok(Resolution::P1080),
            "720p" | "1280x720" => Ok(Resolution::P720),
            "480p" | "854x480" => Ok(Resolution::P480),
            "360p" | "640x360" => Ok(Resolution::P360),
            _ => Err(ParseFormatError::new(
                "resolution",
                s,
                ["original", "1080p", "720p", "480p", "360p"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn image_format_aliases_parse() {
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!("tif".parse::<ImageFormat>().unwrap(), ImageFormat::Tiff);
        assert!("psd".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn only_jpg_lacks_alpha() {
        let without_alpha: Vec<_> = ImageFormat::ALL
            .into_iter()
            .filter(|format| !format.supports_alpha())
            .collect();
        assert_eq!(without_alpha, vec![ImageFormat::Jpg]);
    }

    #[test]
    fn bitrate_accepts_presets_only() {
        assert_eq!("192k".parse::<Bitrate>().unwrap().kbps(), 192);
        assert!("200".parse::<Bitrate>().is_err());
        assert_eq!(Bitrate::default().ffmpeg_value(), "256k");
        assert!(Bitrate::try_from(96).is_err());
    }

    #[test]
    fn document_kind_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("/tmp/Report.PDF")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("notes")), None);
    }

    #[test]
    fn resolution_dimensions() {
        assert_eq!(Resolution::Original.dimensions(), None);
        assert_eq!(Resolution::P480.dimensions(), Some((854, 480)));
        assert_eq!("1280x720".parse::<Resolution>().unwrap(), Resolution::P720);
    }

    #[test]
    fn serde_names_are_lowercase() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            resolution: Resolution,
            codec: VideoCodec,
            bitrate: Bitrate,
        }

        let text = toml::to_string(&Wrapper {
            resolution: Resolution::P720,
            codec: VideoCodec::Libx265,
            bitrate: Bitrate::default(),
        })
        .unwrap();
        assert!(text.contains("resolution = \"720p\""));
        assert!(text.contains("codec = \"libx265\""));
        assert!(text.contains("bitrate = 256"));
    }
}
