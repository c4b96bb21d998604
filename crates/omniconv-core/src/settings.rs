//! Editable per-category settings and their validated form.
//!
//! Settings are kept exactly as the user typed them and are only checked when
//! a batch is about to start ([`ConversionSettings::resolve`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;
use crate::format::{AudioFormat, Bitrate, DocumentFormat, ImageFormat, Resolution, VideoCodec, VideoFormat};

pub const DEFAULT_QUALITY: u8 = 95;
pub const DEFAULT_WIDTH: &str = "1920";
pub const DEFAULT_HEIGHT: &str = "1080";

/// Input problems that abort a batch before any file is touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid dimensions: width '{width}' and height '{height}' must be positive whole numbers")]
    InvalidDimensions { width: String, height: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(default)]
    pub target: ImageFormat,
    #[serde(default = "ImageSettings::default_quality")]
    pub quality: u8,
    #[serde(default)]
    pub resize: bool,
    #[serde(default = "ImageSettings::default_width")]
    pub width: String,
    #[serde(default = "ImageSettings::default_height")]
    pub height: String,
}

impl ImageSettings {
    const fn default_quality() -> u8 {
        DEFAULT_QUALITY
    }

    fn default_width() -> String {
        DEFAULT_WIDTH.to_string()
    }

    fn default_height() -> String {
        DEFAULT_HEIGHT.to_string()
    }

    pub fn resolve(&self) -> Result<ImageJob, SettingsError> {
        let resize = if self.resize {
            Some(Dimensions::parse(&self.width, &self.height)?)
        } else {
            None
        };
        Ok(ImageJob {
            target: self.target,
            quality: self.quality.clamp(1, 100),
            resize,
        })
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            target: ImageFormat::default(),
            quality: DEFAULT_QUALITY,
            resize: false,
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSettings {
    #[serde(default)]
    pub target: DocumentFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(default)]
    pub target: AudioFormat,
    #[serde(default)]
    pub bitrate: Bitrate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSettings {
    #[serde(default)]
    pub target: VideoFormat,
    #[serde(default)]
    pub codec: VideoCodec,
    #[serde(default)]
    pub resolution: Resolution,
}

/// Resize target in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Parse user-entered width and height; both must be positive integers.
    pub fn parse(width: &str, height: &str) -> Result<Self, SettingsError> {
        let parse = |value: &str| value.trim().parse::<u32>().ok().filter(|v| *v > 0);
        match (parse(width), parse(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(SettingsError::InvalidDimensions {
                width: width.to_string(),
                height: height.to_string(),
            }),
        }
    }
}

/// Validated image parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageJob {
    pub target: ImageFormat,
    pub quality: u8,
    pub resize: Option<Dimensions>,
}

/// Settings for whichever category is active.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionSettings {
    Image(ImageSettings),
    Document(DocumentSettings),
    Audio(AudioSettings),
    Video(VideoSettings),
}

impl ConversionSettings {
    pub fn category(&self) -> Category {
        match self {
            ConversionSettings::Image(_) => Category::Image,
            ConversionSettings::Document(_) => Category::Document,
            ConversionSettings::Audio(_) => Category::Audio,
            ConversionSettings::Video(_) => Category::Video,
        }
    }

    /// Validate the settings into a job that can drive a batch.
    pub fn resolve(&self) -> Result<ConversionJob, SettingsError> {
        Ok(match self {
            ConversionSettings::Image(settings) => ConversionJob::Image(settings.resolve()?),
            ConversionSettings::Document(settings) => ConversionJob::Document(settings.target),
            ConversionSettings::Audio(settings) => ConversionJob::Audio(settings.clone()),
            ConversionSettings::Video(settings) => ConversionJob::Video(settings.clone()),
        })
    }
}

/// A fully validated conversion request for one batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionJob {
    Image(ImageJob),
    Document(DocumentFormat),
    Audio(AudioSettings),
    Video(VideoSettings),
}

impl ConversionJob {
    pub fn category(&self) -> Category {
        match self {
            ConversionJob::Image(_) => Category::Image,
            ConversionJob::Document(_) => Category::Document,
            ConversionJob::Audio(_) => Category::Audio,
            ConversionJob::Video(_) => Category::Video,
        }
    }

    /// Short human description used in logs.
    pub fn target_label(&self) -> &'static str {
        match self {
            ConversionJob::Image(job) => job.target.label(),
            ConversionJob::Document(format) => format.label(),
            ConversionJob::Audio(settings) => settings.target.label(),
            ConversionJob::Video(settings) => settings.target.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_disabled_ignores_dimension_text() {
        let settings = ImageSettings {
            width: "wide".into(),
            ..ImageSettings::default()
        };
        let job = settings.resolve().unwrap();
        assert_eq!(job.resize, None);
        assert_eq!(job.quality, DEFAULT_QUALITY);
    }

    #[test]
    fn resize_rejects_non_numeric_and_zero() {
        for (width, height) in [("abc", "1080"), ("1920", ""), ("0", "10"), ("-5", "10")] {
            let settings = ImageSettings {
                resize: true,
                width: width.into(),
                height: height.into(),
                ..ImageSettings::default()
            };
            assert!(
                matches!(settings.resolve(), Err(SettingsError::InvalidDimensions { .. })),
                "{width}x{height} should be rejected"
            );
        }
    }

    #[test]
    fn resize_trims_whitespace() {
        let dims = Dimensions::parse(" 640 ", "480\n").unwrap();
        assert_eq!(dims, Dimensions { width: 640, height: 480 });
    }

    #[test]
    fn quality_is_clamped() {
        let settings = ImageSettings {
            quality: 0,
            ..ImageSettings::default()
        };
        assert_eq!(settings.resolve().unwrap().quality, 1);
    }

    #[test]
    fn resolve_keeps_category() {
        let settings = ConversionSettings::Audio(AudioSettings::default());
        let job = settings.resolve().unwrap();
        assert_eq!(job.category(), Category::Audio);
        assert_eq!(job.target_label(), "MP3");
    }
}
