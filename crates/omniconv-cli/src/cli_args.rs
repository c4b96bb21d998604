use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use omniconv_core::config::ConversionDefaults;
use omniconv_core::{
    AudioFormat, AudioSettings, Bitrate, ConversionSettings, DocumentFormat, DocumentSettings,
    ImageFormat, ImageSettings, Resolution, VideoCodec, VideoFormat, VideoSettings,
};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "omniconv",
    version,
    about = "Batch converter for images, documents, audio and video",
    long_about = None
)]
pub struct Cli {
    /// Print the batch report (or capabilities) as JSON.
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Exit with status 1 when any file fails to convert.
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert images (JPG, PNG, BMP, GIF, WEBP, TIFF, ICO).
    #[command(alias = "images")]
    Image(ImageArgs),
    /// Convert documents (PDF, DOCX, TXT).
    #[command(alias = "documents")]
    Document(DocumentArgs),
    /// Convert audio through ffmpeg.
    Audio(AudioArgs),
    /// Convert video through ffmpeg.
    Video(VideoArgs),
    /// Report which optional backends are available.
    Capabilities,
}

impl Command {
    /// Panel settings for a conversion subcommand, starting from the configured defaults.
    pub fn settings(&self, defaults: &ConversionDefaults) -> Option<ConversionSettings> {
        match self {
            Command::Image(args) => Some(ConversionSettings::Image(args.settings(&defaults.image))),
            Command::Document(args) => {
                Some(ConversionSettings::Document(args.settings(&defaults.document)))
            }
            Command::Audio(args) => Some(ConversionSettings::Audio(args.settings(&defaults.audio))),
            Command::Video(args) => Some(ConversionSettings::Video(args.settings(&defaults.video))),
            Command::Capabilities => None,
        }
    }

    pub fn batch(&self) -> Option<&BatchArgs> {
        match self {
            Command::Image(args) => Some(&args.batch),
            Command::Document(args) => Some(&args.batch),
            Command::Audio(args) => Some(&args.batch),
            Command::Video(args) => Some(&args.batch),
            Command::Capabilities => None,
        }
    }
}

/// Arguments shared by every conversion subcommand.
#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Directory that receives the converted files.
    #[arg(short, long = "output", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub output: String,

    /// Files to convert, processed in the order given.
    #[arg(value_name = "FILES", value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ImageArgs {
    /// Target format.
    #[arg(long = "to", value_name = "FORMAT")]
    pub to: Option<ImageFormat>,

    /// JPG quality (other formats ignore it).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Resize every image to --width x --height.
    #[arg(long, action = ArgAction::SetTrue)]
    pub resize: bool,

    /// Resize width in pixels (checked when the batch starts).
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<String>,

    /// Resize height in pixels (checked when the batch starts).
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<String>,

    #[command(flatten)]
    pub batch: BatchArgs,
}

impl ImageArgs {
    pub fn settings(&self, defaults: &ImageSettings) -> ImageSettings {
        ImageSettings {
            target: self.to.unwrap_or(defaults.target),
            quality: self.quality.unwrap_or(defaults.quality),
            resize: self.resize,
            width: self.width.clone().unwrap_or_else(|| defaults.width.clone()),
            height: self.height.clone().unwrap_or_else(|| defaults.height.clone()),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct DocumentArgs {
    /// Target format.
    #[arg(long = "to", value_name = "FORMAT")]
    pub to: Option<DocumentFormat>,

    #[command(flatten)]
    pub batch: BatchArgs,
}

impl DocumentArgs {
    pub fn settings(&self, defaults: &DocumentSettings) -> DocumentSettings {
        DocumentSettings {
            target: self.to.unwrap_or(defaults.target),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AudioArgs {
    /// Target format.
    #[arg(long = "to", value_name = "FORMAT")]
    pub to: Option<AudioFormat>,

    /// Bitrate in kbps (64, 128, 192, 256 or 320); ignored for WAV and FLAC.
    #[arg(long, value_name = "KBPS")]
    pub bitrate: Option<Bitrate>,

    #[command(flatten)]
    pub batch: BatchArgs,
}

impl AudioArgs {
    pub fn settings(&self, defaults: &AudioSettings) -> AudioSettings {
        AudioSettings {
            target: self.to.unwrap_or(defaults.target),
            bitrate: self.bitrate.unwrap_or(defaults.bitrate),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct VideoArgs {
    /// Target container.
    #[arg(long = "to", value_name = "FORMAT")]
    pub to: Option<VideoFormat>,

    /// Video encoder, or `copy` to keep the streams as they are.
    #[arg(long, value_name = "CODEC")]
    pub codec: Option<VideoCodec>,

    /// Output frame size: original, 1080p, 720p, 480p or 360p.
    #[arg(long, value_name = "RESOLUTION")]
    pub resolution: Option<Resolution>,

    #[command(flatten)]
    pub batch: BatchArgs,
}

impl VideoArgs {
    pub fn settings(&self, defaults: &VideoSettings) -> VideoSettings {
        VideoSettings {
            target: self.to.unwrap_or(defaults.target),
            codec: self.codec.unwrap_or(defaults.codec),
            resolution: self.resolution.unwrap_or(defaults.resolution),
        }
    }
}
