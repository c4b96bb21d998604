//! Core library crate exposing shared Omniconv conversion logic.

pub mod batch;
pub mod capabilities;
pub mod category;
pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod logging;
pub mod selection;
pub mod session;
pub mod settings;

pub use batch::{
    BatchProgressCallback, BatchProgressEvent, BatchProgressEventKind, BatchReport, FileOutcome,
    progress_label, run_batch, run_batch_with_progress,
};
pub use capabilities::{Capabilities, Capability, FFMPEG_DOWNLOAD_URL, MissingCapability};
pub use category::Category;
pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, ConversionDefaults, FileConfig, ThemePreference,
    ToolPreferences, UiPreferences, config_directory, config_path, load_config, save_config,
};
pub use convert::{Converter, FileConverter};
pub use error::ConvertError;
pub use format::{
    AudioFormat, Bitrate, DocumentFormat, ImageFormat, ParseFormatError, Resolution, VideoCodec,
    VideoFormat,
};
pub use logging::{LoggingDestination, LoggingError, current_log_path, init_logging};
pub use selection::{LISTING_LIMIT, Selection};
pub use session::{BatchPlan, Session, StartError, View};
pub use settings::{
    AudioSettings, ConversionJob, ConversionSettings, Dimensions, DocumentSettings, ImageJob,
    ImageSettings, SettingsError, VideoSettings,
};
