use crate::format::{
    AudioFormat, Bitrate, DocumentFormat, ImageFormat, Resolution, VideoCodec, VideoFormat,
};
use crate::settings::{AudioSettings, DocumentSettings, ImageSettings, VideoSettings};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "omniconv";
const CONFIG_FILE_NAME: &str = "config.toml";
const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_FFMPEG_PROGRAM: &str = "ffmpeg";

/// Result returned by [`load_config`], capturing the source and any non-fatal issues.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: FileConfig,
    pub warnings: Vec<String>,
    pub source: ConfigSource,
}

/// Indicates where the configuration was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No persisted configuration was found or usable; defaults were synthesized.
    Default,
    /// Configuration was read from `config.toml`.
    File,
}

/// Errors that can occur when persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialization error: {0}")]
    Ser(#[from] toml::ser::Error),
}

/// Disk-backed configuration schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default = "FileConfig::schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub tools: ToolPreferences,
    #[serde(default)]
    pub defaults: ConversionDefaults,
    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            tools: ToolPreferences::default(),
            defaults: ConversionDefaults::default(),
            ui: UiPreferences::default(),
        }
    }
}

impl FileConfig {
    const fn schema_version() -> u32 {
        CURRENT_SCHEMA_VERSION
    }
}

/// External tool locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPreferences {
    #[serde(default)]
    pub ffmpeg_path: Option<String>,
}

impl ToolPreferences {
    /// Program used to run ffmpeg: the configured path, or `ffmpeg` on PATH.
    pub fn ffmpeg_program(&self) -> PathBuf {
        self.ffmpeg_path
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FFMPEG_PROGRAM))
    }
}

/// Initial panel settings; the GUI writes back whatever was last used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionDefaults {
    #[serde(default)]
    pub image: ImageSettings,
    #[serde(default)]
    pub document: DocumentSettings,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub video: VideoSettings,
}

/// UI-only preferences that the GUI needs to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default)]
    pub show_technical_log: bool,
    #[serde(default)]
    pub last_output_directory: Option<String>,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Dark,
            show_technical_log: false,
            last_output_directory: None,
        }
    }
}

/// Theme preference options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

/// Path to the configuration directory.
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Load the configuration from the standard location, falling back to defaults.
pub fn load_config() -> ConfigLoadResult {
    load_config_from(&config_path())
}

/// Load the configuration from an explicit path. Never fails; problems become warnings.
pub fn load_config_from(path: &Path) -> ConfigLoadResult {
    let mut warnings = Vec::new();

    if path.exists() {
        match fs::read_to_string(path) {
            Ok(raw) => match parse_config(&raw) {
                Ok((cfg, mut parse_warnings)) => {
                    warnings.append(&mut parse_warnings);
                    return ConfigLoadResult {
                        config: cfg,
                        warnings,
                        source: ConfigSource::File,
                    };
                }
                Err(err) => {
                    warnings.push(format!(
                        "Failed to parse {} as TOML: {}. Falling back to defaults.",
                        path.display(),
                        err
                    ));
                }
            },
            Err(err) => {
                warnings.push(format!(
                    "Failed to read {}: {}. Falling back to defaults.",
                    path.display(),
                    err
                ));
            }
        }
    }

    ConfigLoadResult {
        config: FileConfig::default(),
        warnings,
        source: ConfigSource::Default,
    }
}

/// Persist the configuration to the standard location.
pub fn save_config(config: &FileConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

/// Persist the configuration to an explicit path, creating parent directories.
pub fn save_config_to(config: &FileConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(config)?;
    fs::write(path, serialized)?;
    Ok(())
}

fn sanitize_config(mut config: FileConfig) -> (FileConfig, Vec<String>) {
    let mut warnings = Vec::new();

    if config.schema_version != CURRENT_SCHEMA_VERSION {
        warnings.push(format!(
            "Unknown config schema version {}. Resetting to {}.",
            config.schema_version, CURRENT_SCHEMA_VERSION
        ));
        return (FileConfig::default(), warnings);
    }

    let image = &mut config.defaults.image;
    if !(1..=100).contains(&image.quality) {
        let clamped = image.quality.clamp(1, 100);
        warnings.push(format!(
            "Image quality {} is outside 1-100. Using {}.",
            image.quality, clamped
        ));
        image.quality = clamped;
    }

    let document_target = config.defaults.document.target;
    if !crate::format::DocumentFormat::available().contains(&document_target) {
        let fallback = DocumentSettings::default();
        warnings.push(format!(
            "Document format {} is not available in this build. Using {}.",
            document_target.label(),
            fallback.target.label()
        ));
        config.defaults.document = fallback;
    }

    if let Some(path) = config.tools.ffmpeg_path.as_ref() {
        if path.trim().is_empty() {
            warnings.push("Empty ffmpeg_path ignored; using ffmpeg from PATH.".to_string());
            config.tools.ffmpeg_path = None;
        }
    }

    if let Some(dir) = config.ui.last_output_directory.as_ref() {
        if !Path::new(dir).is_dir() {
            config.ui.last_output_directory = None;
        }
    }

    (config, warnings)
}

/// Remove `table[key]` when it does not parse as `T`, so the default applies.
fn reset_invalid<T: serde::de::DeserializeOwned>(
    value: &mut toml::Value,
    section: &[&str],
    key: &str,
    what: &str,
    warnings: &mut Vec<String>,
) {
    let table = section
        .iter()
        .try_fold(value, |node, name| node.get_mut(*name))
        .and_then(|node| node.as_table_mut());
    let Some(table) = table else {
        return;
    };
    let invalid = match table.get(key) {
        Some(raw) => T::deserialize(raw.clone()).is_err().then(|| raw.to_string()),
        None => None,
    };
    if let Some(raw) = invalid {
        warnings.push(format!("Unknown {what} {raw} in config. Using the default."));
        table.remove(key);
    }
}

/// Parse and sanitize a config file. Unknown format, codec, resolution,
/// bitrate or theme values are reset one by one instead of discarding the
/// whole file.
fn parse_config(raw: &str) -> Result<(FileConfig, Vec<String>), toml::de::Error> {
    let mut value: toml::Value = toml::from_str(raw)?;
    let mut warnings = Vec::new();

    let defaults = |name| ["defaults", name];
    reset_invalid::<ImageFormat>(
        &mut value,
        &defaults("image"),
        "target",
        "image format",
        &mut warnings,
    );
    reset_invalid::<DocumentFormat>(
        &mut value,
        &defaults("document"),
        "target",
        "document format",
        &mut warnings,
    );
    reset_invalid::<AudioFormat>(
        &mut value,
        &defaults("audio"),
        "target",
        "audio format",
        &mut warnings,
    );
    reset_invalid::<Bitrate>(
        &mut value,
        &defaults("audio"),
        "bitrate",
        "audio bitrate",
        &mut warnings,
    );
    reset_invalid::<VideoFormat>(
        &mut value,
        &defaults("video"),
        "target",
        "video format",
        &mut warnings,
    );
    reset_invalid::<VideoCodec>(
        &mut value,
        &defaults("video"),
        "codec",
        "video codec",
        &mut warnings,
    );
    reset_invalid::<Resolution>(
        &mut value,
        &defaults("video"),
        "resolution",
        "video resolution",
        &mut warnings,
    );
    reset_invalid::<ThemePreference>(
        &mut value,
        &["ui"],
        "theme",
        "theme",
        &mut warnings,
    );

    let config = FileConfig::deserialize(value)?;
    let (config, mut sanitize_warnings) = sanitize_config(config);
    warnings.append(&mut sanitize_warnings);
    Ok((config, warnings))
}
