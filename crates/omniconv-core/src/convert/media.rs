//! Audio and video transcoding through an external `ffmpeg` process.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use super::output_path;
use crate::error::ConvertError;
use crate::format::VideoCodec;
use crate::settings::{AudioSettings, VideoSettings};

/// Longest stderr excerpt kept in a transcode error.
const STDERR_EXCERPT_LIMIT: usize = 2_000;

pub fn convert_audio(
    ffmpeg: &Path,
    input: &Path,
    destination: &Path,
    settings: &AudioSettings,
) -> Result<PathBuf, ConvertError> {
    let output = output_path(input, destination, settings.target.extension(), None);
    run_ffmpeg(ffmpeg, audio_args(input, &output, settings))?;
    Ok(output)
}

pub fn convert_video(
    ffmpeg: &Path,
    input: &Path,
    destination: &Path,
    settings: &VideoSettings,
) -> Result<PathBuf, ConvertError> {
    let output = output_path(input, destination, settings.target.extension(), None);
    let args = video_args(input, &output, settings)?;

    if settings.codec == VideoCodec::Copy && !same_container(input, &output) {
        warn!(
            input = %input.display(),
            target = settings.target.label(),
            "Copying streams into a different container; some streams may not be accepted"
        );
    }

    run_ffmpeg(ffmpeg, args)?;
    Ok(output)
}

fn base_args(input: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(input.as_os_str().to_owned());
    args
}

/// Arguments that drop any video stream and encode audio into the target muxer.
pub fn audio_args(input: &Path, output: &Path, settings: &AudioSettings) -> Vec<OsString> {
    let mut args = base_args(input);
    args.push("-vn".into());
    if settings.target.uses_bitrate() {
        args.push("-b:a".into());
        args.push(settings.bitrate.ffmpeg_value().into());
    }
    args.push("-f".into());
    args.push(settings.target.muxer().into());
    args.push(output.as_os_str().to_owned());
    args
}

/// Arguments for a video conversion. Stream copy cannot be combined with scaling.
pub fn video_args(
    input: &Path,
    output: &Path,
    settings: &VideoSettings,
) -> Result<Vec<OsString>, ConvertError> {
    let mut args = base_args(input);

    match (settings.codec, settings.resolution.dimensions()) {
        (VideoCodec::Copy, Some(_)) => {
            return Err(ConvertError::unsupported(
                format!("stream copy at {}", settings.resolution.label()),
                settings.target.label(),
            ));
        }
        (VideoCodec::Copy, None) => {
            args.extend(["-c:v", "copy", "-c:a", "copy"].map(OsString::from));
        }
        (codec, dimensions) => {
            args.push("-c:v".into());
            args.push(codec.encoder().into());
            if let Some((width, height)) = dimensions {
                args.push("-vf".into());
                args.push(format!("scale={width}:{height}").into());
            }
        }
    }

    args.push(output.as_os_str().to_owned());
    Ok(args)
}

fn same_container(input: &Path, output: &Path) -> bool {
    match (input.extension(), output.extension()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

fn run_ffmpeg(ffmpeg: &Path, args: Vec<OsString>) -> Result<(), ConvertError> {
    debug!(ffmpeg = %ffmpeg.display(), ?args, "Running ffmpeg");
    let output = Command::new(ffmpeg)
        .args(&args)
        .stdin(Stdio::null())
        .output()?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let excerpt = match stderr.char_indices().nth(STDERR_EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}…", &stderr[..cut]),
        None => stderr.to_string(),
    };
    Err(ConvertError::Transcode {
        status: output.status.to_string(),
        stderr: excerpt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{AudioFormat, Bitrate, Resolution, VideoFormat};

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn lossy_audio_sets_bitrate_and_muxer() {
        let settings = AudioSettings {
            target: AudioFormat::Aac,
            bitrate: Bitrate::new(192).unwrap(),
        };
        let args = strings(&audio_args(Path::new("in.wav"), Path::new("out/in.aac"), &settings));
        assert_eq!(
            args,
            [
                "-y", "-hide_banner", "-loglevel", "error", "-i", "in.wav", "-vn", "-b:a", "192k",
                "-f", "adts", "out/in.aac",
            ]
        );
    }

    #[test]
    fn lossless_audio_ignores_bitrate() {
        let settings = AudioSettings {
            target: AudioFormat::Flac,
            bitrate: Bitrate::new(320).unwrap(),
        };
        let args = strings(&audio_args(Path::new("in.mp3"), Path::new("in.flac"), &settings));
        assert!(!args.iter().any(|arg| arg == "-b:a"));
        assert!(args.windows(2).any(|pair| pair == ["-f", "flac"]));
    }

    #[test]
    fn every_audio_format_names_its_muxer() {
        for target in AudioFormat::ALL {
            let settings = AudioSettings {
                target,
                bitrate: Bitrate::default(),
            };
            let output = PathBuf::from(format!("song.{}", target.extension()));
            let args = strings(&audio_args(Path::new("song.src"), &output, &settings));
            assert!(args.windows(2).any(|pair| pair == ["-f", target.muxer()]));
            assert_eq!(args.iter().any(|arg| arg == "-b:a"), target.uses_bitrate());
            assert_eq!(args.last(), Some(&output.to_string_lossy().into_owned()));
        }
    }

    #[test]
    fn every_video_container_and_encoder_builds() {
        for target in VideoFormat::ALL {
            for codec in VideoCodec::ALL {
                let settings = VideoSettings {
                    target,
                    codec,
                    resolution: Resolution::Original,
                };
                let output = PathBuf::from(format!("clip.{}", target.extension()));
                let args = strings(&video_args(Path::new("clip.src"), &output, &settings).unwrap());
                assert!(args.windows(2).any(|pair| pair == ["-c:v", codec.encoder()]));
            }
        }
    }

    #[test]
    fn video_encoder_and_scale() {
        let settings = VideoSettings {
            target: VideoFormat::Mkv,
            codec: VideoCodec::Libx265,
            resolution: Resolution::P720,
        };
        let args = strings(&video_args(Path::new("clip.mp4"), Path::new("clip.mkv"), &settings).unwrap());
        assert!(args.windows(2).any(|pair| pair == ["-c:v", "libx265"]));
        assert!(args.windows(2).any(|pair| pair == ["-vf", "scale=1280:720"]));
        assert_eq!(args.last().map(String::as_str), Some("clip.mkv"));
    }

    #[test]
    fn original_resolution_has_no_filter() {
        let settings = VideoSettings::default();
        let args = strings(&video_args(Path::new("a.avi"), Path::new("a.mp4"), &settings).unwrap());
        assert!(!args.iter().any(|arg| arg == "-vf"));
        assert!(args.windows(2).any(|pair| pair == ["-c:v", "libx264"]));
    }

    #[test]
    fn stream_copy_copies_both_streams() {
        let settings = VideoSettings {
            codec: VideoCodec::Copy,
            ..VideoSettings::default()
        };
        let args = strings(&video_args(Path::new("a.mkv"), Path::new("a.mp4"), &settings).unwrap());
        assert!(args.windows(4).any(|w| w == ["-c:v", "copy", "-c:a", "copy"]));
    }

    #[test]
    fn stream_copy_cannot_scale() {
        let settings = VideoSettings {
            codec: VideoCodec::Copy,
            resolution: Resolution::P480,
            ..VideoSettings::default()
        };
        assert!(matches!(
            video_args(Path::new("a.mkv"), Path::new("a.mp4"), &settings),
            Err(ConvertError::Unsupported { .. })
        ));
    }

    #[test]
    fn container_comparison_ignores_case() {
        assert!(same_container(Path::new("A.MP4"), Path::new("out/A.mp4")));
        assert!(!same_container(Path::new("a.mkv"), Path::new("a.mp4")));
    }

    #[test]
    fn missing_ffmpeg_is_an_io_error() {
        let result = convert_audio(
            Path::new("/definitely/not/ffmpeg"),
            Path::new("in.wav"),
            Path::new("/tmp"),
            &AudioSettings::default(),
        );
        assert!(matches!(result, Err(ConvertError::Io(_))));
    }
}
