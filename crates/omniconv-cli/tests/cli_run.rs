use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use image::{Rgba, RgbaImage};
use omniconv_cli::cli_args::Cli;
use omniconv_cli::{execute, render_report};
use omniconv_core::{BatchReport, Capabilities, FileConfig};
use tempfile::{TempDir, tempdir};

struct Workspace {
    temp: TempDir,
    out: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let temp = tempdir().unwrap();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        Self { temp, out }
    }

    fn png(&self, name: &str) -> String {
        let path = self.temp.path().join(name);
        RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path.display().to_string()
    }

    fn corrupt(&self, name: &str) -> String {
        let path = self.temp.path().join(name);
        fs::write(&path, b"not an image").unwrap();
        path.display().to_string()
    }

    fn out(&self) -> String {
        self.out.display().to_string()
    }

    fn outputs(&self) -> usize {
        fs::read_dir(&self.out).unwrap().count()
    }
}

fn run(args: &[&str], capabilities: &Capabilities) -> Result<(), String> {
    let mut argv = vec!["omniconv"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    execute(&cli, &FileConfig::default(), capabilities)
}

fn no_ffmpeg() -> Capabilities {
    Capabilities::with_ffmpeg(None)
}

#[test]
fn test_per_file_failures_succeed_without_strict() {
    let ws = Workspace::new();
    let good = ws.png("good.png");
    let bad = ws.corrupt("bad.png");
    let out = ws.out();

    run(&["image", "--to", "bmp", "-o", &out, &good, &bad], &no_ffmpeg()).unwrap();
    assert!(Path::new(&out).join("good.bmp").exists());
    assert_eq!(ws.outputs(), 1);
}

#[test]
fn test_strict_turns_per_file_failures_into_an_error() {
    let ws = Workspace::new();
    let good = ws.png("good.png");
    let bad = ws.corrupt("bad.png");
    let out = ws.out();

    let err = run(
        &["--strict", "image", "--to", "bmp", "-o", &out, &good, &bad],
        &no_ffmpeg(),
    )
    .unwrap_err();
    assert!(err.contains("1 of 2"), "{err}");
    assert!(Path::new(&out).join("good.bmp").exists());
}

#[test]
fn test_strict_batch_without_failures_is_ok() {
    let ws = Workspace::new();
    let good = ws.png("good.png");
    let out = ws.out();

    run(&["image", "--strict", "--to", "gif", "-o", &out, &good], &no_ffmpeg()).unwrap();
    assert_eq!(ws.outputs(), 1);
}

#[test]
fn test_empty_selection_aborts() {
    let ws = Workspace::new();
    let out = ws.out();

    let err = run(&["image", "--to", "png", "-o", &out], &no_ffmpeg()).unwrap_err();
    assert!(err.contains("select files"), "{err}");
    assert_eq!(ws.outputs(), 0);
}

#[test]
fn test_invalid_dimensions_abort_before_writing() {
    let ws = Workspace::new();
    let good = ws.png("good.png");
    let out = ws.out();

    let result = run(
        &["image", "--to", "png", "--resize", "--width", "wide", "-o", &out, &good],
        &no_ffmpeg(),
    );
    assert!(result.is_err());
    assert_eq!(ws.outputs(), 0);
}

#[test]
fn test_missing_output_directory_aborts() {
    let ws = Workspace::new();
    let good = ws.png("good.png");
    let missing = ws.temp.path().join("nowhere").display().to_string();

    let err = run(&["image", "--to", "png", "-o", &missing, &good], &no_ffmpeg()).unwrap_err();
    assert!(err.contains("does not exist"), "{err}");
}

#[test]
fn test_locked_category_aborts() {
    let ws = Workspace::new();
    let song = ws.corrupt("song.wav");
    let out = ws.out();

    let err = run(&["audio", "--to", "mp3", "-o", &out, &song], &no_ffmpeg()).unwrap_err();
    assert!(err.contains("not available"), "{err}");
    assert_eq!(ws.outputs(), 0);
}

#[test]
fn test_json_report_round_trips_counts() {
    let report = BatchReport {
        destination: PathBuf::from("/converted"),
        total: 3,
        successes: 2,
        failures: 1,
        outcomes: Vec::new(),
    };

    let text = render_report(&report, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["successes"], 2);
    assert_eq!(value["failures"], 1);
    assert_eq!(value["destination"], "/converted");

    assert_eq!(render_report(&report, false).unwrap(), report.summary());
}

#[test]
fn test_json_batch_runs() {
    let ws = Workspace::new();
    let good = ws.png("good.png");
    let out = ws.out();

    run(&["image", "--json", "--to", "tiff", "-o", &out, &good], &no_ffmpeg()).unwrap();
    assert!(Path::new(&out).join("good.tiff").exists());
}
