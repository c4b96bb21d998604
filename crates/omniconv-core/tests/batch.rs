use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::{Rgba, RgbaImage};
use omniconv_core::{
    BatchProgressCallback, BatchProgressEvent, BatchProgressEventKind, Capabilities, Category, ConversionSettings,
    Converter, DocumentFormat, DocumentSettings, ImageFormat, ImageSettings, Session, StartError,
    run_batch, run_batch_with_progress,
};
use tempfile::tempdir;

fn write_rgba(dir: &Path, name: &str) -> PathBuf {
    let mut img = RgbaImage::new(8, 8);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgba([(x * 30) as u8, (y * 30) as u8, 200, if x < 4 { 255 } else { 0 }]);
    }
    let path = dir.join(name);
    img.save(&path).expect("write fixture");
    path
}

fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").path())
        .collect();
    entries.sort();
    entries
}

#[test]
fn all_successful_images_are_counted() {
    let temp = tempdir().expect("tempdir");
    let files: Vec<_> = (0..4)
        .map(|i| write_rgba(temp.path(), &format!("frame{i}.png")))
        .collect();
    let out = temp.path().join("out");
    fs::create_dir(&out).expect("out dir");

    let mut session = Session::new();
    session.open_category(Category::Image);
    session.select_files(files.clone());
    let settings = ConversionSettings::Image(ImageSettings {
        target: ImageFormat::Jpg,
        ..ImageSettings::default()
    });
    let plan = session.prepare_batch(&settings).expect("plan");
    let capabilities = Capabilities::with_ffmpeg(None);

    let report = run_batch(&Converter::new(&plan.job, &capabilities), &plan.files, &out);
    assert_eq!(report.total, 4);
    assert_eq!(report.successes, 4);
    assert_eq!(report.failures, 0);

    for file in dir_entries(&out) {
        let decoded = image::open(&file).expect("decode output");
        assert!(!decoded.color().has_alpha(), "{} kept alpha", file.display());
    }
}

#[test]
fn unsupported_documents_fail_independently() {
    let temp = tempdir().expect("tempdir");
    let files = vec![
        temp.path().join("keep.txt"),
        temp.path().join("sheet.xlsx"),
        temp.path().join("slides.pptx"),
    ];
    fs::write(&files[0], "plain words").expect("write txt");
    fs::write(&files[1], b"xlsx").expect("write xlsx");
    fs::write(&files[2], b"pptx").expect("write pptx");

    let job = ConversionSettings::Document(DocumentSettings {
        target: DocumentFormat::Docx,
    })
    .resolve()
    .expect("resolve");
    let capabilities = Capabilities::with_ffmpeg(None);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let callback: BatchProgressCallback = Arc::new(move |event: BatchProgressEvent| {
        sink.lock().expect("lock").push(event.kind);
    });

    let report = run_batch_with_progress(
        &Converter::new(&job, &capabilities),
        &files,
        temp.path(),
        Some(callback),
    );

    assert_eq!(report.failures, 2);
    assert_eq!(report.successes, 1);
    assert!(temp.path().join("keep.docx").exists());
    assert_eq!(
        events
            .lock()
            .expect("lock")
            .iter()
            .filter(|kind| **kind == BatchProgressEventKind::FileFailed)
            .count(),
        2
    );
}

#[test]
fn invalid_dimensions_touch_nothing() {
    let temp = tempdir().expect("tempdir");
    let input = write_rgba(temp.path(), "photo.png");
    let out = temp.path().join("out");
    fs::create_dir(&out).expect("out dir");

    let mut session = Session::new();
    session.open_category(Category::Image);
    session.select_files(vec![input]);
    let settings = ConversionSettings::Image(ImageSettings {
        resize: true,
        width: "1920".into(),
        height: "tall".into(),
        ..ImageSettings::default()
    });

    assert!(matches!(
        session.prepare_batch(&settings),
        Err(StartError::Settings(_))
    ));
    assert!(dir_entries(&out).is_empty());
}

#[test]
fn empty_selection_never_reaches_conversion() {
    let temp = tempdir().expect("tempdir");
    let mut session = Session::new();
    session.open_category(Category::Document);

    let settings = ConversionSettings::Document(DocumentSettings::default());
    assert_eq!(session.prepare_batch(&settings), Err(StartError::NoFiles));
    assert!(dir_entries(temp.path()).is_empty());
}
