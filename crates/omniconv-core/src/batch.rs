//! Sequential batch conversion with per-file outcomes and progress events.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::convert::FileConverter;

pub type BatchProgressCallback = Arc<dyn Fn(BatchProgressEvent) + Send + Sync + 'static>;

#[derive(Debug, Clone, Serialize)]
pub struct BatchProgressEvent {
    pub kind: BatchProgressEventKind,
    /// 1-based position of the file this event is about; 0 before the first file.
    pub index: usize,
    pub total: usize,
    pub path: Option<PathBuf>,
    pub message: String,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchProgressEventKind {
    Started,
    FileStarted,
    FileConverted,
    FileFailed,
    Finished,
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Totals for a finished batch. `successes + failures == total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub destination: PathBuf,
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Completion message shown to the user.
    pub fn summary(&self) -> String {
        let mut text = format!("Conversion finished!\n\n✓ Succeeded: {}\n", self.successes);
        if self.failures > 0 {
            text.push_str(&format!("✗ Failed: {}\n", self.failures));
        }
        text.push_str(&format!("\nFiles in:\n{}", self.destination.display()));
        text
    }

    /// Final progress label, e.g. `Done! 3/4`.
    pub fn done_label(&self) -> String {
        format!("Done! {}/{}", self.successes, self.total)
    }
}

/// Progress label shown while file `index` (1-based) of `total` is converting.
pub fn progress_label(index: usize, total: usize) -> String {
    format!("Converting: {index}/{total}")
}

/// Convert every file in order. Per-file failures are recorded, never propagated.
pub fn run_batch<C>(converter: &C, files: &[PathBuf], destination: &Path) -> BatchReport
where
    C: FileConverter + ?Sized,
{
    run_batch_with_progress(converter, files, destination, None)
}

pub fn run_batch_with_progress<C>(
    converter: &C,
    files: &[PathBuf],
    destination: &Path,
    callback: Option<BatchProgressCallback>,
) -> BatchReport
where
    C: FileConverter + ?Sized,
{
    let started = Instant::now();
    let total = files.len();
    let emit = |kind, index, path: Option<&Path>, message: String| {
        if let Some(cb) = &callback {
            cb(BatchProgressEvent {
                kind,
                index,
                total,
                path: path.map(Path::to_path_buf),
                message,
                elapsed_ms: started.elapsed().as_secs_f64() * 1_000.0,
            });
        }
    };

    info!(total, destination = %destination.display(), "Batch started");
    emit(
        BatchProgressEventKind::Started,
        0,
        None,
        format!("Converting {total} file(s) into {}", destination.display()),
    );

    let mut outcomes = Vec::with_capacity(total);
    for (position, input) in files.iter().enumerate() {
        let index = position + 1;
        emit(
            BatchProgressEventKind::FileStarted,
            index,
            Some(input.as_path()),
            progress_label(index, total),
        );
        match converter.convert(input, destination) {
            Ok(output) => {
                info!(index, total, input = %input.display(), output = %output.display(), "Converted");
                emit(
                    BatchProgressEventKind::FileConverted,
                    index,
                    Some(input.as_path()),
                    format!("Converted {} -> {}", input.display(), output.display()),
                );
                outcomes.push(FileOutcome {
                    input: input.clone(),
                    output: Some(output),
                    error: None,
                });
            }
            Err(err) => {
                error!(index, total, input = %input.display(), error = %err, "Conversion failed");
                emit(
                    BatchProgressEventKind::FileFailed,
                    index,
                    Some(input.as_path()),
                    format!("Error converting {}: {err}", input.display()),
                );
                outcomes.push(FileOutcome {
                    input: input.clone(),
                    output: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let successes = outcomes.iter().filter(|outcome| outcome.succeeded()).count();
    let report = BatchReport {
        destination: destination.to_path_buf(),
        total,
        successes,
        failures: total - successes,
        outcomes,
    };

    info!(
        successes = report.successes,
        failures = report.failures,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Batch finished"
    );
    emit(BatchProgressEventKind::Finished, total, None, report.done_label());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::sync::Mutex;

    fn fake_converter(input: &Path, destination: &Path) -> Result<PathBuf, ConvertError> {
        match input.extension().and_then(|ext| ext.to_str()) {
            Some("bad") => Err(ConvertError::unsupported("BAD", "TXT")),
            _ => Ok(destination.join(input.file_name().unwrap_or_default())),
        }
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let files = vec![
            PathBuf::from("a.ok"),
            PathBuf::from("b.bad"),
            PathBuf::from("c.ok"),
        ];
        let report = run_batch(&fake_converter, &files, Path::new("/out"));

        assert_eq!(report.total, 3);
        assert_eq!(report.successes, 2);
        assert_eq!(report.failures, 1);
        assert_eq!(report.outcomes[2].output, Some(PathBuf::from("/out/c.ok")));
        assert!(report.outcomes[1].error.as_deref().unwrap().contains("BAD"));
    }

    #[test]
    fn events_follow_file_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let callback: BatchProgressCallback = Arc::new(move |event: BatchProgressEvent| {
            sink.lock().unwrap().push((event.kind, event.index, event.message));
        });

        let files = vec![PathBuf::from("x.bad"), PathBuf::from("y.ok")];
        run_batch_with_progress(&fake_converter, &files, Path::new("/out"), Some(callback));

        let events = events.lock().unwrap();
        let kinds: Vec<_> = events.iter().map(|(kind, index, _)| (*kind, *index)).collect();
        assert_eq!(
            kinds,
            vec![
                (BatchProgressEventKind::Started, 0),
                (BatchProgressEventKind::FileStarted, 1),
                (BatchProgressEventKind::FileFailed, 1),
                (BatchProgressEventKind::FileStarted, 2),
                (BatchProgressEventKind::FileConverted, 2),
                (BatchProgressEventKind::Finished, 2),
            ]
        );
        assert_eq!(events[1].2, "Converting: 1/2");
        assert_eq!(events[3].2, "Converting: 2/2");
        assert_eq!(events[5].2, "Done! 1/2");
    }

    #[test]
    fn empty_batch_reports_nothing() {
        let report = run_batch(&fake_converter, &[], Path::new("/out"));
        assert_eq!(report.total, 0);
        assert_eq!(report.done_label(), "Done! 0/0");
    }

    #[test]
    fn summary_mentions_failures_only_when_present() {
        let mut report = BatchReport {
            destination: PathBuf::from("/out"),
            total: 2,
            successes: 2,
            failures: 0,
            outcomes: Vec::new(),
        };
        assert_eq!(report.summary(), "Conversion finished!\n\n✓ Succeeded: 2\n\nFiles in:\n/out");

        report.successes = 1;
        report.failures = 1;
        assert!(report.summary().contains("✗ Failed: 1\n"));
    }
}
