//! Runs a prepared batch on the bridge runtime and reports back over a channel

use crate::async_bridge::{AsyncBridge, BatchUpdate};
use crate::ui_state::LogLevel;
use omniconv_core::{
    BatchPlan, BatchProgressCallback, BatchProgressEvent, BatchProgressEventKind, Capabilities,
    Converter, run_batch_with_progress,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::error;

/// Start converting `plan` into `destination`.
///
/// Files are converted one at a time on a blocking worker; every update also
/// requests a repaint so the progress label stays current.
pub fn start_batch(
    bridge: &AsyncBridge,
    plan: BatchPlan,
    destination: PathBuf,
    capabilities: Capabilities,
    ctx: egui::Context,
) -> Result<mpsc::UnboundedReceiver<BatchUpdate>, String> {
    let runtime = bridge
        .runtime()
        .ok_or_else(|| "background runtime is not running".to_string())?;
    let (tx, rx) = mpsc::unbounded_channel();

    let progress_tx = tx.clone();
    let progress_ctx = ctx.clone();
    let callback: BatchProgressCallback = Arc::new(move |event: BatchProgressEvent| {
        let _ = progress_tx.send(BatchUpdate::Progress(event));
        progress_ctx.request_repaint();
    });

    let worker = runtime.spawn_blocking(move || {
        let converter = Converter::new(&plan.job, &capabilities);
        run_batch_with_progress(&converter, &plan.files, &destination, Some(callback))
    });

    runtime.spawn(async move {
        let update = match worker.await {
            Ok(report) => BatchUpdate::Finished(report),
            Err(err) => {
                error!(error = %err, "Batch task aborted");
                BatchUpdate::Aborted {
                    error: format!("Conversion stopped unexpectedly: {err}"),
                }
            }
        };
        let _ = tx.send(update);
        ctx.request_repaint();
    });

    Ok(rx)
}

/// Technical log line for a batch update.
pub fn log_line(update: &BatchUpdate) -> Option<(LogLevel, String)> {
    match update {
        BatchUpdate::Progress(event) => match event.kind {
            BatchProgressEventKind::Started | BatchProgressEventKind::FileConverted => {
                Some((LogLevel::Info, event.message.clone()))
            }
            BatchProgressEventKind::FileFailed => Some((LogLevel::Error, event.message.clone())),
            BatchProgressEventKind::FileStarted | BatchProgressEventKind::Finished => None,
        },
        BatchUpdate::Finished(report) => {
            let level = if report.failures > 0 {
                LogLevel::Warning
            } else {
                LogLevel::Info
            };
            Some((
                level,
                format!(
                    "Batch finished: {} succeeded, {} failed",
                    report.successes, report.failures
                ),
            ))
        }
        BatchUpdate::Aborted { error } => Some((LogLevel::Error, error.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniconv_core::BatchReport;

    fn event(kind: BatchProgressEventKind, message: &str) -> BatchUpdate {
        BatchUpdate::Progress(BatchProgressEvent {
            kind,
            index: 1,
            total: 1,
            path: None,
            message: message.to_string(),
            elapsed_ms: 0.0,
        })
    }

    #[test]
    fn failures_are_logged_as_errors() {
        let line = log_line(&event(BatchProgressEventKind::FileFailed, "Error converting a.png"));
        assert_eq!(line, Some((LogLevel::Error, "Error converting a.png".to_string())));
    }

    #[test]
    fn per_file_start_is_not_logged() {
        assert_eq!(log_line(&event(BatchProgressEventKind::FileStarted, "Converting: 1/1")), None);
    }

    #[test]
    fn partial_batches_are_warnings() {
        let report = BatchReport {
            destination: PathBuf::from("/out"),
            total: 3,
            successes: 2,
            failures: 1,
            outcomes: Vec::new(),
        };
        let (level, message) = log_line(&BatchUpdate::Finished(report)).unwrap();
        assert_eq!(level, LogLevel::Warning);
        assert!(message.contains("2 succeeded, 1 failed"));
    }
}
