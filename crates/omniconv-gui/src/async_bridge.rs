//! Async runtime bridge for running batches off the egui thread

use omniconv_core::{BatchProgressEvent, BatchReport};
use std::io;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Bridge between the tokio runtime and egui
pub struct AsyncBridge {
    /// Tokio runtime for background work (wrapped in Option for clean shutdown)
    runtime: Option<Runtime>,

    /// Channel for receiving batch updates
    progress_rx: Arc<Mutex<Option<mpsc::UnboundedReceiver<BatchUpdate>>>>,
}

/// Update sent from a running batch
#[derive(Clone, Debug)]
pub enum BatchUpdate {
    Progress(BatchProgressEvent),
    Finished(BatchReport),
    /// The batch task panicked or was cancelled by runtime shutdown
    Aborted { error: String },
}

impl AsyncBridge {
    /// Create a new async bridge
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("omniconv-batch")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime: Some(runtime),
            progress_rx: Arc::new(Mutex::new(None)),
        })
    }

    /// Runtime used to spawn batch tasks, `None` once shut down
    pub fn runtime(&self) -> Option<&Runtime> {
        self.runtime.as_ref()
    }

    /// Register a progress receiver
    pub fn register_progress_receiver(&self, rx: mpsc::UnboundedReceiver<BatchUpdate>) {
        if let Ok(mut guard) = self.progress_rx.lock() {
            *guard = Some(rx);
        }
    }

    /// Clear the progress receiver
    pub fn clear_progress_receiver(&self) {
        if let Ok(mut guard) = self.progress_rx.lock() {
            *guard = None;
        }
    }

    /// Drain pending updates into `handler`
    pub fn poll_progress<F>(&self, mut handler: F)
    where
        F: FnMut(BatchUpdate),
    {
        let Ok(mut guard) = self.progress_rx.lock() else {
            return;
        };
        if let Some(rx) = guard.as_mut() {
            while let Ok(update) = rx.try_recv() {
                handler(update);
            }
        }
    }
}

impl Drop for AsyncBridge {
    fn drop(&mut self) {
        // Dropping a runtime from inside egui's loop would block; shut it down in the background.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
