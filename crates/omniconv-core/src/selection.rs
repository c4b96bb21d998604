//! The ordered list of files picked for the next batch.

use std::path::{Path, PathBuf};

/// Names listed before the remainder is collapsed into "... and K more files".
pub const LISTING_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: Vec<PathBuf>,
}

impl Selection {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Replace the selection with a dialog result.
    ///
    /// An empty result means the dialog was cancelled; the previous selection
    /// is kept and `false` is returned.
    pub fn replace(&mut self, paths: Vec<PathBuf>) -> bool {
        if paths.is_empty() {
            return false;
        }
        self.paths = paths;
        true
    }

    /// Human-readable listing for the panel's file label.
    pub fn listing(&self) -> String {
        if self.paths.is_empty() {
            return "No file selected".to_string();
        }

        let mut text = format!("{} file(s) selected:\n\n", self.paths.len());
        let names: Vec<String> = self
            .paths
            .iter()
            .take(LISTING_LIMIT)
            .map(|path| display_name(path))
            .collect();
        text.push_str(&names.join("\n"));
        if self.paths.len() > LISTING_LIMIT {
            text.push_str(&format!(
                "\n... and {} more files",
                self.paths.len() - LISTING_LIMIT
            ));
        }
        text
    }
}

/// Base name of a path, falling back to the full path when it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
