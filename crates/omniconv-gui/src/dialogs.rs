//! Native file, folder and message dialogs

use omniconv_core::{BatchReport, Category};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};

const OPEN_FOLDER: &str = "Open folder";
const CLOSE: &str = "Close";

/// Open a multi-file picker filtered to the category's inputs.
///
/// Returns an empty list when the dialog is cancelled.
pub fn pick_files(category: Category) -> Vec<PathBuf> {
    rfd::FileDialog::new()
        .set_title(format!("Select {} files", category.label().to_lowercase()))
        .add_filter(format!("{} files", category.label()), category.input_extensions())
        .add_filter("All files", &["*"])
        .pick_files()
        .unwrap_or_default()
}

/// Pick output directory
pub fn pick_output_directory(start: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Select output folder");
    if let Some(dir) = start {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_folder()
}

fn message(level: MessageLevel, title: &str, description: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn warning(title: &str, description: &str) {
    message(MessageLevel::Warning, title, description);
}

pub fn error(title: &str, description: &str) {
    message(MessageLevel::Error, title, description);
}

pub fn info(title: &str, description: &str) {
    message(MessageLevel::Info, title, description);
}

/// Show the batch summary; true when the user asked to open the folder.
pub fn completion(report: &BatchReport) -> bool {
    let result = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Complete")
        .set_description(report.summary())
        .set_buttons(MessageButtons::OkCancelCustom(
            OPEN_FOLDER.to_string(),
            CLOSE.to_string(),
        ))
        .show();
    matches!(result, MessageDialogResult::Custom(label) if label == OPEN_FOLDER)
}
