//! Which panel is visible and which files are selected.

use std::path::PathBuf;
use thiserror::Error;

use crate::category::Category;
use crate::selection::Selection;
use crate::settings::{ConversionJob, ConversionSettings, SettingsError};

/// Why pressing convert did not lead to a destination prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Please select files first")]
    NoFiles,
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Files and validated settings for a batch still waiting on its destination.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub files: Vec<PathBuf>,
    pub job: ConversionJob,
}

/// The single visible view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    MainMenu,
    Category(Category),
}

/// Navigation state shared by every panel.
///
/// Every transition clears the selection, so a batch can only ever use files
/// picked on the panel it is started from.
#[derive(Debug, Clone, Default)]
pub struct Session {
    view: View,
    selection: Selection,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn active_category(&self) -> Option<Category> {
        match self.view {
            View::MainMenu => None,
            View::Category(category) => Some(category),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn open_category(&mut self, category: Category) {
        self.view = View::Category(category);
        self.selection.clear();
    }

    pub fn return_to_menu(&mut self) {
        self.view = View::MainMenu;
        self.selection.clear();
    }

    /// Store a file dialog result; see [`Selection::replace`].
    pub fn select_files(&mut self, paths: Vec<PathBuf>) -> bool {
        self.selection.replace(paths)
    }

    /// Checks run before asking for an output directory: files first, then settings.
    pub fn prepare_batch(&self, settings: &ConversionSettings) -> Result<BatchPlan, StartError> {
        if self.selection.is_empty() {
            return Err(StartError::NoFiles);
        }
        Ok(BatchPlan {
            files: self.selection.paths().to_vec(),
            job: settings.resolve()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ImageSettings;

    fn picked() -> Vec<PathBuf> {
        vec![PathBuf::from("a.png"), PathBuf::from("b.png")]
    }

    #[test]
    fn starts_on_main_menu() {
        let session = Session::new();
        assert_eq!(session.view(), View::MainMenu);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn switching_category_clears_selection() {
        let mut session = Session::new();
        session.open_category(Category::Image);
        session.select_files(picked());
        assert_eq!(session.selection().len(), 2);

        session.open_category(Category::Audio);
        assert_eq!(session.active_category(), Some(Category::Audio));
        assert_eq!(session.selection().len(), 0);
    }

    #[test]
    fn reopening_same_category_clears_selection() {
        let mut session = Session::new();
        session.open_category(Category::Video);
        session.select_files(picked());
        session.open_category(Category::Video);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn returning_to_menu_clears_selection() {
        let mut session = Session::new();
        session.open_category(Category::Document);
        session.select_files(picked());
        session.return_to_menu();
        assert_eq!(session.view(), View::MainMenu);
        assert_eq!(session.active_category(), None);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn empty_selection_is_reported_before_settings() {
        let mut session = Session::new();
        session.open_category(Category::Image);
        let invalid = ConversionSettings::Image(ImageSettings {
            resize: true,
            width: "wide".into(),
            ..ImageSettings::default()
        });
        assert_eq!(session.prepare_batch(&invalid), Err(StartError::NoFiles));

        session.select_files(picked());
        assert!(matches!(
            session.prepare_batch(&invalid),
            Err(StartError::Settings(SettingsError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn plan_keeps_selection_order() {
        let mut session = Session::new();
        session.open_category(Category::Image);
        session.select_files(picked());
        let plan = session
            .prepare_batch(&ConversionSettings::Image(ImageSettings::default()))
            .unwrap();
        assert_eq!(plan.files, picked());
        assert_eq!(plan.job.category(), Category::Image);
    }
}
