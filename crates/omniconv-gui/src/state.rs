//! Application state management for the Omniconv GUI

use omniconv_core::config::FileConfig;
use omniconv_core::{
    AudioSettings, BatchReport, Capabilities, Category, ConversionSettings, DocumentFormat,
    DocumentSettings, ImageSettings, Session, VideoSettings,
};
use std::path::{Path, PathBuf};

/// Main application state (domain/persistent)
pub struct AppState {
    /// Configuration loaded at startup; rewritten when a batch starts
    pub config: FileConfig,

    /// Backends detected at startup
    pub capabilities: Capabilities,

    /// Visible panel and selected files
    pub session: Session,

    /// Per-panel settings, seeded from the configured defaults
    pub settings: PanelSettings,

    /// Current processor state
    pub processor_state: ProcessorState,
}

impl AppState {
    pub fn new(config: FileConfig, capabilities: Capabilities) -> Self {
        let mut settings = PanelSettings::from_config(&config);
        if !DocumentFormat::available().contains(&settings.document.target) {
            settings.document = DocumentSettings::default();
        }

        Self {
            config,
            capabilities,
            session: Session::new(),
            settings,
            processor_state: ProcessorState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.processor_state, ProcessorState::Running { .. })
    }

    /// Settings of the given panel as the batch driver expects them.
    pub fn settings_for(&self, category: Category) -> ConversionSettings {
        match category {
            Category::Image => ConversionSettings::Image(self.settings.image.clone()),
            Category::Document => ConversionSettings::Document(self.settings.document.clone()),
            Category::Audio => ConversionSettings::Audio(self.settings.audio.clone()),
            Category::Video => ConversionSettings::Video(self.settings.video.clone()),
        }
    }

    /// Directory the output picker should open in, if it still exists.
    pub fn last_output_directory(&self) -> Option<PathBuf> {
        self.config
            .ui
            .last_output_directory
            .as_deref()
            .map(PathBuf::from)
            .filter(|path| path.is_dir())
    }

    /// Copy the panel settings and chosen destination into the persisted config.
    pub fn remember_batch(&mut self, destination: &Path) {
        self.config.defaults.image = self.settings.image.clone();
        self.config.defaults.document = self.settings.document.clone();
        self.config.defaults.audio = self.settings.audio.clone();
        self.config.defaults.video = self.settings.video.clone();
        self.config.ui.last_output_directory = Some(destination.display().to_string());
    }

    /// Leave the category panel; any finished batch result is dropped with it.
    pub fn return_to_menu(&mut self) {
        self.session.return_to_menu();
        self.processor_state = ProcessorState::Idle;
    }

    pub fn open_category(&mut self, category: Category) {
        self.session.open_category(category);
        self.processor_state = ProcessorState::Idle;
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<(), String> {
        omniconv_core::save_config(&self.config).map_err(|e| e.to_string())
    }
}

/// Editable settings for every panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelSettings {
    pub image: ImageSettings,
    pub document: DocumentSettings,
    pub audio: AudioSettings,
    pub video: VideoSettings,
}

impl PanelSettings {
    pub fn from_config(config: &FileConfig) -> Self {
        Self {
            image: config.defaults.image.clone(),
            document: config.defaults.document.clone(),
            audio: config.defaults.audio.clone(),
            video: config.defaults.video.clone(),
        }
    }
}

/// Current state of the processor
#[derive(Clone, Debug)]
pub enum ProcessorState {
    /// No batch has run on this panel yet
    Idle,

    /// A batch is converting files
    Running { progress: ProgressInfo },

    /// The last batch finished
    Completed { report: BatchReport },

    /// The batch task itself died (a conversion error never lands here)
    Error { message: String },
}

impl ProcessorState {
    /// Text for the progress label under the convert button.
    pub fn label(&self) -> String {
        match self {
            ProcessorState::Idle => String::new(),
            ProcessorState::Running { progress } => progress.label.clone(),
            ProcessorState::Completed { report } => report.done_label(),
            ProcessorState::Error { message } => message.clone(),
        }
    }
}

/// Progress information for active processing
#[derive(Clone, Debug, Default)]
pub struct ProgressInfo {
    /// e.g. `Converting: 2/5`
    pub label: String,

    /// Files finished so far, successful or not
    pub finished: usize,

    pub total: usize,

    /// Elapsed time in milliseconds
    pub elapsed_ms: f64,
}

impl ProgressInfo {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.finished as f32 / self.total as f32
        }
    }
}
