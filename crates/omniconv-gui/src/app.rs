//! Main application structure for the Omniconv GUI

use crate::async_bridge::{AsyncBridge, BatchUpdate};
use crate::dialogs;
use crate::processor;
use crate::state::{AppState, ProcessorState, ProgressInfo};
use crate::ui_state::{LogEntry, LogLevel, Theme, UiState};
use crate::widgets;
use crate::widgets::menu::MenuAction;
use chrono::Local;
use omniconv_core::{
    BatchProgressEventKind, BatchReport, Capabilities, Category, FileConfig, StartError, View,
};
use tracing::{info, warn};

/// Main application struct implementing eframe::App
pub struct OmniconvApp {
    /// Domain state
    state: AppState,

    /// UI state
    ui_state: UiState,

    /// Async runtime bridge
    async_bridge: AsyncBridge,
}

impl OmniconvApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: FileConfig,
        capabilities: Capabilities,
        async_bridge: AsyncBridge,
    ) -> Self {
        let ui_state = UiState::new(config.ui.theme.into(), config.ui.show_technical_log);
        let mut app = Self {
            state: AppState::new(config, capabilities),
            ui_state,
            async_bridge,
        };

        app.add_log(LogLevel::Info, "Application started");
        for missing in app.state.capabilities.missing() {
            app.add_log(LogLevel::Warning, missing.summary);
        }

        app
    }

    /// Add a log entry
    fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.ui_state.add_log_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }

    /// Apply theme to egui context
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.ui_state.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    fn persist_ui_preferences(&mut self) {
        self.state.config.ui.theme = self.ui_state.theme.into();
        self.state.config.ui.show_technical_log = self.ui_state.technical_log_expanded;
        if let Err(e) = self.state.save_config() {
            self.add_log(LogLevel::Error, format!("Failed to save config: {e}"));
        }
    }

    /// Handle updates from the running batch
    fn handle_batch_update(&mut self, update: BatchUpdate) {
        if let Some((level, line)) = processor::log_line(&update) {
            self.add_log(level, line);
        }

        match update {
            BatchUpdate::Progress(event) => {
                if let ProcessorState::Running { ref mut progress } = self.state.processor_state {
                    progress.total = event.total;
                    progress.elapsed_ms = event.elapsed_ms;
                    match event.kind {
                        BatchProgressEventKind::FileStarted => progress.label = event.message,
                        BatchProgressEventKind::FileConverted
                        | BatchProgressEventKind::FileFailed => progress.finished = event.index,
                        BatchProgressEventKind::Started | BatchProgressEventKind::Finished => {}
                    }
                }
            }
            BatchUpdate::Finished(report) => {
                self.async_bridge.clear_progress_receiver();
                self.state.processor_state = ProcessorState::Completed {
                    report: report.clone(),
                };
                self.show_completion(&report);
            }
            BatchUpdate::Aborted { error } => {
                self.async_bridge.clear_progress_receiver();
                self.state.processor_state = ProcessorState::Error {
                    message: error.clone(),
                };
                dialogs::error("Conversion stopped", &error);
            }
        }
    }

    fn show_completion(&mut self, report: &BatchReport) {
        if !dialogs::completion(report) {
            return;
        }
        if let Err(e) = open::that(&report.destination) {
            warn!(error = %e, path = %report.destination.display(), "Could not open output folder");
            self.add_log(
                LogLevel::Warning,
                format!("Could not open {}: {e}", report.destination.display()),
            );
        }
    }

    /// Validate the panel, ask for a destination and hand the batch to the worker
    fn start_conversion(&mut self, ctx: &egui::Context, category: Category) {
        let settings = self.state.settings_for(category);
        let plan = match self.state.session.prepare_batch(&settings) {
            Ok(plan) => plan,
            Err(StartError::NoFiles) => {
                dialogs::warning("Warning", &StartError::NoFiles.to_string());
                return;
            }
            Err(StartError::Settings(e)) => {
                dialogs::error("Error", &e.to_string());
                return;
            }
        };

        let start = self.state.last_output_directory();
        let Some(destination) = dialogs::pick_output_directory(start.as_deref()) else {
            return;
        };

        self.state.remember_batch(&destination);
        if let Err(e) = self.state.save_config() {
            self.add_log(LogLevel::Error, format!("Failed to save config: {e}"));
        }

        let total = plan.files.len();
        info!(category = category.label(), files = total, destination = %destination.display(), "Starting batch");

        match processor::start_batch(
            &self.async_bridge,
            plan,
            destination,
            self.state.capabilities.clone(),
            ctx.clone(),
        ) {
            Ok(rx) => {
                self.async_bridge.register_progress_receiver(rx);
                self.state.processor_state = ProcessorState::Running {
                    progress: ProgressInfo {
                        label: omniconv_core::progress_label(0, total),
                        total,
                        ..ProgressInfo::default()
                    },
                };
            }
            Err(e) => {
                self.add_log(LogLevel::Error, format!("Failed to start conversion: {e}"));
                self.state.processor_state = ProcessorState::Error {
                    message: format!("Failed to start: {e}"),
                };
            }
        }
    }

    /// Render the top panel with title and theme toggle
    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Omniconv");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.ui_state.theme {
                        Theme::Dark => "☀ Light",
                        Theme::Light => "🌙 Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.ui_state.theme = self.ui_state.theme.toggled();
                        self.persist_ui_preferences();
                    }
                });
            });
        });
    }

    fn render_main_menu(&mut self, ui: &mut egui::Ui) {
        match widgets::menu::render(ui, &self.state.capabilities) {
            Some(MenuAction::Open(category)) => {
                self.add_log(LogLevel::Info, format!("Opened {} panel", category.label()));
                self.state.open_category(category);
            }
            Some(MenuAction::Locked(category)) => {
                let guidance = self.state.capabilities.guidance_for(category);
                dialogs::info("Feature unavailable", &guidance);
            }
            None => {}
        }
    }

    fn render_category_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, category: Category) {
        let running = self.state.is_running();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(
                    egui::RichText::new(format!("{} {}", category.icon(), category.label()))
                        .size(26.0)
                        .strong(),
                );
                ui.label(category.formats_caption());
                ui.add_space(12.0);

                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    if widgets::file_list::render(ui, self.state.session.selection(), !running) {
                        let picked = dialogs::pick_files(category);
                        let count = picked.len();
                        if self.state.session.select_files(picked) {
                            self.add_log(LogLevel::Info, format!("Selected {count} file(s)"));
                        }
                    }
                });

                ui.add_space(8.0);

                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.heading("Options");
                    ui.add_enabled_ui(!running, |ui| {
                        let settings = &mut self.state.settings;
                        match category {
                            Category::Image => widgets::image_options::render(ui, &mut settings.image),
                            Category::Document => {
                                widgets::document_options::render(ui, &mut settings.document)
                            }
                            Category::Audio => widgets::audio_options::render(ui, &mut settings.audio),
                            Category::Video => widgets::video_options::render(ui, &mut settings.video),
                        };
                    });
                });

                ui.add_space(16.0);
                ui.separator();

                let button = egui::Button::new(egui::RichText::new("▶ Convert").size(24.0))
                    .fill(egui::Color32::from_rgb(0, 150, 0))
                    .min_size(egui::vec2(ui.available_width(), 60.0));
                if ui.add_enabled(!running, button).clicked() {
                    self.start_conversion(ctx, category);
                }

                ui.add_space(8.0);
                widgets::progress_display::render(ui, &self.state.processor_state);
                ui.separator();
                ui.add_space(8.0);

                let log_response = egui::CollapsingHeader::new("Technical Log")
                    .default_open(self.ui_state.technical_log_expanded)
                    .show(ui, |ui| {
                        widgets::technical_log::render(ui, &mut self.ui_state);
                    });
                if log_response.header_response.clicked() {
                    self.ui_state.technical_log_expanded = !self.ui_state.technical_log_expanded;
                    self.persist_ui_preferences();
                }

                ui.add_space(12.0);
                if ui.add_enabled(!running, egui::Button::new("← Back")).clicked() {
                    self.state.return_to_menu();
                }
            });
    }
}

impl eframe::App for OmniconvApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        // Collect first so the handler can borrow self mutably
        let mut updates = Vec::new();
        self.async_bridge.poll_progress(|update| updates.push(update));
        for update in updates {
            self.handle_batch_update(update);
        }

        self.render_top_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.state.session.view() {
            View::MainMenu => self.render_main_menu(ui),
            View::Category(category) => self.render_category_panel(ctx, ui, category),
        });
    }
}
