//! Progress display widget

use crate::state::ProcessorState;

/// Render the progress label and bar under the convert button
pub fn render(ui: &mut egui::Ui, state: &ProcessorState) {
    match state {
        ProcessorState::Running { progress } => {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&progress.label).strong());
                ui.add(egui::ProgressBar::new(progress.fraction()).show_percentage());
                ui.label(format!("Elapsed: {:.1}s", progress.elapsed_ms / 1000.0));
            });
        }
        ProcessorState::Completed { report } => {
            let color = if report.failures == 0 {
                egui::Color32::GREEN
            } else {
                egui::Color32::from_rgb(255, 165, 0)
            };
            ui.colored_label(color, state.label());
        }
        ProcessorState::Error { message } => {
            ui.colored_label(egui::Color32::RED, format!("✗ {message}"));
        }
        ProcessorState::Idle => {
            // Nothing to show
        }
    }
}
