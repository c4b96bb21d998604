//! Image panel options: format, quality, optional resize

use super::choice_combo;
use omniconv_core::{ImageFormat, ImageSettings};

/// Render image options
/// Returns true if any value was changed
pub fn render(ui: &mut egui::Ui, settings: &mut ImageSettings) -> bool {
    ui.vertical(|ui| {
        let mut changed = choice_combo(
            ui,
            "image_target",
            "Convert to:",
            &mut settings.target,
            &ImageFormat::ALL,
            ImageFormat::label,
        );

        if ui
            .horizontal(|ui| {
                ui.label("Quality:")
                    .on_hover_text("Used by JPG; other formats ignore it");
                ui.add(egui::Slider::new(&mut settings.quality, 1..=100))
            })
            .inner
            .changed()
        {
            changed = true;
        }

        if ui.checkbox(&mut settings.resize, "Resize").changed() {
            changed = true;
        }

        ui.add_enabled_ui(settings.resize, |ui| {
            ui.horizontal(|ui| {
                ui.label("Width:");
                if ui
                    .add(egui::TextEdit::singleline(&mut settings.width).desired_width(80.0))
                    .changed()
                {
                    changed = true;
                }
                ui.label("Height:");
                if ui
                    .add(egui::TextEdit::singleline(&mut settings.height).desired_width(80.0))
                    .changed()
                {
                    changed = true;
                }
            });
        });

        changed
    })
    .inner
}
