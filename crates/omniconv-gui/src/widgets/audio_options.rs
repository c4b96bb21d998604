//! Audio panel options

use super::choice_combo;
use omniconv_core::{AudioFormat, AudioSettings, Bitrate};

pub fn render(ui: &mut egui::Ui, settings: &mut AudioSettings) -> bool {
    let mut changed = choice_combo(
        ui,
        "audio_target",
        "Convert to:",
        &mut settings.target,
        &AudioFormat::ALL,
        AudioFormat::label,
    );

    let presets: Vec<Bitrate> = Bitrate::presets().collect();
    ui.add_enabled_ui(settings.target.uses_bitrate(), |ui| {
        ui.horizontal(|ui| {
            ui.label("Bitrate:");
            egui::ComboBox::from_id_salt("audio_bitrate")
                .selected_text(settings.bitrate.to_string())
                .show_ui(ui, |ui| {
                    for bitrate in &presets {
                        if ui
                            .selectable_value(&mut settings.bitrate, *bitrate, bitrate.to_string())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });
        });
    });

    changed
}
