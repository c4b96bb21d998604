//! Select-files button and the listing of the current selection

use omniconv_core::Selection;

/// Render the selection area. Returns true when "Select files" was clicked.
pub fn render(ui: &mut egui::Ui, selection: &Selection, enabled: bool) -> bool {
    let clicked = ui
        .add_enabled(
            enabled,
            egui::Button::new(egui::RichText::new("📁 Select files").size(16.0))
                .min_size(egui::vec2(180.0, 32.0)),
        )
        .clicked();

    ui.add_space(4.0);
    let text = egui::RichText::new(selection.listing());
    if selection.is_empty() {
        ui.label(text.weak());
    } else {
        ui.label(text);
    }

    clicked
}
