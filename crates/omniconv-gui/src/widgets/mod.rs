//! UI widgets for the Omniconv GUI

pub mod audio_options;
pub mod document_options;
pub mod file_list;
pub mod image_options;
pub mod menu;
pub mod progress_display;
pub mod technical_log;
pub mod video_options;

/// Labelled combo box over a closed set of choices.
/// Returns true if the selection changed.
pub(crate) fn choice_combo<T>(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    current: &mut T,
    choices: &[T],
    name: impl Fn(T) -> &'static str,
) -> bool
where
    T: Copy + PartialEq,
{
    ui.horizontal(|ui| {
        ui.label(label);
        let mut changed = false;
        egui::ComboBox::from_id_salt(id)
            .selected_text(name(*current))
            .show_ui(ui, |ui| {
                for choice in choices {
                    if ui.selectable_value(current, *choice, name(*choice)).changed() {
                        changed = true;
                    }
                }
            });
        changed
    })
    .inner
}
