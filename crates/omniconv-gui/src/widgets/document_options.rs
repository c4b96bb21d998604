//! Document panel options

use super::choice_combo;
use omniconv_core::{DocumentFormat, DocumentSettings};

/// Render document options; only formats built into this binary are offered.
pub fn render(ui: &mut egui::Ui, settings: &mut DocumentSettings) -> bool {
    let available = DocumentFormat::available();
    let changed = choice_combo(
        ui,
        "document_target",
        "Convert to:",
        &mut settings.target,
        &available,
        DocumentFormat::label,
    );
    ui.small("Supported: PDF → TXT, DOCX → TXT, TXT → DOCX, PDF → PDF (recompress)");
    changed
}
