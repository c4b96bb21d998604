//! Video panel options

use super::choice_combo;
use omniconv_core::{Resolution, VideoCodec, VideoFormat, VideoSettings};

pub fn render(ui: &mut egui::Ui, settings: &mut VideoSettings) -> bool {
    let mut changed = choice_combo(
        ui,
        "video_target",
        "Convert to:",
        &mut settings.target,
        &VideoFormat::ALL,
        VideoFormat::label,
    );
    changed |= choice_combo(
        ui,
        "video_codec",
        "Video codec:",
        &mut settings.codec,
        &VideoCodec::ALL,
        VideoCodec::label,
    );
    changed |= choice_combo(
        ui,
        "video_resolution",
        "Resolution:",
        &mut settings.resolution,
        &Resolution::ALL,
        Resolution::label,
    );

    if settings.codec == VideoCodec::Copy && settings.resolution != Resolution::Original {
        ui.colored_label(
            egui::Color32::from_rgb(255, 165, 0),
            "Stream copy keeps the original size; choose Original or another codec.",
        );
    }

    ui.add_space(4.0);
    ui.colored_label(
        egui::Color32::from_rgb(255, 165, 0),
        "⚠ Video conversion can take a while",
    );

    changed
}
