//! Omniconv GUI built on eframe/egui
//!
//! Four category panels share one navigation flow: select files, configure,
//! pick an output directory, convert, report.

pub mod app;
pub mod async_bridge;
pub mod dialogs;
pub mod processor;
pub mod state;
pub mod ui_state;
pub mod widgets;

use omniconv_core::{Capabilities, FileConfig};

/// Main entry point for the GUI
pub fn run(
    config: FileConfig,
    capabilities: Capabilities,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let async_bridge = async_bridge::AsyncBridge::new()?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([560.0, 600.0])
            .with_resizable(true)
            .with_title("Omniconv"),
        ..Default::default()
    };

    eframe::run_native(
        "Omniconv",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(app::OmniconvApp::new(
                cc,
                config,
                capabilities,
                async_bridge,
            )))
        }),
    )
    .map_err(|e| format!("{e:?}"))?;

    Ok(())
}
