//! Main menu: one button per category

use omniconv_core::{Capabilities, Category};

/// What the user clicked on the main menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Open(Category),
    Locked(Category),
}

/// Render the category buttons. Locked categories stay clickable so they can explain themselves.
pub fn render(ui: &mut egui::Ui, capabilities: &Capabilities) -> Option<MenuAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading(egui::RichText::new("Omniconv").size(32.0).strong());
        ui.label("Choose what you want to convert");
        ui.add_space(24.0);

        for category in Category::ALL {
            let available = capabilities.category_available(category);
            let mut text = format!("{}  {}", category.icon(), category.label());
            if !available {
                text.push_str("  🔒");
            }

            let mut button = egui::Button::new(egui::RichText::new(text).size(20.0))
                .min_size(egui::vec2(280.0, 56.0));
            if !available {
                button = button.fill(egui::Color32::from_gray(90));
            }

            if ui.add(button).on_hover_text(category.formats_caption()).clicked() {
                action = Some(if available {
                    MenuAction::Open(category)
                } else {
                    MenuAction::Locked(category)
                });
            }
            ui.add_space(8.0);
        }
    });

    action
}
