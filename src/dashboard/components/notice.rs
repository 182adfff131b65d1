//! Non-blocking failure banner

use egui::RichText;

use crate::dashboard::state::Notice;
use crate::dashboard::theme::{ThemeColors, color_with_alpha};

/// Render the banner; returns true when the user closes it
pub fn render_notice(ui: &mut egui::Ui, notice: &Notice) -> bool {
    let mut dismissed = false;
    egui::Frame::none()
        .fill(color_with_alpha(ThemeColors::ACCENT_ERROR, 51))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{} failed:", notice.action)).color(ThemeColors::ACCENT_ERROR).strong());
                ui.label(RichText::new(&notice.reason).color(ThemeColors::TEXT_PRIMARY));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✖").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}
