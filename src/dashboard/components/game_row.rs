//! One game of the library list

use egui::{Align, Layout, RichText, Rounding};

use crate::dashboard::controller::UiAction;
use crate::dashboard::state::{GameRow, PlatformControl};
use crate::dashboard::theme::{ThemeColors, color_with_alpha};
use crate::shared::DashboardCommand;

/// Small toggle button for a platform; returns true when clicked
pub fn platform_toggle(ui: &mut egui::Ui, control: &PlatformControl) -> bool {
    let (fill, text) = if control.disabled {
        (ThemeColors::PLATFORM_OFF, ThemeColors::TEXT_MUTED)
    } else {
        (color_with_alpha(ThemeColors::PLATFORM_ON, 90), ThemeColors::TEXT_PRIMARY)
    };
    ui.add(
        egui::Button::new(RichText::new(control.platform.short_label()).size(12.0).color(text))
            .fill(fill)
            .rounding(Rounding::same(4.0)),
    )
    .on_hover_text(control.platform.name())
    .clicked()
}

/// Render a game row, queueing any action the user takes
pub fn render_game_row(ui: &mut egui::Ui, row: &GameRow, actions: &mut Vec<UiAction>) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(Rounding::same(6.0))
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&row.title).color(ThemeColors::TEXT_PRIMARY).strong());
                    ui.label(RichText::new(&row.id).size(11.0).color(ThemeColors::TEXT_MUTED));
                });

                ui.add_space(12.0);

                for control in &row.platforms {
                    if platform_toggle(ui, control) {
                        actions.push(UiAction::Command(DashboardCommand::TogglePlatform {
                            game: row.id.clone(),
                            platform: control.platform,
                        }));
                    }
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if row.download_visible && ui.button("Download").clicked() {
                        actions.push(UiAction::Command(DashboardCommand::StartDownload {
                            game: row.id.clone(),
                        }));
                    }
                    if row.update_visible && ui.button("Update").clicked() {
                        actions.push(UiAction::Command(DashboardCommand::StartDownload {
                            game: row.id.clone(),
                        }));
                    }
                    if row.progress_visible {
                        if ui
                            .add(egui::Button::new(RichText::new("Stop").color(egui::Color32::WHITE))
                                .fill(ThemeColors::ACCENT_ERROR))
                            .clicked()
                        {
                            actions.push(UiAction::Command(DashboardCommand::StopDownload {
                                game: row.id.clone(),
                            }));
                        }
                        let text = if row.progress_text.is_empty() { "0 %" } else { row.progress_text.as_str() };
                        ui.label(RichText::new(text).monospace());
                    }
                    if row.spinner_visible {
                        ui.add(egui::Spinner::new());
                    }
                    if row.repo_visible {
                        ui.label(RichText::new("✔ In repository").color(ThemeColors::ACCENT_SUCCESS));
                    }
                });
            });
        });
}
