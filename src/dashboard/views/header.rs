//! Header bar - session, download indicator and default platforms

use egui::RichText;

use crate::dashboard::components::{platform_toggle, CardStatus, StatusCard};
use crate::dashboard::controller::UiAction;
use crate::dashboard::state::DashboardState;
use crate::dashboard::theme::ThemeColors;
use crate::shared::DashboardCommand;

/// Render the header
pub fn render_header(ui: &mut egui::Ui, state: &DashboardState, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.heading(RichText::new("GOG Library").size(24.0).strong());
        ui.add_space(24.0);

        StatusCard::new(
            "Session",
            &state.user.status_line,
            CardStatus::for_icon(state.user.icon),
        )
        .with_icon(state.user.icon)
        .show(ui);

        if !state.bootstrapped {
            ui.add_space(12.0);
            ui.spinner();
            ui.label(RichText::new("Loading active downloads...").color(ThemeColors::TEXT_MUTED));
        }

        if state.downloads.visible {
            ui.add_space(12.0);
            let card = StatusCard::new(
                "Downloads in progress",
                format!("{}", state.downloads.count),
                CardStatus::Busy,
            )
            .show(ui)
            .interact(egui::Sense::click())
            .on_hover_text("Show only downloading games");
            if card.clicked() {
                actions.push(UiAction::ToggleDownloadsOnly);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            for control in state.default_platforms.iter().rev() {
                if platform_toggle(ui, control) {
                    actions.push(UiAction::Command(DashboardCommand::ToggleDefaultPlatform {
                        platform: control.platform,
                    }));
                }
            }
            ui.label(RichText::new("Default platforms:").color(ThemeColors::TEXT_MUTED));
        });
    });
}
