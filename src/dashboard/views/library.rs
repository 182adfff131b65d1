//! Library view - searchable list of games

use egui::RichText;

use crate::dashboard::components::render_game_row;
use crate::dashboard::controller::UiAction;
use crate::dashboard::state::DashboardState;
use crate::dashboard::theme::ThemeColors;

/// Render the search bar and the game list
pub fn render_library_view(ui: &mut egui::Ui, state: &DashboardState, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        let mut query = state.filter.query.clone();
        let search = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search games")
                .desired_width(320.0),
        );
        if search.changed() {
            actions.push(UiAction::SetQuery(query));
        }
        if state.filter.clear_visible && ui.small_button("✖").on_hover_text("Clear search").clicked() {
            actions.push(UiAction::ClearQuery);
        }

        ui.add_space(16.0);

        let mut downloads_only = state.filter.downloads_only;
        if ui.checkbox(&mut downloads_only, "Downloading only").changed() {
            actions.push(UiAction::ToggleDownloadsOnly);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!(
                    "{} of {} games",
                    state.library.visible_count(),
                    state.library.len()
                ))
                .color(ThemeColors::TEXT_MUTED),
            );
        });
    });

    ui.add_space(12.0);

    if state.library.is_empty() {
        ui.label(
            RichText::new("No games found. Check the lgogdownloader cache directory in config.toml.")
                .color(ThemeColors::TEXT_SECONDARY),
        );
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for row in state.library.iter().filter(|r| r.visible) {
                render_game_row(ui, row, actions);
                ui.add_space(4.0);
            }
        });
}
