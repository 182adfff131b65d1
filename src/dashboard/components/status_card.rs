//! Status card component for the dashboard header

use egui::{Color32, RichText, Rounding, Vec2};
use crate::dashboard::state::UserIcon;
use crate::dashboard::theme::ThemeColors;

/// A compact card with a status dot, a title and a value
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub status: CardStatus,
    pub icon: Option<UserIcon>,
}

/// Status types for cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardStatus {
    Active,
    Busy,
    Inactive,
    Warning,
}

impl CardStatus {
    pub fn color(&self) -> Color32 {
        match self {
            CardStatus::Active => ThemeColors::ACCENT_SUCCESS,
            CardStatus::Busy => ThemeColors::ACCENT_PRIMARY,
            CardStatus::Inactive => ThemeColors::TEXT_SECONDARY,
            CardStatus::Warning => ThemeColors::ACCENT_WARNING,
        }
    }

    /// Card status matching a session icon
    pub fn for_icon(icon: UserIcon) -> Self {
        match icon {
            UserIcon::User => CardStatus::Active,
            UserIcon::Spinner => CardStatus::Busy,
            UserIcon::Warning => CardStatus::Warning,
            UserIcon::SignIn => CardStatus::Inactive,
        }
    }
}

impl StatusCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, status: CardStatus) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            status,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: UserIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(8.0))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_min_width(160.0);

                ui.horizontal(|ui| {
                    let dot_center = ui.cursor().left_top() + Vec2::new(6.0, 12.0);
                    ui.painter().circle_filled(dot_center, 4.0, self.status.color());
                    ui.add_space(16.0);

                    match self.icon {
                        Some(UserIcon::Spinner) => {
                            ui.add(egui::Spinner::new().size(16.0));
                        }
                        Some(icon) => {
                            ui.label(RichText::new(icon.glyph()).size(16.0));
                        }
                        None => {}
                    }

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&self.title)
                                .size(11.0)
                                .color(ThemeColors::TEXT_MUTED)
                        );
                        ui.label(
                            RichText::new(&self.value)
                                .size(15.0)
                                .color(ThemeColors::TEXT_PRIMARY)
                                .strong()
                        );
                    });
                });
            })
            .response
    }
}
