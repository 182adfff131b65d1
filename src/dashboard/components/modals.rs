//! Login and two-factor modals
//!
//! Both are informational: the login itself happens on the server's web
//! page. They are dismissed by clicking anywhere outside them.

use egui::{Align2, RichText};

use crate::dashboard::state::Modals;
use crate::dashboard::theme::ThemeColors;

/// Modal dialog kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Login,
    TwoFactor,
}

/// The dialog to draw; two-factor takes precedence when both are open
pub fn shown_modal(modals: &Modals) -> Option<ModalKind> {
    if modals.two_factor {
        Some(ModalKind::TwoFactor)
    } else if modals.login {
        Some(ModalKind::Login)
    } else {
        None
    }
}

/// Draw the open modal; returns true if a click landed outside it
pub fn render_modals(ctx: &egui::Context, modals: &Modals, server_url: &str) -> bool {
    let Some(kind) = shown_modal(modals) else {
        return false;
    };

    let response = match kind {
        ModalKind::Login => modal_window(ctx, "login", "Log in to GOG", |ui| {
            ui.label("The download manager has no GOG session.");
            ui.label("Sign in on the server's web page to continue.");
            ui.add_space(8.0);
            ui.hyperlink_to("Open server page", server_url);
        }),
        ModalKind::TwoFactor => modal_window(ctx, "2fa", "Two-factor authentication", |ui| {
            ui.label("GOG sent a security code to the account's e-mail address.");
            ui.label("Enter it on the server's web page to finish logging in.");
            ui.add_space(8.0);
            ui.hyperlink_to("Open server page", server_url);
        }),
    };
    let rect = response.map(|r| r.rect);

    ctx.input(|i| {
        i.pointer.any_click()
            && i
                .pointer
                .interact_pos()
                .map(|pos| !rect.is_some_and(|r| r.contains(pos)))
                .unwrap_or(false)
    })
}

fn modal_window(
    ctx: &egui::Context,
    id: &str,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> Option<egui::Response> {
    egui::Window::new(RichText::new(title).color(ThemeColors::TEXT_PRIMARY))
        .id(egui::Id::new(("modal", id)))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, add_contents)
        .map(|inner| inner.response)
}
