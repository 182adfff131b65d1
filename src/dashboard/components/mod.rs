//! Reusable UI components for the dashboard

pub mod game_row;
pub mod modals;
pub mod notice;
pub mod status_card;

pub use game_row::{platform_toggle, render_game_row};
pub use modals::render_modals;
pub use notice::render_notice;
pub use status_card::{CardStatus, StatusCard};
