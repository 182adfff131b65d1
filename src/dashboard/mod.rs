//! Dashboard UI Module
//!
//! Library list, download progress, platform toggles and session status
//! for a self-hosted GOG download manager.

pub mod app;
pub mod controller;
pub mod filter;
pub mod state;
pub mod theme;
pub mod views;
pub mod components;

pub use app::DashboardApp;
pub use controller::DashboardController;
pub use state::{GameRow, LibraryState};
