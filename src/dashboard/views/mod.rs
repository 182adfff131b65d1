//! Dashboard views

pub mod header;
pub mod library;

pub use header::render_header;
pub use library::render_library_view;
