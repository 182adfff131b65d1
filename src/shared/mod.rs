//! Shared state and messaging between dashboard and worker
//!
//! The dashboard owns all UI state; the worker owns all network I/O. The
//! active-downloads set is read by both and written only by the dashboard.

pub mod state;
pub mod messages;

pub use state::{SharedAppState, UserStatus};
pub use messages::{DashboardCommand, WorkerEvent};
