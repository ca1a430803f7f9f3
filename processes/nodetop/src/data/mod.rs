pub mod format;
pub mod state;

pub use state::{local_hostname, DashboardState};
