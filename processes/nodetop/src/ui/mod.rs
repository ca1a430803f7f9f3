pub mod caches;
pub mod common;
pub mod keyspaces;
pub mod overview;
pub mod theme;
pub mod topology;

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::{App, View};

pub use theme::Theme;

/// Draw one full frame
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(10),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Overview => overview::render(frame, app, chunks[2]),
        View::Topology => topology::render(frame, app, chunks[2]),
        View::Keyspaces => keyspaces::render(frame, app, chunks[2]),
        View::Caches => caches::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, frame.area());
    }
}
