use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the node description
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let description = app
        .state
        .node_description()
        .unwrap_or_else(|| format!("{} | waiting for first report", app.state.hostname));

    let line = Line::from(vec![
        Span::styled(" nodetop ", app.theme.tab_active),
        Span::raw(" "),
        Span::styled(description, app.theme.header),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar at the top
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .map(|view| Line::from(format!(" {}:{} ", view.index() + 1, view.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let status = if let Some(ref err) = state.last_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if let Some(updated) = state.updated_at {
        format!(
            " {} | cycle {} | Updated {} | q:quit Tab:switch r:refresh ?:help",
            app.source_description,
            state.cycle,
            updated.with_timezone(&chrono::Local).format("%H:%M:%S"),
        )
    } else {
        format!(" {} | Loading... | q:quit", app.source_description)
    };

    let style = if state.last_error.is_some() {
        Style::default().fg(app.theme.critical)
    } else {
        app.theme.muted
    };
    frame.render_widget(Paragraph::new(status).style(style), area);
}

/// Render the help overlay
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  q         Quit"),
        Line::from("  Tab       Next view"),
        Line::from("  Shift+Tab Previous view"),
        Line::from("  1-4       Jump to view"),
        Line::from("  Up/k      Scroll up"),
        Line::from("  Down/j    Scroll down"),
        Line::from("  r         Refresh now"),
        Line::from("  ?         Toggle this help"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay
    let help_width = 40;
    let help_height = 14;
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(
        x,
        y,
        help_width.min(area.width),
        help_height.min(area.height),
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Bordered block with a title, shared by every view
pub fn titled_block<'a>(app: &App, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Placeholder shown until the first cycle completes
pub fn render_waiting(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    let message = match app.state.last_error {
        Some(ref err) => format!("No data yet: {err}"),
        None => "Waiting for the first poll cycle...".to_string(),
    };
    let paragraph = Paragraph::new(message)
        .style(app.theme.muted)
        .block(titled_block(app, format!(" {title} ")));
    frame.render_widget(paragraph, area);
}
