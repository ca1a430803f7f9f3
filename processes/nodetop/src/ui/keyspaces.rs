use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use super::common::{render_waiting, titled_block};
use crate::app::App;
use crate::data::format::{format_count, format_latency};

/// Render the keyspaces view - counters and latencies per keyspace
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref stats) = app.state.table_stats else {
        render_waiting(frame, app, area, "Keyspaces");
        return;
    };

    let header = Row::new(vec![
        Cell::from("Keyspace").style(app.theme.header),
        Cell::from("Reads").style(app.theme.header),
        Cell::from("Read ms").style(app.theme.header),
        Cell::from("Writes").style(app.theme.header),
        Cell::from("Write ms").style(app.theme.header),
        Cell::from("Pending").style(app.theme.header),
    ])
    .height(1);

    let rows: Vec<Row> = stats
        .keyspaces
        .iter()
        .map(|ks| {
            let pending_style = if ks.pending_flushes > 0 {
                Style::default().fg(app.theme.warning)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(ks.name.clone()),
                Cell::from(format_count(ks.read_count)),
                Cell::from(format_latency(ks.read_latency_ms)),
                Cell::from(format_count(ks.write_count)),
                Cell::from(format_latency(ks.write_latency_ms)),
                Cell::from(ks.pending_flushes.to_string()).style(pending_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let title = format!(
        " Keyspaces: avg read {} ms, avg write {} ms, {} pending flushes ",
        format_latency(stats.avg_read_latency()),
        format_latency(stats.avg_write_latency()),
        stats.total_pending_flushes()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(app, title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !stats.keyspaces.is_empty() {
        state.select(Some(app.scroll));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
