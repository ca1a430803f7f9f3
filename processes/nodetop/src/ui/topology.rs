use ratatui::{
    layout::{Constraint, Rect},
    style::Modifier,
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use super::common::{render_waiting, titled_block};
use crate::app::App;

/// Render the topology view - one header row per datacenter, then its nodes
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref status) = app.state.status else {
        render_waiting(frame, app, area, "Topology");
        return;
    };

    let header = Row::new(vec![
        Cell::from("State").style(app.theme.header),
        Cell::from("Address").style(app.theme.header),
        Cell::from("Load").style(app.theme.header),
        Cell::from("Tokens").style(app.theme.header),
        Cell::from("Owns").style(app.theme.header),
        Cell::from("Host ID").style(app.theme.header),
        Cell::from("Rack").style(app.theme.header),
    ])
    .height(1);

    let mut rows = Vec::with_capacity(app.row_count());
    for dc in &status.datacenters {
        let up = dc.nodes.iter().filter(|n| n.state.is_up()).count();
        // Tables have no column span: the label goes in the widest column
        rows.push(
            Row::new(vec![
                Cell::from("DC"),
                Cell::from(""),
                Cell::from(""),
                Cell::from(""),
                Cell::from(""),
                Cell::from(format!("Datacenter: {}", dc.name)),
                Cell::from(format!("{}/{} up", up, dc.nodes.len())),
            ])
            .style(app.theme.header.add_modifier(Modifier::UNDERLINED)),
        );
        rows.extend(dc.nodes.iter().map(|node| {
            Row::new(vec![
                Cell::from(node.state.code()).style(app.theme.node_style(node.state)),
                Cell::from(node.address.clone()),
                Cell::from(node.load.clone()),
                Cell::from(node.token_count.to_string()),
                Cell::from(node.ownership.to_string()),
                Cell::from(node.host_id.clone()),
                Cell::from(node.rack.clone()),
            ])
        }));
    }

    let widths = [
        Constraint::Length(6),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Min(36),
        Constraint::Length(10),
    ];

    let title = format!(
        " Topology: {} datacenters, {} nodes ",
        status.datacenters.len(),
        status.node_count()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(app, title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.scroll));

    frame.render_stateful_widget(table, area, &mut state);
}
