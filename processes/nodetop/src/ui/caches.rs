use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use nodetop_common::CacheKind;

use super::common::{render_waiting, titled_block};
use crate::app::App;
use crate::data::format::{format_count, format_flag, format_latency, format_uptime};

/// Render the caches view - the three cache records and the node health fields
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref info) = app.state.info else {
        render_waiting(frame, app, area, "Caches");
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(6), Constraint::Min(8)]).split(area);

    let header = Row::new(
        ["Cache", "Entries", "Size", "Capacity", "Hits", "Requests", "Hit rate", "Save (s)"]
            .map(|title| Cell::from(title).style(app.theme.header)),
    )
    .height(1);

    let rows: Vec<Row> = CacheKind::ALL
        .iter()
        .map(|kind| {
            let cache = info.cache(*kind);
            Row::new(vec![
                Cell::from(kind.label()),
                Cell::from(format_count(cache.entries)),
                Cell::from(cache.size.clone()),
                Cell::from(cache.capacity.clone()),
                Cell::from(format_count(cache.hits)),
                Cell::from(format_count(cache.requests)),
                Cell::from(format_latency(cache.recent_hit_rate)),
                Cell::from(cache.save_period_secs.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(app, " Caches "));
    frame.render_widget(table, chunks[0]);

    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<18}"), app.theme.header),
            Span::raw(value),
        ])
    };
    let flag = |name: &str, active: bool| {
        Line::from(vec![
            Span::styled(format!("{name:<18}"), app.theme.header),
            Span::styled(format_flag(active), app.theme.flag_style(active)),
        ])
    };

    let lines = vec![
        field("ID", info.id.clone()),
        flag("Gossip", info.gossip_active),
        flag("Thrift", info.thrift_active),
        flag("Native transport", info.native_transport_active),
        field("Load", info.load.clone()),
        field("Generation", info.generation_number.to_string()),
        field("Uptime", format_uptime(info.uptime_secs)),
        field(
            "Heap (MB)",
            format!(
                "{:.2} / {:.2} ({}%)",
                info.heap_used_mb,
                info.heap_capacity_mb,
                format_latency(info.heap_usage_percent)
            ),
        ),
        field("Data center", info.data_center.clone()),
        field("Rack", info.rack.clone()),
        field("Exceptions", info.exception_count.to_string()),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(titled_block(app, " Node Info ")),
        chunks[1],
    );
}
