use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols,
    text::Line,
    widgets::{Axis, Chart, Dataset, Gauge, GraphType, Paragraph},
    Frame,
};

use nodetop_common::{SeriesKey, HISTORY_CAPACITY};

use super::common::{render_waiting, titled_block};
use crate::app::App;
use crate::data::format::{format_latency, format_uptime};

/// Render the overview: node line, up-normal gauge and the four trend charts
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.state.has_data() {
        render_waiting(frame, app, area, "Overview");
        return;
    }

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Min(8),
    ])
    .split(area);
    let top = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let middle = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    render_node(frame, app, top[0]);
    render_gauge(frame, app, top[1]);
    render_chart(frame, app, middle[0], SeriesKey::ReadLatency);
    render_chart(frame, app, middle[1], SeriesKey::WriteLatency);
    render_chart(frame, app, bottom[0], SeriesKey::Exceptions);
    render_chart(frame, app, bottom[1], SeriesKey::HeapUsage);
}

fn render_node(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.state.info {
        Some(ref info) => format!(
            "{} | up {} | load {}",
            info.id,
            format_uptime(info.uptime_secs),
            info.load
        ),
        None => String::new(),
    };
    let paragraph = Paragraph::new(text).block(titled_block(app, " Node "));
    frame.render_widget(paragraph, area);
}

fn render_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let percent = app.state.percent_up_normal();
    let (up, total) = app
        .state
        .status
        .as_ref()
        .map(|s| (s.up_normal_count(), s.node_count()))
        .unwrap_or((0, 0));

    let color = match percent {
        100 => app.theme.healthy,
        p if p >= 50 => app.theme.warning,
        _ => app.theme.critical,
    };

    let gauge = Gauge::default()
        .block(titled_block(app, format!(" {} ", SeriesKey::PercentUpNormal.label())))
        .gauge_style(Style::default().fg(color))
        .percent(u16::from(percent))
        .label(format!("{percent}% ({up}/{total})"));
    frame.render_widget(gauge, area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect, key: SeriesKey) {
    let series = app.state.history.series(key);
    let points = chart_points(&series);
    let [low, high] = y_bounds(&points);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.highlight))
        .data(&points);

    let title = chart_title(key, app.state.history.latest(key));
    let chart = Chart::new(vec![dataset])
        .block(titled_block(app, Line::from(title)))
        .x_axis(Axis::default().bounds([0.0, (HISTORY_CAPACITY - 1) as f64]))
        .y_axis(
            Axis::default()
                .style(app.theme.muted)
                .bounds([low, high])
                .labels([format!("{low:.1}"), format!("{high:.1}")]),
        );
    frame.render_widget(chart, area);
}

/// `Read Latency (1.471)`, `Exceptions (108)`
fn chart_title(key: SeriesKey, latest: Option<f64>) -> String {
    let value = match (key, latest) {
        (_, None) => "-".to_string(),
        (SeriesKey::Exceptions, Some(v)) if v.is_finite() => format!("{v:.0}"),
        (_, Some(v)) => format_latency(v),
    };
    format!(" {} ({}) ", key.label(), value)
}

/// Index-keyed points, dropping samples that cannot be plotted
fn chart_points(series: &[f64]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

/// Y range covering every point, never empty
fn y_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let (low, high) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
        (lo.min(*y), hi.max(*y))
    });
    if low > high {
        [0.0, 1.0]
    } else if low == high {
        [low - 1.0, high + 1.0]
    } else {
        [low, high]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_points_skip_non_finite() {
        let points = chart_points(&[1.0, f64::NAN, 3.0, f64::INFINITY]);
        assert_eq!(points, vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(&[]), [0.0, 1.0]);
        assert_eq!(y_bounds(&[(0.0, 5.0)]), [4.0, 6.0]);
        assert_eq!(y_bounds(&[(0.0, 5.0), (1.0, 2.0)]), [2.0, 5.0]);
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(
            chart_title(SeriesKey::ReadLatency, Some(1.4712197562234925)),
            " Read Latency (1.471) "
        );
        assert_eq!(chart_title(SeriesKey::WriteLatency, Some(f64::NAN)), " Write Latency (NaN) ");
        assert_eq!(chart_title(SeriesKey::Exceptions, Some(108.0)), " Exceptions (108) ");
        assert_eq!(chart_title(SeriesKey::HeapUsage, None), " Heap Used (-) ");
    }
}
