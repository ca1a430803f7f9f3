use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Colours for light and dark terminals
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub header: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub selected: Style,
    pub border: Color,
    pub border_type: BorderType,
    pub highlight: Color,
    pub healthy: Color,
    pub warning: Color,
    pub critical: Color,
    pub muted: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Black).bg(Color::Cyan),
            tab_inactive: Style::default().fg(Color::Gray),
            selected: Style::default().bg(Color::DarkGray),
            border: Color::DarkGray,
            border_type: BorderType::Rounded,
            highlight: Color::Cyan,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            muted: Style::default().add_modifier(Modifier::DIM),
        }
    }

    pub fn light() -> Self {
        Self {
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::White).bg(Color::Blue),
            tab_inactive: Style::default().fg(Color::DarkGray),
            selected: Style::default().bg(Color::Gray),
            border: Color::Gray,
            border_type: BorderType::Rounded,
            highlight: Color::Blue,
            healthy: Color::Green,
            warning: Color::Magenta,
            critical: Color::Red,
            muted: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Pick light or dark from the terminal background, dark if unknown
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Green when up and normal, yellow for transitional states, red when down
    pub fn node_style(&self, state: nodetop_common::NodeState) -> Style {
        use nodetop_common::{Availability, Mode};
        let color = match (state.availability, state.mode) {
            (Availability::Up, Mode::Normal) => self.healthy,
            (Availability::Up, _) => self.warning,
            (Availability::Down, _) => self.critical,
        };
        Style::default().fg(color)
    }

    pub fn flag_style(&self, active: bool) -> Style {
        Style::default().fg(if active { self.healthy } else { self.critical })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
